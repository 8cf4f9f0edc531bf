//! Piano controls and what a key press does to the audio component.

use ga_audio::AudioComponent;

pub const NUM_KEYS: usize = 13;

/// C4 through C5; sharps are drawn as black keys.
pub const KEY_NAMES: [&str; NUM_KEYS] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B", "C",
];

pub const VOLUME_STEP: f32 = 0.2;
pub const VOLUME_MAX: f32 = 2.0;
pub const PAN_STEP: f32 = 0.2;
pub const EQ_STEP: f32 = 5.0;
pub const EQ_MIN: f32 = -80.0;
pub const EQ_MAX: f32 = 10.0;

const PIANO_SOUND: usize = 0;
const GUITAR_SOUND: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone)]
pub struct Piano {
    pub use_guitar: bool,
    pub octave_up: bool,
    pub distort: bool,
    pub echo: bool,
    pub tremolo: bool,
    pub chorus: bool,
    pub volume: f32,
    pub pan: f32,
    pub low_gain: f32,
    pub mid_gain: f32,
    pub high_gain: f32,
}

impl Default for Piano {
    fn default() -> Self {
        Self {
            use_guitar: false,
            octave_up: false,
            distort: false,
            echo: false,
            tremolo: false,
            chorus: false,
            volume: 1.0,
            pan: 0.0,
            low_gain: 0.0,
            mid_gain: 0.0,
            high_gain: 0.0,
        }
    }
}

impl Piano {
    pub fn is_black_key(key: usize) -> bool {
        KEY_NAMES.get(key).is_some_and(|name| name.ends_with('#'))
    }

    /// Semitones relative to the recorded C4 for `key`.
    pub fn semitones(&self, key: usize) -> f32 {
        -12.0 + key as f32 + if self.octave_up { 12.0 } else { 0.0 }
    }

    pub fn volume_up(&mut self) {
        self.volume = (self.volume + VOLUME_STEP).min(VOLUME_MAX);
    }

    pub fn volume_down(&mut self) {
        self.volume = (self.volume - VOLUME_STEP).max(0.0);
    }

    pub fn reset_volume(&mut self) {
        self.volume = 1.0;
    }

    pub fn pan_right(&mut self) {
        self.pan = (self.pan + PAN_STEP).min(1.0);
    }

    pub fn pan_left(&mut self) {
        self.pan = (self.pan - PAN_STEP).max(-1.0);
    }

    pub fn reset_pan(&mut self) {
        self.pan = 0.0;
    }

    fn gain_mut(&mut self, band: Band) -> &mut f32 {
        match band {
            Band::Low => &mut self.low_gain,
            Band::Mid => &mut self.mid_gain,
            Band::High => &mut self.high_gain,
        }
    }

    pub fn eq_up(&mut self, band: Band) {
        let gain = self.gain_mut(band);
        *gain = (*gain + EQ_STEP).min(EQ_MAX);
    }

    pub fn eq_down(&mut self, band: Band) {
        let gain = self.gain_mut(band);
        *gain = (*gain - EQ_STEP).max(EQ_MIN);
    }

    pub fn reset_eq(&mut self) {
        self.low_gain = 0.0;
        self.mid_gain = 0.0;
        self.high_gain = 0.0;
    }

    /// Play `key` with the current settings. Returns the channel used, if any.
    ///
    /// Effects switched off are still requested with their "off" values; the
    /// ones the component refuses (echo with no delay) just don't get added.
    pub fn play(&self, audio: &mut AudioComponent, key: usize) -> Option<usize> {
        let sound = if self.use_guitar { GUITAR_SOUND } else { PIANO_SOUND };
        let channel = audio.play_sound(sound)?;

        let on_off = |on: bool, value: f32| if on { value } else { 0.0 };

        let _ = audio.set_channel_volume(channel, self.volume);
        let _ = audio.set_channel_pan(channel, self.pan);
        let _ = audio.set_channel_pitch(channel, self.semitones(key));
        let _ = audio.set_channel_distortion(channel, on_off(self.distort, 1.0));
        let _ = audio.set_channel_echo(channel, on_off(self.echo, 400.0), 50.0, 0.0, 0.0);
        let _ = audio.set_channel_tremolo(channel, 5.0, on_off(self.tremolo, 1.0), 0.5);
        let _ = audio.set_channel_chorus(channel, on_off(self.chorus, 50.0), 0.8, 3.0);
        let _ = audio.set_channel_three_eq(
            channel,
            self.low_gain,
            self.mid_gain,
            self.high_gain,
            400.0,
            4000.0,
            1,
        );

        log::debug!(
            "key {} ({}) on channel {}",
            key,
            KEY_NAMES.get(key).copied().unwrap_or("?"),
            channel
        );
        Some(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ga_audio::{AudioConfig, OutputMode, Sound};

    fn audio() -> AudioComponent {
        let config = AudioConfig::new()
            .channels(4)
            .output(OutputMode::NoSound);
        let mut audio = AudioComponent::with_config(config).unwrap();
        audio.add_sound_data(Sound::from_samples("piano", vec![0.1; 48_000], 48_000));
        audio.add_sound_data(Sound::from_samples("guitar", vec![0.1; 24_000], 48_000));
        audio
    }

    #[test]
    fn test_key_pitch_mapping() {
        let mut piano = Piano::default();
        assert_eq!(piano.semitones(0), -12.0);
        assert_eq!(piano.semitones(12), 0.0);

        piano.octave_up = true;
        assert_eq!(piano.semitones(0), 0.0);
        assert_eq!(piano.semitones(12), 12.0);
    }

    #[test]
    fn test_volume_clamped() {
        let mut piano = Piano::default();
        for _ in 0..10 {
            piano.volume_up();
        }
        assert_eq!(piano.volume, VOLUME_MAX);
        for _ in 0..20 {
            piano.volume_down();
        }
        assert_eq!(piano.volume, 0.0);
        piano.reset_volume();
        assert_eq!(piano.volume, 1.0);
    }

    #[test]
    fn test_pan_clamped() {
        let mut piano = Piano::default();
        for _ in 0..10 {
            piano.pan_left();
        }
        assert_eq!(piano.pan, -1.0);
        piano.reset_pan();
        piano.pan_right();
        assert!((piano.pan - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_eq_clamped() {
        let mut piano = Piano::default();
        piano.eq_up(Band::Low);
        piano.eq_up(Band::Low);
        piano.eq_up(Band::Low);
        assert_eq!(piano.low_gain, EQ_MAX);

        for _ in 0..20 {
            piano.eq_down(Band::High);
        }
        assert_eq!(piano.high_gain, EQ_MIN);

        piano.reset_eq();
        assert_eq!((piano.low_gain, piano.mid_gain, piano.high_gain), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_black_keys() {
        let black: Vec<usize> = (0..NUM_KEYS).filter(|&k| Piano::is_black_key(k)).collect();
        assert_eq!(black, vec![1, 3, 6, 8, 10]);
    }

    #[test]
    fn test_key_press_with_everything_off() {
        let mut audio = audio();
        let piano = Piano::default();
        let channel = piano.play(&mut audio, 12).unwrap();

        // distortion 0, tremolo 0, chorus 0 and the EQ are valid; echo 0 is not
        assert_eq!(audio.channel_effect_count(channel), Some(4));
        assert_eq!(audio.channel_volume(channel), Some(1.0));
        assert!((audio.channel_pitch(channel).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_key_press_with_effects_on() {
        let mut audio = audio();
        let piano = Piano {
            use_guitar: true,
            octave_up: true,
            distort: true,
            echo: true,
            tremolo: true,
            chorus: true,
            pan: -0.4,
            ..Piano::default()
        };
        let channel = piano.play(&mut audio, 0).unwrap();

        assert_eq!(audio.channel_effect_count(channel), Some(5));
        assert_eq!(audio.channel_pan(channel), Some(-0.4));
        assert!((audio.channel_pitch(channel).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_keys_fill_lowest_channels() {
        let mut audio = audio();
        let piano = Piano::default();
        assert_eq!(piano.play(&mut audio, 0), Some(0));
        assert_eq!(piano.play(&mut audio, 4), Some(1));
        assert_eq!(piano.play(&mut audio, 7), Some(2));
    }
}
