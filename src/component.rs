//! Channel-pool audio component for a frame-driven game loop.
//!
//! [`AudioComponent`] owns an engine [`System`], a fixed pool of channel slots
//! and the list of loaded sounds. Callers address channels and sounds by plain
//! indices and never see engine handles or engine errors:
//!
//! - value-returning calls answer `None` when an index is out of range or the
//!   engine fails
//! - setters return `Result<(), Rejected>`; a rejected call changes nothing,
//!   and callers that don't care may drop the result
//! - engine failures are logged with `log::error!`, rejections with
//!   `log::debug!`
//!
//! ```
//! use ga_audio::{AudioComponent, AudioConfig, OutputMode, Sound};
//!
//! let config = AudioConfig::new().channels(4).output(OutputMode::NoSound);
//! let mut audio = AudioComponent::with_config(config).unwrap();
//!
//! let beep = audio.add_sound_data(Sound::from_samples("beep", vec![0.5; 4800], 48_000));
//! let channel = audio.play_sound(beep).unwrap();
//! audio.set_channel_echo(channel, 250.0, 40.0, 0.0, -6.0).unwrap();
//!
//! // Out-of-range values are refused without touching the channel
//! assert!(audio.set_channel_distortion(channel, 3.0).is_err());
//! assert_eq!(audio.channel_effect_count(channel), Some(1));
//!
//! audio.update();
//! ```

use std::path::Path;

use thiserror::Error;

use crate::config::AudioConfig;
use crate::effect::{
    Chorus, Compressor, Distortion, Echo, Effect, Fader, Flange, Limiter, Lowpass, Normalize,
    Oscillator, PitchShift, Reverb, ThreeEq, Tremolo,
};
use crate::engine::{ChannelHandle, Sound, SoundHandle, System};
use crate::error::AudioResult;

/// Default pool size for [`AudioComponent::new`] callers that don't care.
pub const DEFAULT_CHANNELS: usize = 32;

/// Channel volume bounds (linear gain).
pub const VOLUME_RANGE: (f32, f32) = (0.0, 10.0);
/// Channel pan bounds, hard left to hard right.
pub const PAN_RANGE: (f32, f32) = (-1.0, 1.0);
/// Semitones; ten octaves either way keeps the rate finite and non-zero.
pub const PITCH_RANGE: (f32, f32) = (-120.0, 120.0);

/// Why a setter left the channel alone.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Rejected {
    #[error("channel {0} is outside the pool")]
    NoSuchChannel(usize),

    #[error("channel {0} is not playing")]
    NotPlaying(usize),

    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// The engine refused the request; the cause was logged.
    #[error("engine error")]
    Engine,
}

pub struct AudioComponent {
    system: System,
    channels: Vec<Option<ChannelHandle>>,
    sounds: Vec<SoundHandle>,
}

impl AudioComponent {
    /// Open the default output device with a pool of `num_channels` channels.
    pub fn new(num_channels: usize) -> AudioResult<Self> {
        Self::with_config(AudioConfig::new().channels(num_channels))
    }

    pub fn with_config(config: AudioConfig) -> AudioResult<Self> {
        let num_channels = config.num_channels;
        let system = System::new(config)?;

        Ok(Self {
            system,
            channels: vec![None; num_channels],
            sounds: Vec::new(),
        })
    }

    /// Pump the engine. Call once per frame.
    pub fn update(&mut self) {
        if let Err(e) = self.system.update() {
            log::error!("audio update failed: {}", e);
        }
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    /// Reader for the mono mix, for scopes and analyzers.
    #[cfg(feature = "rtrb")]
    pub fn take_scope(&mut self) -> Option<rtrb::Consumer<f32>> {
        self.system.take_scope()
    }

    pub fn sample_rate(&self) -> u32 {
        self.system.sample_rate()
    }

    // --- Sounds ---

    /// Load a sound file and append it to the sound list. Returns its index,
    /// or `None` (after logging) if the file can't be loaded.
    pub fn add_sound(&mut self, path: impl AsRef<Path>) -> Option<usize> {
        let path = path.as_ref();
        match self.system.create_sound(path) {
            Ok(handle) => {
                self.sounds.push(handle);
                Some(self.sounds.len() - 1)
            }
            Err(e) => {
                log::error!("could not add sound {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Append an already-decoded sound. Returns its index.
    pub fn add_sound_data(&mut self, sound: Sound) -> usize {
        self.sounds.push(self.system.add_sound(sound));
        self.sounds.len() - 1
    }

    pub fn num_sounds(&self) -> usize {
        self.sounds.len()
    }

    pub fn sound_length_ms(&self, sound: usize) -> Option<f32> {
        let handle = *self.sounds.get(sound)?;
        self.engine(self.system.sound_length_ms(handle))
    }

    // --- Playback ---

    /// Play sound `sound` on the lowest-index channel that isn't playing.
    /// Returns the channel index, or `None` if the sound index is out of
    /// range or every channel is busy.
    pub fn play_sound(&mut self, sound: usize) -> Option<usize> {
        let Some(&handle) = self.sounds.get(sound) else {
            log::debug!("play_sound: no sound {} ({} loaded)", sound, self.sounds.len());
            return None;
        };

        let Some(channel) = (0..self.channels.len()).find(|&i| !self.slot_playing(i)) else {
            log::debug!("play_sound: all {} channels busy", self.channels.len());
            return None;
        };

        let playing = self.engine(self.system.play_sound(handle, false))?;
        self.channels[channel] = Some(playing);
        Some(channel)
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Playing or paused. Out-of-range channels are not playing.
    pub fn is_channel_playing(&self, channel: usize) -> bool {
        channel < self.channels.len() && self.slot_playing(channel)
    }

    pub fn stop_channel(&mut self, channel: usize) -> Result<(), Rejected> {
        let handle = self.playing_handle(channel)?;
        self.engine_call(self.system.stop(handle))?;
        self.channels[channel] = None;
        Ok(())
    }

    pub fn stop_all(&mut self) {
        self.system.stop_all();
        self.channels.fill(None);
    }

    pub fn set_channel_paused(&mut self, channel: usize, paused: bool) -> Result<(), Rejected> {
        let handle = self.playing_handle(channel)?;
        self.engine_call(self.system.set_paused(handle, paused))
    }

    pub fn is_channel_paused(&self, channel: usize) -> Option<bool> {
        let handle = self.query_handle(channel)?;
        self.engine(self.system.paused(handle))
    }

    // --- Channel controls ---

    /// Linear gain, 0 to 10.
    pub fn set_channel_volume(&mut self, channel: usize, volume: f32) -> Result<(), Rejected> {
        let handle = self.playing_handle(channel)?;
        in_range("volume", volume, VOLUME_RANGE)?;
        self.engine_call(self.system.set_volume(handle, volume))
    }

    pub fn channel_volume(&self, channel: usize) -> Option<f32> {
        let handle = self.query_handle(channel)?;
        self.engine(self.system.volume(handle))
    }

    /// -1 hard left, 0 centre, 1 hard right.
    pub fn set_channel_pan(&mut self, channel: usize, pan: f32) -> Result<(), Rejected> {
        let handle = self.playing_handle(channel)?;
        in_range("pan", pan, PAN_RANGE)?;
        self.engine_call(self.system.set_pan(handle, pan))
    }

    pub fn channel_pan(&self, channel: usize) -> Option<f32> {
        let handle = self.query_handle(channel)?;
        self.engine(self.system.pan(handle))
    }

    /// Transpose by `semitones` relative to the sound's own pitch, within
    /// [`PITCH_RANGE`].
    pub fn set_channel_pitch(&mut self, channel: usize, semitones: f32) -> Result<(), Rejected> {
        let handle = self.playing_handle(channel)?;
        in_range("pitch", semitones, PITCH_RANGE)?;
        self.engine_call(self.system.set_pitch(handle, semitones_to_ratio(semitones)))
    }

    /// Playback rate as a ratio (1.0 is untransposed).
    pub fn channel_pitch(&self, channel: usize) -> Option<f32> {
        let handle = self.query_handle(channel)?;
        self.engine(self.system.pitch(handle))
    }

    pub fn channel_position_ms(&self, channel: usize) -> Option<f32> {
        let handle = self.query_handle(channel)?;
        self.engine(self.system.position(handle))
    }

    // --- Effects ---

    /// Validate `effect` and append it to the channel's DSP chain.
    ///
    /// Nothing changes unless the channel is playing and every parameter lies
    /// within its range.
    pub fn apply_effect(
        &mut self,
        channel: usize,
        effect: impl Into<Effect>,
    ) -> Result<(), Rejected> {
        let effect = effect.into();
        let handle = self.playing_handle(channel)?;

        let dsp_type = effect.dsp_type();
        if let Err(violation) = effect.check() {
            let name = dsp_type
                .params()
                .get(violation.position)
                .map_or("parameter", |desc| desc.name);
            return reject(Rejected::OutOfRange {
                name,
                value: violation.value,
                min: violation.min,
                max: violation.max,
            });
        }

        let sample_rate = self.system.sample_rate() as f32;
        let unit = self.engine_call(effect.build(sample_rate))?;
        self.engine_call(self.system.add_dsp(handle, unit))?;

        log::trace!("channel {}: added {}", channel, dsp_type.name());
        Ok(())
    }

    /// Number of DSP units in the channel's chain.
    pub fn channel_effect_count(&self, channel: usize) -> Option<usize> {
        let handle = self.query_handle(channel)?;
        self.engine(self.system.dsp_count(handle))
    }

    pub fn clear_channel_effects(&mut self, channel: usize) -> Result<(), Rejected> {
        let handle = self.playing_handle(channel)?;
        self.engine_call(self.system.clear_dsps(handle))
    }

    /// mix %, rate Hz, depth %
    pub fn set_channel_chorus(
        &mut self,
        channel: usize,
        mix: f32,
        rate: f32,
        depth: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(channel, Chorus { mix, rate, depth })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_channel_compressor(
        &mut self,
        channel: usize,
        threshold: f32,
        ratio: f32,
        attack: f32,
        release: f32,
        makeup_gain: f32,
        linked: bool,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            Compressor {
                threshold,
                ratio,
                attack,
                release,
                makeup_gain,
                linked,
            },
        )
    }

    pub fn set_channel_distortion(&mut self, channel: usize, level: f32) -> Result<(), Rejected> {
        self.apply_effect(channel, Distortion { level })
    }

    /// delay ms, feedback %, dry dB, wet dB
    pub fn set_channel_echo(
        &mut self,
        channel: usize,
        delay: f32,
        feedback: f32,
        dry_level: f32,
        wet_level: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            Echo {
                delay,
                feedback,
                dry_level,
                wet_level,
            },
        )
    }

    pub fn set_channel_fader(&mut self, channel: usize, gain: f32) -> Result<(), Rejected> {
        self.apply_effect(channel, Fader { gain })
    }

    pub fn set_channel_flange(
        &mut self,
        channel: usize,
        mix: f32,
        depth: f32,
        rate: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(channel, Flange { mix, depth, rate })
    }

    pub fn set_channel_limiter(
        &mut self,
        channel: usize,
        release_time: f32,
        ceiling: f32,
        maximizer_gain: f32,
        mode: bool,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            Limiter {
                release_time,
                ceiling,
                maximizer_gain,
                mode,
            },
        )
    }

    pub fn set_channel_lowpass(
        &mut self,
        channel: usize,
        cutoff: f32,
        resonance: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(channel, Lowpass { cutoff, resonance })
    }

    pub fn set_channel_normalize(
        &mut self,
        channel: usize,
        fade_time: f32,
        threshold: f32,
        max_amp: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            Normalize {
                fade_time,
                threshold,
                max_amp,
            },
        )
    }

    /// waveform 0-5 (sine, square, saw up, saw down, triangle, noise), rate Hz
    pub fn set_channel_oscillator(
        &mut self,
        channel: usize,
        waveform: i32,
        rate: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(channel, Oscillator { waveform, rate })
    }

    pub fn set_channel_pitch_shift(
        &mut self,
        channel: usize,
        pitch: f32,
        fft_size: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(channel, PitchShift { pitch, fft_size })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_channel_reverb(
        &mut self,
        channel: usize,
        decay_time: f32,
        early_delay: f32,
        hf_decay_ratio: f32,
        diffusion: f32,
        wet_level: f32,
        dry_level: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            Reverb {
                decay_time,
                early_delay,
                hf_decay_ratio,
                diffusion,
                wet_level,
                dry_level,
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_channel_three_eq(
        &mut self,
        channel: usize,
        low_gain: f32,
        mid_gain: f32,
        high_gain: f32,
        low_crossover: f32,
        high_crossover: f32,
        crossover_slope: i32,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            ThreeEq {
                low_gain,
                mid_gain,
                high_gain,
                low_crossover,
                high_crossover,
                crossover_slope,
            },
        )
    }

    pub fn set_channel_tremolo(
        &mut self,
        channel: usize,
        frequency: f32,
        depth: f32,
        duty: f32,
    ) -> Result<(), Rejected> {
        self.apply_effect(
            channel,
            Tremolo {
                frequency,
                depth,
                duty,
            },
        )
    }

    // --- Internals ---

    fn slot_playing(&self, channel: usize) -> bool {
        match self.channels[channel] {
            Some(handle) => self.system.is_playing(handle).unwrap_or(false),
            None => false,
        }
    }

    /// Handle for a channel that exists and is playing.
    fn playing_handle(&self, channel: usize) -> Result<ChannelHandle, Rejected> {
        let Some(slot) = self.channels.get(channel) else {
            return reject(Rejected::NoSuchChannel(channel));
        };
        match slot {
            Some(handle) if self.system.is_playing(*handle).unwrap_or(false) => Ok(*handle),
            _ => reject(Rejected::NotPlaying(channel)),
        }
    }

    // Same check as playing_handle, without logging; queries are polled
    fn query_handle(&self, channel: usize) -> Option<ChannelHandle> {
        let handle = (*self.channels.get(channel)?)?;
        self.system
            .is_playing(handle)
            .unwrap_or(false)
            .then_some(handle)
    }

    fn engine<T>(&self, result: AudioResult<T>) -> Option<T> {
        result.map_err(|e| log::error!("audio engine: {}", e)).ok()
    }

    fn engine_call<T>(&self, result: AudioResult<T>) -> Result<T, Rejected> {
        self.engine(result).ok_or(Rejected::Engine)
    }
}

/// Equal-tempered transposition: 12 semitones doubles the rate.
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

fn in_range(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), Rejected> {
    if value >= min && value <= max {
        Ok(())
    } else {
        reject(Rejected::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn reject<T>(reason: Rejected) -> Result<T, Rejected> {
    log::debug!("rejected: {}", reason);
    Err(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use crate::effect::DspType;

    fn component(channels: usize) -> AudioComponent {
        let config = AudioConfig::new()
            .channels(channels)
            .sample_rate(1000)
            .block_size(10)
            .output(OutputMode::NoSound);
        AudioComponent::with_config(config).unwrap()
    }

    fn with_sound(channels: usize, frames: usize) -> (AudioComponent, usize) {
        let mut audio = component(channels);
        let sound = audio.add_sound_data(Sound::from_samples("tone", vec![0.5; frames], 1000));
        (audio, sound)
    }

    #[test]
    fn test_play_returns_lowest_free_channel() {
        let (mut audio, sound) = with_sound(4, 1000);
        assert_eq!(audio.play_sound(sound), Some(0));
        assert_eq!(audio.play_sound(sound), Some(1));
        assert_eq!(audio.play_sound(sound), Some(2));

        audio.stop_channel(1).unwrap();
        assert_eq!(audio.play_sound(sound), Some(1));
        assert_eq!(audio.play_sound(sound), Some(3));
    }

    #[test]
    fn test_play_fails_when_all_busy() {
        let (mut audio, sound) = with_sound(2, 1000);
        audio.play_sound(sound);
        audio.play_sound(sound);
        assert_eq!(audio.play_sound(sound), None);
    }

    #[test]
    fn test_finished_channel_is_reused() {
        let (mut audio, sound) = with_sound(2, 15);
        assert_eq!(audio.play_sound(sound), Some(0));
        audio.update();
        audio.update();
        assert!(!audio.is_channel_playing(0));
        assert_eq!(audio.play_sound(sound), Some(0));
    }

    #[test]
    fn test_bad_sound_index_leaves_channels_alone() {
        let (mut audio, sound) = with_sound(2, 1000);
        assert_eq!(audio.play_sound(sound + 1), None);
        assert_eq!(audio.play_sound(usize::MAX), None);
        assert!(!audio.is_channel_playing(0));
        assert!(!audio.is_channel_playing(1));
    }

    #[test]
    fn test_effect_on_idle_channel_rejected() {
        let (mut audio, _) = with_sound(2, 1000);
        assert_eq!(
            audio.set_channel_distortion(0, 0.5),
            Err(Rejected::NotPlaying(0))
        );
        assert_eq!(
            audio.set_channel_distortion(7, 0.5),
            Err(Rejected::NoSuchChannel(7))
        );
    }

    #[test]
    fn test_out_of_range_effect_is_noop() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();

        let err = audio.set_channel_echo(ch, 0.0, 50.0, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            Rejected::OutOfRange {
                name: "delay",
                value: 0.0,
                min: 1.0,
                max: 5000.0
            }
        );
        assert_eq!(audio.channel_effect_count(ch), Some(0));
    }

    #[test]
    fn test_effects_append_to_chain() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();

        audio.set_channel_distortion(ch, 1.0).unwrap();
        audio.set_channel_tremolo(ch, 5.0, 1.0, 0.5).unwrap();
        audio.set_channel_three_eq(ch, 0.0, -5.0, 5.0, 400.0, 4000.0, 1).unwrap();
        assert_eq!(audio.channel_effect_count(ch), Some(3));

        audio.clear_channel_effects(ch).unwrap();
        assert_eq!(audio.channel_effect_count(ch), Some(0));
    }

    #[test]
    fn test_every_catalog_effect_accepts_defaults() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();

        audio.set_channel_chorus(ch, 50.0, 0.8, 3.0).unwrap();
        audio.set_channel_compressor(ch, 0.0, 2.5, 20.0, 100.0, 0.0, true).unwrap();
        audio.set_channel_distortion(ch, 0.5).unwrap();
        audio.set_channel_echo(ch, 500.0, 50.0, 0.0, 0.0).unwrap();
        audio.set_channel_fader(ch, 0.0).unwrap();
        audio.set_channel_flange(ch, 50.0, 1.0, 0.1).unwrap();
        audio.set_channel_limiter(ch, 10.0, 0.0, 0.0, false).unwrap();
        audio.set_channel_lowpass(ch, 5000.0, 1.0).unwrap();
        audio.set_channel_normalize(ch, 5000.0, 0.1, 20.0).unwrap();
        audio.set_channel_oscillator(ch, 0, 220.0).unwrap();
        audio.set_channel_pitch_shift(ch, 1.0, 1024.0).unwrap();
        audio.set_channel_reverb(ch, 1500.0, 20.0, 50.0, 50.0, -6.0, 0.0).unwrap();
        audio.set_channel_three_eq(ch, 0.0, 0.0, 0.0, 400.0, 4000.0, 1).unwrap();
        audio.set_channel_tremolo(ch, 5.0, 1.0, 0.5).unwrap();

        assert_eq!(audio.channel_effect_count(ch), Some(DspType::ALL.len()));
        // The whole chain runs without upsetting the mixer
        audio.update();
        assert!(audio.is_channel_playing(ch));
    }

    #[test]
    fn test_int_parameter_bounds_checked() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();
        assert!(audio.set_channel_oscillator(ch, 6, 220.0).is_err());
        assert!(audio.set_channel_three_eq(ch, 0.0, 0.0, 0.0, 400.0, 4000.0, -1).is_err());
        assert_eq!(audio.channel_effect_count(ch), Some(0));
    }

    #[test]
    fn test_volume_and_pan_ranges() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();

        audio.set_channel_volume(ch, 2.0).unwrap();
        assert!(audio.set_channel_volume(ch, 10.5).is_err());
        assert!(audio.set_channel_volume(ch, -0.1).is_err());
        assert_eq!(audio.channel_volume(ch), Some(2.0));

        audio.set_channel_pan(ch, -0.4).unwrap();
        assert!(audio.set_channel_pan(ch, 1.2).is_err());
        assert_eq!(audio.channel_pan(ch), Some(-0.4));
    }

    #[test]
    fn test_pitch_in_semitones() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();

        audio.set_channel_pitch(ch, 12.0).unwrap();
        assert!((audio.channel_pitch(ch).unwrap() - 2.0).abs() < 1e-5);

        audio.set_channel_pitch(ch, -12.0).unwrap();
        assert!((audio.channel_pitch(ch).unwrap() - 0.5).abs() < 1e-5);

        assert!(audio.set_channel_pitch(ch, f32::NAN).is_err());
    }

    #[test]
    fn test_extreme_pitch_rejected() {
        let (mut audio, sound) = with_sound(1, 20);
        let ch = audio.play_sound(sound).unwrap();

        assert!(matches!(
            audio.set_channel_pitch(ch, -3000.0),
            Err(Rejected::OutOfRange { name: "pitch", .. })
        ));
        assert!(audio.set_channel_pitch(ch, 3000.0).is_err());
        assert_eq!(audio.channel_pitch(ch), Some(1.0));

        // Lowest allowed pitch still runs the sound out and frees the slot
        audio.set_channel_pitch(ch, PITCH_RANGE.0).unwrap();
        let ratio = audio.channel_pitch(ch).unwrap();
        assert!(ratio.is_finite() && ratio > 0.0);
        for _ in 0..2100 {
            audio.update();
        }
        assert!(!audio.is_channel_playing(ch));
    }

    #[test]
    fn test_queries_on_idle_channels_are_none() {
        let audio = component(2);
        assert_eq!(audio.channel_volume(0), None);
        assert_eq!(audio.channel_pan(5), None);
        assert_eq!(audio.channel_position_ms(1), None);
        assert_eq!(audio.sound_length_ms(0), None);
    }

    #[test]
    fn test_position_advances_with_updates() {
        let (mut audio, sound) = with_sound(1, 1000);
        let ch = audio.play_sound(sound).unwrap();
        audio.update();
        audio.update();
        let position = audio.channel_position_ms(ch).unwrap();
        assert!((position - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_pause_keeps_channel_claimed() {
        let (mut audio, sound) = with_sound(2, 1000);
        let ch = audio.play_sound(sound).unwrap();
        audio.set_channel_paused(ch, true).unwrap();
        audio.update();

        assert_eq!(audio.is_channel_paused(ch), Some(true));
        assert_eq!(audio.play_sound(sound), Some(1));
    }

    #[test]
    fn test_stop_all_frees_pool() {
        let (mut audio, sound) = with_sound(3, 1000);
        for _ in 0..3 {
            audio.play_sound(sound);
        }
        audio.stop_all();
        assert!((0..3).all(|ch| !audio.is_channel_playing(ch)));
        assert_eq!(audio.play_sound(sound), Some(0));
    }

    #[test]
    fn test_missing_file_not_added() {
        let mut audio = component(1);
        assert_eq!(audio.add_sound("/no/such/file.wav"), None);
        assert_eq!(audio.num_sounds(), 0);
    }

    #[test]
    fn test_semitone_ratio() {
        assert!((semitones_to_ratio(0.0) - 1.0).abs() < 1e-6);
        assert!((semitones_to_ratio(7.0) - 1.498_307).abs() < 1e-4);
    }
}
