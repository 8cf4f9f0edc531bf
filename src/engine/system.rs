use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, RingBuffer};

use crate::config::{AudioConfig, OutputMode};
use crate::effect::DspUnit;
use crate::engine::mixer::Mixer;
use crate::engine::output::{DeviceOutput, Output};
use crate::engine::{ChannelHandle, Sound, SoundHandle};
use crate::error::AudioResult;
use crate::MAX_BLOCK_SIZE;

/// The audio engine: sound table, channel pool and output.
///
/// Channel operations take a [`ChannelHandle`]. Once the channel stops (or is
/// reused for another sound) the handle goes stale: `is_playing` answers
/// `false` and every other call fails with `InvalidHandle`.
pub struct System {
    mixer: Arc<Mutex<Mixer>>,
    output: Output,
    sample_rate: u32,
    #[cfg(feature = "rtrb")]
    scope: Option<Consumer<f32>>,
}

impl System {
    pub fn new(config: AudioConfig) -> AudioResult<Self> {
        // Fields are public, so a struct literal can bypass the builder clamps
        let block_size = config.block_size.clamp(1, MAX_BLOCK_SIZE);

        let device = match config.output {
            OutputMode::Device => Some(DeviceOutput::open()?),
            OutputMode::NoSound => None,
        };
        let sample_rate = device
            .as_ref()
            .map(DeviceOutput::sample_rate)
            .unwrap_or(config.sample_rate)
            .max(1);

        #[allow(unused_mut)]
        let mut mixer = Mixer::new(config.num_channels, sample_rate as f32);

        #[cfg(feature = "rtrb")]
        let scope = {
            let (producer, consumer) = RingBuffer::new(config.scope_capacity.max(1));
            mixer.set_scope(producer);
            Some(consumer)
        };

        let mixer = Arc::new(Mutex::new(mixer));
        let output = match device {
            Some(device) => {
                log::info!(
                    "output: default device, {} Hz, {} channels",
                    sample_rate,
                    device.channels()
                );
                Output::Device {
                    _stream: device.start(mixer.clone())?,
                }
            }
            None => {
                log::info!("output: no sound, {} Hz", sample_rate);
                Output::no_sound(block_size)
            }
        };

        Ok(Self {
            mixer,
            output,
            sample_rate,
            #[cfg(feature = "rtrb")]
            scope,
        })
    }

    fn mixer(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Output rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.mixer().num_voices()
    }

    /// Channels currently playing (paused ones included).
    pub fn active_channels(&self) -> usize {
        self.mixer().active_voices()
    }

    /// Frames mixed since start.
    pub fn frames_mixed(&self) -> u64 {
        self.mixer().frames_mixed()
    }

    /// Scope samples thrown away because the ring was full.
    #[cfg(feature = "rtrb")]
    pub fn scope_dropped(&self) -> u64 {
        self.mixer().scope_dropped()
    }

    /// Pump the engine once. Without a device this mixes one block.
    pub fn update(&mut self) -> AudioResult<()> {
        match &mut self.output {
            Output::Device { .. } => {}
            Output::NoSound { block } => {
                self.mixer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .render(block, 2);
            }
        }
        Ok(())
    }

    /// Mix straight into `out` (interleaved, `channels` per frame), e.g. for
    /// offline bouncing.
    pub fn render(&self, out: &mut [f32], channels: usize) {
        self.mixer().render(out, channels);
    }

    /// Hand the scope ring's reader to a visualizer. Only the first call
    /// gets it.
    #[cfg(feature = "rtrb")]
    pub fn take_scope(&mut self) -> Option<Consumer<f32>> {
        self.scope.take()
    }

    // --- Sounds ---

    pub fn create_sound(&self, path: impl AsRef<Path>) -> AudioResult<SoundHandle> {
        let sound = Sound::load(path)?;
        Ok(self.add_sound(sound))
    }

    pub fn add_sound(&self, sound: Sound) -> SoundHandle {
        self.mixer().add_sound(sound)
    }

    pub fn num_sounds(&self) -> usize {
        self.mixer().num_sounds()
    }

    pub fn sound_length_ms(&self, sound: SoundHandle) -> AudioResult<f32> {
        Ok(self.mixer().sound(sound)?.length_ms())
    }

    // --- Channels ---

    pub fn play_sound(&self, sound: SoundHandle, paused: bool) -> AudioResult<ChannelHandle> {
        self.mixer().play(sound, paused)
    }

    pub fn is_playing(&self, channel: ChannelHandle) -> AudioResult<bool> {
        Ok(self.mixer().is_playing(channel))
    }

    pub fn stop(&self, channel: ChannelHandle) -> AudioResult<()> {
        self.mixer().voice_mut(channel)?.stop();
        Ok(())
    }

    pub fn stop_all(&self) {
        self.mixer().stop_all();
    }

    pub fn set_paused(&self, channel: ChannelHandle, paused: bool) -> AudioResult<()> {
        self.mixer().voice_mut(channel)?.set_paused(paused);
        Ok(())
    }

    pub fn paused(&self, channel: ChannelHandle) -> AudioResult<bool> {
        Ok(self.mixer().voice(channel)?.paused())
    }

    pub fn set_volume(&self, channel: ChannelHandle, volume: f32) -> AudioResult<()> {
        self.mixer().voice_mut(channel)?.set_volume(volume);
        Ok(())
    }

    pub fn volume(&self, channel: ChannelHandle) -> AudioResult<f32> {
        Ok(self.mixer().voice(channel)?.volume())
    }

    pub fn set_pan(&self, channel: ChannelHandle, pan: f32) -> AudioResult<()> {
        self.mixer().voice_mut(channel)?.set_pan(pan);
        Ok(())
    }

    pub fn pan(&self, channel: ChannelHandle) -> AudioResult<f32> {
        Ok(self.mixer().voice(channel)?.pan())
    }

    /// Playback rate multiplier; 2.0 is an octave up.
    pub fn set_pitch(&self, channel: ChannelHandle, pitch: f32) -> AudioResult<()> {
        self.mixer().voice_mut(channel)?.set_pitch(pitch);
        Ok(())
    }

    pub fn pitch(&self, channel: ChannelHandle) -> AudioResult<f32> {
        Ok(self.mixer().voice(channel)?.pitch())
    }

    /// Position in the sound, in milliseconds.
    pub fn position(&self, channel: ChannelHandle) -> AudioResult<f32> {
        Ok(self.mixer().voice(channel)?.position_ms())
    }

    /// Append `dsp` to the end of the channel's chain.
    pub fn add_dsp(&self, channel: ChannelHandle, dsp: Box<dyn DspUnit>) -> AudioResult<()> {
        self.mixer().add_dsp(channel, dsp)
    }

    pub fn dsp_count(&self, channel: ChannelHandle) -> AudioResult<usize> {
        Ok(self.mixer().voice(channel)?.dsp_count())
    }

    pub fn clear_dsps(&self, channel: ChannelHandle) -> AudioResult<()> {
        self.mixer().voice_mut(channel)?.clear_dsps();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{create_dsp, DspType};
    use crate::error::AudioError;

    fn system(channels: usize) -> System {
        let config = AudioConfig::new()
            .channels(channels)
            .sample_rate(1000)
            .block_size(10)
            .output(OutputMode::NoSound);
        System::new(config).unwrap()
    }

    fn tone(len: usize) -> Sound {
        Sound::from_samples("tone", vec![0.5; len], 1000)
    }

    #[test]
    fn test_update_mixes_one_block() {
        let mut system = system(2);
        let sound = system.add_sound(tone(100));
        let ch = system.play_sound(sound, false).unwrap();

        system.update().unwrap();
        assert_eq!(system.frames_mixed(), 10);
        assert!((system.position(ch).unwrap() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_sound_ends_after_enough_updates() {
        let mut system = system(2);
        let sound = system.add_sound(tone(25));
        let ch = system.play_sound(sound, false).unwrap();

        for _ in 0..3 {
            system.update().unwrap();
        }
        assert!(!system.is_playing(ch).unwrap());
        assert!(matches!(
            system.volume(ch),
            Err(AudioError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn test_play_resets_controls() {
        let system = system(1);
        let sound = system.add_sound(tone(100));
        let ch = system.play_sound(sound, false).unwrap();
        system.set_volume(ch, 2.0).unwrap();
        system.set_pitch(ch, 1.5).unwrap();
        system.add_dsp(ch, create_dsp(DspType::Chorus, 1000.0)).unwrap();
        system.stop(ch).unwrap();

        let ch = system.play_sound(sound, false).unwrap();
        assert_eq!(system.volume(ch).unwrap(), 1.0);
        assert_eq!(system.pitch(ch).unwrap(), 1.0);
        assert_eq!(system.pan(ch).unwrap(), 0.0);
        assert_eq!(system.dsp_count(ch).unwrap(), 0);
    }

    #[test]
    fn test_paused_channel_keeps_playing_state() {
        let mut system = system(1);
        let sound = system.add_sound(tone(100));
        let ch = system.play_sound(sound, true).unwrap();

        system.update().unwrap();
        assert!(system.is_playing(ch).unwrap());
        assert!(system.paused(ch).unwrap());
        assert_eq!(system.position(ch).unwrap(), 0.0);
    }

    #[test]
    fn test_dsp_chain_appends() {
        let system = system(1);
        let sound = system.add_sound(tone(100));
        let ch = system.play_sound(sound, false).unwrap();

        system.add_dsp(ch, create_dsp(DspType::Fader, 1000.0)).unwrap();
        system.add_dsp(ch, create_dsp(DspType::Echo, 1000.0)).unwrap();
        assert_eq!(system.dsp_count(ch).unwrap(), 2);

        system.clear_dsps(ch).unwrap();
        assert_eq!(system.dsp_count(ch).unwrap(), 0);
    }

    #[test]
    fn test_stop_all() {
        let system = system(3);
        let sound = system.add_sound(tone(100));
        for _ in 0..3 {
            system.play_sound(sound, false).unwrap();
        }
        assert_eq!(system.active_channels(), 3);

        system.stop_all();
        assert_eq!(system.active_channels(), 0);
    }

    #[test]
    fn test_literal_config_is_clamped() {
        let config = AudioConfig {
            sample_rate: 0,
            block_size: 0,
            ..AudioConfig::new().output(OutputMode::NoSound)
        };
        let mut system = System::new(config).unwrap();
        assert_eq!(system.sample_rate(), 1);

        let sound = system.add_sound(tone(100));
        system.play_sound(sound, false).unwrap();
        system.update().unwrap();
        assert_eq!(system.frames_mixed(), 1);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn test_scope_taken_once() {
        let mut system = system(1);
        assert!(system.take_scope().is_some());
        assert!(system.take_scope().is_none());
    }
}
