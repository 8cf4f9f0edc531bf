use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::Producer;

use crate::effect::DspUnit;
use crate::engine::voice::Voice;
use crate::engine::{ChannelHandle, Sound, SoundHandle};
use crate::error::{AudioError, AudioResult};
use crate::MAX_BLOCK_SIZE;

/*
Mixer
=====

Shared between the control side (System) and whichever backend pulls audio.
Each block:

    for every active voice:
        resample sound → mono scratch → DSP chain → volume/pan → L/R bus

    L/R bus → interleaved device frames (mono devices get the average)
    (L+R)/2 → scope ring, if a visualizer took it

Blocks are at most MAX_BLOCK_SIZE frames; longer requests are split.
*/

pub(crate) struct Mixer {
    voices: Vec<Voice>,
    sounds: Vec<Arc<Sound>>,
    sample_rate: f32,
    voice_buffer: Vec<f32>,
    left: Vec<f32>,
    right: Vec<f32>,
    frames_mixed: u64,
    #[cfg(feature = "rtrb")]
    scope: Option<Producer<f32>>,
    #[cfg(feature = "rtrb")]
    scope_dropped: u64,
}

impl Mixer {
    pub fn new(num_voices: usize, sample_rate: f32) -> Self {
        Self {
            voices: (0..num_voices).map(|_| Voice::new()).collect(),
            sounds: Vec::new(),
            sample_rate,
            voice_buffer: vec![0.0; MAX_BLOCK_SIZE],
            left: vec![0.0; MAX_BLOCK_SIZE],
            right: vec![0.0; MAX_BLOCK_SIZE],
            frames_mixed: 0,
            #[cfg(feature = "rtrb")]
            scope: None,
            #[cfg(feature = "rtrb")]
            scope_dropped: 0,
        }
    }

    #[cfg(feature = "rtrb")]
    pub fn set_scope(&mut self, producer: Producer<f32>) {
        self.scope = Some(producer);
    }

    /// Scope samples dropped because nobody drained the ring in time.
    #[cfg(feature = "rtrb")]
    pub fn scope_dropped(&self) -> u64 {
        self.scope_dropped
    }

    pub fn frames_mixed(&self) -> u64 {
        self.frames_mixed
    }

    pub fn num_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    // --- Sounds ---

    pub fn add_sound(&mut self, sound: Sound) -> SoundHandle {
        self.sounds.push(Arc::new(sound));
        SoundHandle(self.sounds.len() - 1)
    }

    pub fn sound(&self, handle: SoundHandle) -> AudioResult<&Arc<Sound>> {
        self.sounds
            .get(handle.0)
            .ok_or(AudioError::InvalidSound(handle.0))
    }

    pub fn num_sounds(&self) -> usize {
        self.sounds.len()
    }

    // --- Voices ---

    /// Start `sound` on the first free voice.
    pub fn play(&mut self, sound: SoundHandle, paused: bool) -> AudioResult<ChannelHandle> {
        let sound = self.sound(sound)?.clone();
        let in_use = self.voices.len();

        let index = self
            .voices
            .iter()
            .position(|v| !v.is_active())
            .ok_or(AudioError::NoFreeChannels(in_use))?;

        let generation = self.voices[index].start(sound, paused);
        Ok(ChannelHandle { index, generation })
    }

    /// The voice behind `handle`, if it is still playing that sound.
    pub fn voice(&self, handle: ChannelHandle) -> AudioResult<&Voice> {
        self.voices
            .get(handle.index)
            .filter(|v| v.generation() == handle.generation && v.is_active())
            .ok_or(AudioError::InvalidHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    pub fn voice_mut(&mut self, handle: ChannelHandle) -> AudioResult<&mut Voice> {
        self.voices
            .get_mut(handle.index)
            .filter(|v| v.generation() == handle.generation && v.is_active())
            .ok_or(AudioError::InvalidHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    pub fn is_playing(&self, handle: ChannelHandle) -> bool {
        self.voice(handle).is_ok()
    }

    pub fn add_dsp(&mut self, handle: ChannelHandle, dsp: Box<dyn DspUnit>) -> AudioResult<()> {
        self.voice_mut(handle)?.add_dsp(dsp);
        Ok(())
    }

    pub fn stop_all(&mut self) {
        for voice in &mut self.voices {
            voice.stop();
        }
    }

    // --- Rendering ---

    /// Mix `frames` frames (at most `MAX_BLOCK_SIZE`) into the stereo bus.
    fn mix_block(&mut self, frames: usize) {
        let left = &mut self.left[..frames];
        let right = &mut self.right[..frames];
        left.fill(0.0);
        right.fill(0.0);

        let scratch = &mut self.voice_buffer[..frames];
        for voice in self.voices.iter_mut().filter(|v| v.is_active()) {
            voice.mix_into(scratch, left, right, self.sample_rate);
        }

        #[cfg(feature = "rtrb")]
        if let Some(scope) = self.scope.as_mut() {
            for (l, r) in left.iter().zip(right.iter()) {
                // A full ring means nobody is reading; drop the frame
                if scope.push((l + r) * 0.5).is_err() {
                    self.scope_dropped += 1;
                }
            }
        }

        self.frames_mixed += frames as u64;
    }

    /// Fill an interleaved output buffer with `channels` channels per frame.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let total_frames = out.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            self.mix_block(frames);

            let out_off = frames_written * channels;
            for i in 0..frames {
                let frame = &mut out[out_off + i * channels..out_off + (i + 1) * channels];
                if channels == 1 {
                    frame[0] = (self.left[i] + self.right[i]) * 0.5;
                } else {
                    frame[0] = self.left[i];
                    frame[1] = self.right[i];
                    frame[2..].fill(0.0);
                }
            }

            frames_written += frames;
        }
    }
}
