use std::sync::Arc;

use crate::dsp::mix::pan_gains;
use crate::effect::DspUnit;
use crate::engine::Sound;

/// One playback channel inside the mixer.
///
/// `generation` increases every time the voice starts a new sound, so a
/// handle from an earlier play no longer matches.
pub(crate) struct Voice {
    sound: Option<Arc<Sound>>,
    generation: u32,
    cursor: f64,
    paused: bool,
    volume: f32,
    pan: f32,
    pitch: f32,
    dsps: Vec<Box<dyn DspUnit>>,
}

impl Voice {
    pub fn new() -> Self {
        Self {
            sound: None,
            generation: 0,
            cursor: 0.0,
            paused: false,
            volume: 1.0,
            pan: 0.0,
            pitch: 1.0,
            dsps: Vec::new(),
        }
    }

    /// Start `sound` from the top with neutral controls and an empty chain.
    /// Returns the new generation.
    pub fn start(&mut self, sound: Arc<Sound>, paused: bool) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.sound = Some(sound);
        self.cursor = 0.0;
        self.paused = paused;
        self.volume = 1.0;
        self.pan = 0.0;
        self.pitch = 1.0;
        self.dsps.clear();
        self.generation
    }

    pub fn stop(&mut self) {
        self.sound = None;
        self.paused = false;
    }

    /// Playing, including paused.
    pub fn is_active(&self) -> bool {
        self.sound.is_some()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.max(0.0);
    }

    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn set_pan(&mut self, pan: f32) {
        self.pan = pan.clamp(-1.0, 1.0);
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.max(0.0);
    }

    /// Playback position in milliseconds of source time.
    pub fn position_ms(&self) -> f32 {
        match &self.sound {
            Some(sound) => (self.cursor * 1000.0 / sound.sample_rate() as f64) as f32,
            None => 0.0,
        }
    }

    pub fn add_dsp(&mut self, dsp: Box<dyn DspUnit>) {
        self.dsps.push(dsp);
    }

    pub fn dsp_count(&self) -> usize {
        self.dsps.len()
    }

    pub fn clear_dsps(&mut self) {
        self.dsps.clear();
    }

    /// Read the next `buffer.len()` frames into `buffer`, run the DSP chain
    /// over them and add the result into `left`/`right` with volume and pan.
    ///
    /// Stops the voice once the read cursor passes the end of the sound.
    pub fn mix_into(
        &mut self,
        buffer: &mut [f32],
        left: &mut [f32],
        right: &mut [f32],
        out_rate: f32,
    ) {
        if self.paused {
            return;
        }
        let Some(sound) = self.sound.as_ref() else {
            return;
        };

        let samples = sound.samples();
        let len = samples.len();
        let step = self.pitch as f64 * sound.sample_rate() as f64 / out_rate as f64;
        let mut finished = false;

        // Linear interpolation between neighbouring source frames
        for out in buffer.iter_mut() {
            let whole = self.cursor as usize;
            if whole >= len {
                *out = 0.0;
                finished = true;
                continue;
            }
            let frac = (self.cursor - whole as f64) as f32;
            let a = samples[whole];
            let b = samples.get(whole + 1).copied().unwrap_or(0.0);
            *out = a + (b - a) * frac;
            self.cursor += step;
        }

        for dsp in &mut self.dsps {
            dsp.process(buffer);
        }

        let (gain_l, gain_r) = pan_gains(self.pan);
        let gain_l = gain_l * self.volume;
        let gain_r = gain_r * self.volume;
        for ((s, l), r) in buffer.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            *l += s * gain_l;
            *r += s * gain_r;
        }

        if finished || self.cursor as usize >= len {
            self.stop();
        }
    }
}
