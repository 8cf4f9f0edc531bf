//! Phase-accumulating oscillator shared by the modulated effects.

/*
One oscillator, two jobs
========================

The same phase accumulator drives

  - control-rate modulation (~0.1-20 Hz): tremolo gain, chorus and flange
    delay sweeps
  - audio-rate tone generation (20 Hz - 22 kHz): the oscillator unit

Phase runs from 0.0 to 1.0 and wraps; each sample advances it by
`frequency / sample_rate`. Output is bipolar (-1.0 to +1.0).

    SINE       sin(2π·phase)
    SQUARE     +1 for the first half, -1 for the second
    SAW UP     rises -1 → +1, snaps down
    SAW DOWN   falls +1 → -1, snaps up
    TRIANGLE   linear up then down
    NOISE      white noise, ignores phase

Bipolar to Unipolar
-------------------

Gain-style modulation wants 0 to 1:

    unipolar = (bipolar + 1.0) * 0.5
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    SawUp,
    SawDown,
    Triangle,
    Noise,
}

impl Waveform {
    /// Map the oscillator unit's integer waveform parameter.
    pub fn from_index(index: i32) -> Option<Self> {
        Some(match index {
            0 => Waveform::Sine,
            1 => Waveform::Square,
            2 => Waveform::SawUp,
            3 => Waveform::SawDown,
            4 => Waveform::Triangle,
            5 => Waveform::Noise,
            _ => return None,
        })
    }
}

pub struct Lfo {
    waveform: Waveform,
    phase: f32,
    noise_state: u32,
}

impl Lfo {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise_state: 0x9E37_79B9,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Start from `phase` (wrapped into 0..1).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.rem_euclid(1.0);
    }

    /// Current value without advancing.
    #[inline]
    pub fn value(&mut self) -> f32 {
        let p = self.phase;
        match self.waveform {
            Waveform::Sine => (TAU * p).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::SawUp => 2.0 * p - 1.0,
            Waveform::SawDown => 1.0 - 2.0 * p,
            Waveform::Triangle => {
                if p < 0.5 {
                    4.0 * p - 1.0
                } else {
                    3.0 - 4.0 * p
                }
            }
            Waveform::Noise => self.next_noise(),
        }
    }

    /// Return the current value, then advance by one sample.
    #[inline]
    pub fn next(&mut self, frequency_hz: f32, sample_rate: f32) -> f32 {
        let out = self.value();
        self.advance(frequency_hz / sample_rate);
        out
    }

    #[inline]
    pub fn advance(&mut self, increment: f32) {
        self.phase += increment;
        if self.phase >= 1.0 || self.phase < 0.0 {
            self.phase = self.phase.rem_euclid(1.0);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    // xorshift32
    #[inline]
    fn next_noise(&mut self) -> f32 {
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}
