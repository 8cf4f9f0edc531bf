use std::f32::consts::TAU;

use crate::dsp::lfo::Lfo;
use crate::effect::params::{expect_float, TREMOLO};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Tremolo
=======

Periodic amplitude modulation:

    gain = 1 - depth · (1 - u)

where u runs 1 → 0 → 1 once per cycle (a raised cosine). `duty` bends the
cycle so the loud part takes `duty` of the period; 0.5 is a plain cosine,
values toward 1 hold the level up longer and make the dips short.

  frequency  (0.1 - 20 Hz)
  depth      (0 - 1)
  duty       (0 - 1)
*/

/// Tremolo settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tremolo {
    pub frequency: f32,
    pub depth: f32,
    pub duty: f32,
}

impl Default for Tremolo {
    fn default() -> Self {
        Self {
            frequency: TREMOLO[0].default,
            depth: TREMOLO[1].default,
            duty: TREMOLO[2].default,
        }
    }
}

impl Tremolo {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.frequency, self.depth, self.duty]
    }
}

/// Piecewise-linear phase warp: the first `duty` of the cycle maps onto the
/// first half of the cosine.
#[inline]
fn warp_phase(phase: f32, duty: f32) -> f32 {
    let duty = duty.clamp(0.001, 0.999);
    if phase < duty {
        0.5 * phase / duty
    } else {
        0.5 + 0.5 * (phase - duty) / (1.0 - duty)
    }
}

pub struct TremoloUnit {
    settings: Tremolo,
    lfo: Lfo,
    sample_rate: f32,
}

impl TremoloUnit {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            settings: Tremolo::default(),
            lfo: Lfo::sine(),
            sample_rate,
        }
    }

    #[inline]
    fn gain_at(&self, phase: f32) -> f32 {
        let u = 0.5 + 0.5 * (TAU * warp_phase(phase, self.settings.duty)).cos();
        1.0 - self.settings.depth * (1.0 - u)
    }
}

impl DspUnit for TremoloUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Tremolo
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Tremolo, index, value)?;
        match index {
            0 => self.settings.frequency = v,
            1 => self.settings.depth = v,
            _ => self.settings.duty = v,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        self.settings.values().get(index).copied().map(ParamValue::Float)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        // The LFO is only a phase accumulator here; the shape comes from gain_at
        let increment = self.settings.frequency / self.sample_rate;
        for sample in buffer.iter_mut() {
            *sample *= self.gain_at(self.lfo.phase());
            self.lfo.advance(increment);
        }
    }

    fn reset(&mut self) {
        self.lfo.reset();
    }
}
