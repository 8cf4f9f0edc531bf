use crate::dsp::lfo::{Lfo, Waveform};
use crate::effect::params::{expect_float, expect_int, OSCILLATOR};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/// Oscillator settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// 0 sine, 1 square, 2 saw up, 3 saw down, 4 triangle, 5 noise
    pub waveform: i32,
    /// Hz
    pub rate: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            waveform: OSCILLATOR[0].default as i32,
            rate: OSCILLATOR[1].default,
        }
    }
}

impl Oscillator {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.waveform as f32, self.rate]
    }
}

/// Tone generator. Replaces whatever reaches it in the chain.
pub struct OscillatorUnit {
    osc: Lfo,
    rate: f32,
    sample_rate: f32,
}

impl OscillatorUnit {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            osc: Lfo::sine(),
            rate: Oscillator::default().rate,
            sample_rate,
        }
    }
}

impl DspUnit for OscillatorUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Oscillator
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        if index == 0 {
            let index = expect_int(DspType::Oscillator, 0, value)?;
            if let Some(waveform) = Waveform::from_index(index) {
                self.osc.set_waveform(waveform);
            }
            return Ok(());
        }

        self.rate = expect_float(DspType::Oscillator, index, value)?;
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        match index {
            0 => Some(ParamValue::Int(self.osc.waveform() as i32)),
            1 => Some(ParamValue::Float(self.rate)),
            _ => None,
        }
    }

    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.osc.next(self.rate, self.sample_rate);
        }
    }

    fn reset(&mut self) {
        self.osc.reset();
    }
}
