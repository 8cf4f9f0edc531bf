use crate::dsp::filter::SVFilter;
use crate::effect::params::{expect_float, LOWPASS};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/// Lowpass settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lowpass {
    /// Hz
    pub cutoff: f32,
    /// Q; 1 is flat-ish, 10 rings
    pub resonance: f32,
}

impl Default for Lowpass {
    fn default() -> Self {
        Self {
            cutoff: LOWPASS[0].default,
            resonance: LOWPASS[1].default,
        }
    }
}

impl Lowpass {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.cutoff, self.resonance]
    }
}

/// Resonant 12 dB/octave lowpass.
pub struct LowpassUnit {
    filter: SVFilter,
    sample_rate: f32,
}

impl LowpassUnit {
    pub fn new(sample_rate: f32) -> Self {
        let defaults = Lowpass::default();
        Self {
            filter: SVFilter::lowpass(defaults.cutoff).with_q(defaults.resonance),
            sample_rate,
        }
    }
}

impl DspUnit for LowpassUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Lowpass
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Lowpass, index, value)?;
        match index {
            0 => self.filter.set_cutoff(v),
            _ => self.filter.set_q(v),
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        match index {
            0 => Some(ParamValue::Float(self.filter.cutoff_hz)),
            1 => Some(ParamValue::Float(self.filter.q)),
            _ => None,
        }
    }

    fn process(&mut self, buffer: &mut [f32]) {
        self.filter.render(buffer, self.sample_rate);
    }

    fn reset(&mut self) {
        self.filter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_cutoff_attenuates_high_tone() {
        let mut unit = LowpassUnit::new(48_000.0);
        unit.set_parameter(0, ParamValue::Float(200.0)).unwrap();

        let mut buffer: Vec<f32> = (0..2048)
            .map(|n| (TAU * 8_000.0 * n as f32 / 48_000.0).sin())
            .collect();
        unit.process(&mut buffer);

        let peak = buffer[512..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak < 0.01, "peak = {}", peak);
    }

    #[test]
    fn test_parameters_reported() {
        let mut unit = LowpassUnit::new(48_000.0);
        unit.set_parameter(1, ParamValue::Float(4.0)).unwrap();
        assert_eq!(unit.parameter(1), Some(ParamValue::Float(4.0)));
        assert_eq!(unit.parameter(0), Some(ParamValue::Float(5000.0)));
    }
}
