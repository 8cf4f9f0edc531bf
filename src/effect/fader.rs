use crate::dsp::mix::db_to_linear;
use crate::effect::params::{expect_float, FADER};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/// Fader settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fader {
    /// dB; -80 is silence
    pub gain: f32,
}

impl Default for Fader {
    fn default() -> Self {
        Self {
            gain: FADER[0].default,
        }
    }
}

impl Fader {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.gain]
    }
}

/// Static gain stage.
pub struct FaderUnit {
    gain_db: f32,
    linear: f32,
}

impl FaderUnit {
    pub fn new() -> Self {
        let gain_db = Fader::default().gain;
        Self {
            gain_db,
            linear: db_to_linear(gain_db),
        }
    }
}

impl Default for FaderUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl DspUnit for FaderUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Fader
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        self.gain_db = expect_float(DspType::Fader, index, value)?;
        self.linear = db_to_linear(self.gain_db);
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        (index == 0).then_some(ParamValue::Float(self.gain_db))
    }

    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample *= self.linear;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minus_six_db_halves() {
        let mut unit = FaderUnit::new();
        unit.set_parameter(0, ParamValue::Float(-6.0206)).unwrap();
        let mut buffer = vec![0.8];
        unit.process(&mut buffer);
        assert!((buffer[0] - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_floor_mutes() {
        let mut unit = FaderUnit::new();
        unit.set_parameter(0, ParamValue::Float(-80.0)).unwrap();
        let mut buffer = vec![1.0, -1.0];
        unit.process(&mut buffer);
        assert_eq!(buffer, vec![0.0, -0.0]);
    }
}
