use crate::dsp::dynamics::{compressor_gain_db, EnvelopeFollower};
use crate::dsp::mix::db_to_linear;
use crate::effect::params::{expect_bool, expect_float, COMPRESSOR};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/// Compressor settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    /// dB
    pub threshold: f32,
    pub ratio: f32,
    /// ms
    pub attack: f32,
    /// ms
    pub release: f32,
    /// dB
    pub makeup_gain: f32,
    pub linked: bool,
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            threshold: COMPRESSOR[0].default,
            ratio: COMPRESSOR[1].default,
            attack: COMPRESSOR[2].default,
            release: COMPRESSOR[3].default,
            makeup_gain: COMPRESSOR[4].default,
            linked: COMPRESSOR[5].default != 0.0,
        }
    }
}

impl Compressor {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![
            self.threshold,
            self.ratio,
            self.attack,
            self.release,
            self.makeup_gain,
            self.linked as i32 as f32,
        ]
    }
}

/// Downward compressor with a peak envelope follower.
///
/// Channels are mono, so `linked` is stored and reported but changes nothing.
pub struct CompressorUnit {
    settings: Compressor,
    follower: EnvelopeFollower,
    sample_rate: f32,
}

impl CompressorUnit {
    pub fn new(sample_rate: f32) -> Self {
        let settings = Compressor::default();
        Self {
            follower: EnvelopeFollower::new(settings.attack, settings.release, sample_rate),
            settings,
            sample_rate,
        }
    }
}

impl DspUnit for CompressorUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Compressor
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        if index == 5 {
            self.settings.linked = expect_bool(DspType::Compressor, index, value)?;
            return Ok(());
        }

        let v = expect_float(DspType::Compressor, index, value)?;
        match index {
            0 => self.settings.threshold = v,
            1 => self.settings.ratio = v,
            2 => {
                self.settings.attack = v;
                self.follower.set_attack(v, self.sample_rate);
            }
            3 => {
                self.settings.release = v;
                self.follower.set_release(v, self.sample_rate);
            }
            _ => self.settings.makeup_gain = v,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        let s = &self.settings;
        Some(match index {
            0 => ParamValue::Float(s.threshold),
            1 => ParamValue::Float(s.ratio),
            2 => ParamValue::Float(s.attack),
            3 => ParamValue::Float(s.release),
            4 => ParamValue::Float(s.makeup_gain),
            5 => ParamValue::Bool(s.linked),
            _ => return None,
        })
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let makeup = db_to_linear(self.settings.makeup_gain);

        for sample in buffer.iter_mut() {
            let level = self.follower.process(*sample);
            let reduction =
                compressor_gain_db(level, self.settings.threshold, self.settings.ratio);
            *sample *= 10.0_f32.powf(reduction / 20.0) * makeup;
        }
    }

    fn reset(&mut self) {
        self.follower.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loud_block(unit: &mut CompressorUnit) -> f32 {
        let mut buffer = vec![0.9; 48_000];
        unit.process(&mut buffer);
        buffer[47_999]
    }

    #[test]
    fn test_default_threshold_leaves_quiet_signal() {
        let mut unit = CompressorUnit::new(48_000.0);
        let out = loud_block(&mut unit);
        assert!((out - 0.9).abs() < 1e-3, "out = {}", out);
    }

    #[test]
    fn test_threshold_reduces_level() {
        let mut unit = CompressorUnit::new(48_000.0);
        unit.set_parameter(0, ParamValue::Float(-20.0)).unwrap();
        unit.set_parameter(1, ParamValue::Float(10.0)).unwrap();

        let out = loud_block(&mut unit);
        // 0.9 ≈ -0.9 dB, 19.1 dB over → ~17.2 dB reduction
        assert!(out < 0.15, "out = {}", out);
    }

    #[test]
    fn test_makeup_gain_boosts() {
        let mut unit = CompressorUnit::new(48_000.0);
        unit.set_parameter(4, ParamValue::Float(6.0)).unwrap();
        let mut buffer = vec![0.1; 16];
        unit.process(&mut buffer);
        assert!((buffer[15] - 0.1995).abs() < 1e-3);
    }

    #[test]
    fn test_linked_is_bool() {
        let mut unit = CompressorUnit::new(48_000.0);
        assert!(unit.set_parameter(5, ParamValue::Float(1.0)).is_err());
        unit.set_parameter(5, ParamValue::Bool(false)).unwrap();
        assert_eq!(unit.parameter(5), Some(ParamValue::Bool(false)));
    }
}
