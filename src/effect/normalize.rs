use crate::dsp::dynamics::EnvelopeFollower;
use crate::effect::params::{expect_float, NORMALIZE};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Normalize
=========

Amplifies the signal toward full scale based on the recent peak level.

    gain = min(1 / max(peak, threshold), maxamp)

The peak jumps up instantly and falls back over `fadetime`, so gain rises
slowly after a loud passage. `threshold` stops near-silence from being
boosted into noise, and `maxamp` caps the gain outright.
*/

/// Normalize settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    /// ms
    pub fade_time: f32,
    /// Lowest peak (linear) that is amplified to full scale
    pub threshold: f32,
    /// Largest gain (linear)
    pub max_amp: f32,
}

impl Default for Normalize {
    fn default() -> Self {
        Self {
            fade_time: NORMALIZE[0].default,
            threshold: NORMALIZE[1].default,
            max_amp: NORMALIZE[2].default,
        }
    }
}

impl Normalize {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.fade_time, self.threshold, self.max_amp]
    }
}

pub struct NormalizeUnit {
    settings: Normalize,
    follower: EnvelopeFollower,
    sample_rate: f32,
}

impl NormalizeUnit {
    pub fn new(sample_rate: f32) -> Self {
        let settings = Normalize::default();
        Self {
            follower: EnvelopeFollower::new(0.0, settings.fade_time, sample_rate),
            settings,
            sample_rate,
        }
    }
}

impl DspUnit for NormalizeUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Normalize
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Normalize, index, value)?;
        match index {
            0 => {
                self.settings.fade_time = v;
                self.follower.set_release(v, self.sample_rate);
            }
            1 => self.settings.threshold = v,
            _ => self.settings.max_amp = v,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        self.settings.values().get(index).copied().map(ParamValue::Float)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        // A zero threshold still needs a floor to divide by
        let floor = self.settings.threshold.max(1e-6);

        for sample in buffer.iter_mut() {
            let peak = self.follower.process(*sample).max(floor);
            *sample *= (1.0 / peak).min(self.settings.max_amp);
        }
    }

    fn reset(&mut self) {
        self.follower.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_signal_raised_to_full_scale() {
        let mut unit = NormalizeUnit::new(48_000.0);
        let mut buffer = vec![0.25; 64];
        unit.process(&mut buffer);
        assert!((buffer[63] - 1.0).abs() < 1e-4, "got {}", buffer[63]);
    }

    #[test]
    fn test_gain_capped_by_max_amp() {
        let mut unit = NormalizeUnit::new(48_000.0);
        unit.set_parameter(1, ParamValue::Float(0.0)).unwrap();
        unit.set_parameter(2, ParamValue::Float(2.0)).unwrap();

        let mut buffer = vec![0.01; 16];
        unit.process(&mut buffer);
        assert!((buffer[15] - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_limits_boost_of_silence() {
        let mut unit = NormalizeUnit::new(48_000.0);
        // default threshold 0.1 → at most 10x
        let mut buffer = vec![0.001; 16];
        unit.process(&mut buffer);
        assert!((buffer[15] - 0.01).abs() < 1e-5);
    }
}
