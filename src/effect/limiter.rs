use crate::dsp::distortion::hard_clip_buffer;
use crate::dsp::dynamics::EnvelopeFollower;
use crate::dsp::mix::db_to_linear;
use crate::effect::params::{expect_bool, expect_float, LIMITER};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/// Limiter settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limiter {
    /// ms
    pub release_time: f32,
    /// dB
    pub ceiling: f32,
    /// dB of input gain before limiting
    pub maximizer_gain: f32,
    /// Hard-clip anything that still overshoots the ceiling
    pub mode: bool,
}

impl Default for Limiter {
    fn default() -> Self {
        Self {
            release_time: LIMITER[0].default,
            ceiling: LIMITER[1].default,
            maximizer_gain: LIMITER[2].default,
            mode: LIMITER[3].default != 0.0,
        }
    }
}

impl Limiter {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![
            self.release_time,
            self.ceiling,
            self.maximizer_gain,
            self.mode as i32 as f32,
        ]
    }
}

/// Peak limiter: instant attack, configurable release.
pub struct LimiterUnit {
    settings: Limiter,
    follower: EnvelopeFollower,
    sample_rate: f32,
}

impl LimiterUnit {
    pub fn new(sample_rate: f32) -> Self {
        let settings = Limiter::default();
        Self {
            follower: EnvelopeFollower::new(0.0, settings.release_time, sample_rate),
            settings,
            sample_rate,
        }
    }
}

impl DspUnit for LimiterUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Limiter
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        if index == 3 {
            self.settings.mode = expect_bool(DspType::Limiter, index, value)?;
            return Ok(());
        }

        let v = expect_float(DspType::Limiter, index, value)?;
        match index {
            0 => {
                self.settings.release_time = v;
                self.follower.set_release(v, self.sample_rate);
            }
            1 => self.settings.ceiling = v,
            _ => self.settings.maximizer_gain = v,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        let s = &self.settings;
        Some(match index {
            0 => ParamValue::Float(s.release_time),
            1 => ParamValue::Float(s.ceiling),
            2 => ParamValue::Float(s.maximizer_gain),
            3 => ParamValue::Bool(s.mode),
            _ => return None,
        })
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let input_gain = db_to_linear(self.settings.maximizer_gain);
        let ceiling = db_to_linear(self.settings.ceiling);

        for sample in buffer.iter_mut() {
            let driven = *sample * input_gain;
            let level = self.follower.process(driven);
            let gain = if level > ceiling { ceiling / level } else { 1.0 };
            *sample = driven * gain;
        }

        if self.settings.mode {
            hard_clip_buffer(buffer, 1.0, ceiling);
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
    fn test_peaks_held_at_ceiling() {
        let mut unit = LimiterUnit::new(48_000.0);
        unit.set_parameter(1, ParamValue::Float(-6.0)).unwrap();

        let mut buffer: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.07).sin()).collect();
        unit.process(&mut buffer);

        let ceiling = db_to_linear(-6.0);
        assert!(buffer.iter().all(|s| s.abs() <= ceiling + 1e-5));
    }

    #[test]
    fn test_quiet_signal_untouched() {
        let mut unit = LimiterUnit::new(48_000.0);
        let mut buffer = vec![0.25; 32];
        unit.process(&mut buffer);
        assert!(buffer.iter().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_maximizer_gain_raises_level() {
        let mut unit = LimiterUnit::new(48_000.0);
        unit.set_parameter(2, ParamValue::Float(6.0)).unwrap();
        let mut buffer = vec![0.1; 8];
        unit.process(&mut buffer);
        assert!(buffer[7] > 0.19);
    }

    #[test]
    fn test_mode_is_bool() {
        let mut unit = LimiterUnit::new(48_000.0);
        unit.set_parameter(3, ParamValue::Bool(true)).unwrap();
        assert_eq!(unit.parameter(3), Some(ParamValue::Bool(true)));
        assert!(unit.set_parameter(3, ParamValue::Int(1)).is_err());
    }
}
