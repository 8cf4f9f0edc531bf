use crate::dsp::{delay::DelayLine, lfo::Lfo, mix::blend_dry_wet};
use crate::effect::params::{expect_float, CHORUS};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Chorus
======

Mixes the dry signal with a copy delayed by ~40 ms whose delay time is swept
by a sine LFO. The moving delay detunes the copy slightly, so one voice
sounds like several.

  mix    (0 - 100 %)   wet share of the output
  rate   (0 - 20 Hz)   LFO speed; 0.5-1.5 Hz is the classic range
  depth  (0 - 100 %)   sweep as a share of the base delay; 3 % ≈ ±1.2 ms
*/

const BASE_DELAY_MS: f32 = 40.0;

/// Chorus settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chorus {
    pub mix: f32,
    pub rate: f32,
    pub depth: f32,
}

impl Default for Chorus {
    fn default() -> Self {
        Self {
            mix: CHORUS[0].default,
            rate: CHORUS[1].default,
            depth: CHORUS[2].default,
        }
    }
}

impl Chorus {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.mix, self.rate, self.depth]
    }
}

pub struct ChorusUnit {
    delay_line: DelayLine,
    lfo: Lfo,
    sample_rate: f32,
    mix: f32,   // 0..1
    rate: f32,  // Hz
    depth: f32, // 0..1
}

impl ChorusUnit {
    pub fn new(sample_rate: f32) -> Self {
        let defaults = Chorus::default();
        Self {
            // Full depth swings the delay between 0 and twice the base
            delay_line: DelayLine::for_duration(BASE_DELAY_MS * 2.0 + 1.0, sample_rate),
            lfo: Lfo::sine(),
            sample_rate,
            mix: defaults.mix / 100.0,
            rate: defaults.rate,
            depth: defaults.depth / 100.0,
        }
    }
}

impl DspUnit for ChorusUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Chorus
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Chorus, index, value)?;
        match index {
            0 => self.mix = v / 100.0,
            1 => self.rate = v,
            _ => self.depth = v / 100.0,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        let v = match index {
            0 => self.mix * 100.0,
            1 => self.rate,
            2 => self.depth * 100.0,
            _ => return None,
        };
        Some(ParamValue::Float(v))
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let base_samples = BASE_DELAY_MS * self.sample_rate / 1000.0;

        for sample in buffer.iter_mut() {
            let lfo = self.lfo.next(self.rate, self.sample_rate);
            let delay = (base_samples * (1.0 + lfo * self.depth)).max(1.0);

            let wet = self.delay_line.read_interpolated(delay);
            self.delay_line.write(*sample);

            *sample = blend_dry_wet(*sample, wet, self.mix);
        }
    }

    fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_chorus_preserves_signal() {
        let mut unit = ChorusUnit::new(48_000.0);
        unit.set_parameter(0, ParamValue::Float(0.0)).unwrap();

        let mut buffer = vec![0.3; 64];
        unit.process(&mut buffer);

        assert!(buffer.iter().all(|&s| (s - 0.3).abs() < 1e-6));
    }

    #[test]
    fn test_wet_chorus_delays_onset() {
        let mut unit = ChorusUnit::new(48_000.0);
        unit.set_parameter(0, ParamValue::Float(100.0)).unwrap();

        // Nothing arrives before the ~40ms base delay
        let mut buffer = vec![1.0; 1024];
        unit.process(&mut buffer);

        assert!(buffer.iter().all(|&s| s.abs() < 1e-6));
    }

    #[test]
    fn test_chorus_output_bounded() {
        let mut unit = ChorusUnit::new(48_000.0);
        unit.set_parameter(2, ParamValue::Float(100.0)).unwrap();
        let mut buffer: Vec<f32> = (0..8192).map(|i| (i as f32 * 0.1).sin()).collect();

        unit.process(&mut buffer);

        assert!(buffer.iter().all(|s| s.abs() <= 1.0 + 1e-6));
    }

    #[test]
    fn test_parameter_round_trips_percent() {
        let mut unit = ChorusUnit::new(48_000.0);
        unit.set_parameter(0, ParamValue::Float(25.0)).unwrap();
        assert_eq!(unit.parameter(0), Some(ParamValue::Float(25.0)));
        assert_eq!(unit.parameter(3), None);
    }
}
