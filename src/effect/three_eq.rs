use crate::dsp::filter::{SVFilter, BUTTERWORTH_Q};
use crate::dsp::mix::db_to_linear;
use crate::effect::params::{expect_float, expect_int, THREE_EQ};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Three-Band EQ
=============

Splits the signal at two crossover points and applies a gain to each band:

         ┌─► lowpass(lowcrossover) ────────────── × lowgain ──┐
    x ───┼─► highpass(highcrossover) ──────────── × highgain ─┼──► out
         └─► x - low - high ───────────────────── × midgain ──┘

Deriving the mid band by subtraction means all gains at 0 dB rebuild the
input exactly.

`crossoverslope` picks the steepness of the split:

    0  12 dB/octave  (one 2-pole stage)
    1  24 dB/octave  (two stages)
    2  48 dB/octave  (four stages)
*/

const MAX_STAGES: usize = 4;

/// Three-band EQ settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeEq {
    /// dB
    pub low_gain: f32,
    /// dB
    pub mid_gain: f32,
    /// dB
    pub high_gain: f32,
    /// Hz
    pub low_crossover: f32,
    /// Hz
    pub high_crossover: f32,
    /// 0, 1 or 2
    pub crossover_slope: i32,
}

impl Default for ThreeEq {
    fn default() -> Self {
        Self {
            low_gain: THREE_EQ[0].default,
            mid_gain: THREE_EQ[1].default,
            high_gain: THREE_EQ[2].default,
            low_crossover: THREE_EQ[3].default,
            high_crossover: THREE_EQ[4].default,
            crossover_slope: THREE_EQ[5].default as i32,
        }
    }
}

impl ThreeEq {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![
            self.low_gain,
            self.mid_gain,
            self.high_gain,
            self.low_crossover,
            self.high_crossover,
            self.crossover_slope as f32,
        ]
    }
}

pub struct ThreeEqUnit {
    settings: ThreeEq,
    low: [SVFilter; MAX_STAGES],
    high: [SVFilter; MAX_STAGES],
    sample_rate: f32,
}

impl ThreeEqUnit {
    pub fn new(sample_rate: f32) -> Self {
        let settings = ThreeEq::default();
        Self {
            low: std::array::from_fn(|_| {
                SVFilter::lowpass(settings.low_crossover).with_q(BUTTERWORTH_Q)
            }),
            high: std::array::from_fn(|_| {
                SVFilter::highpass(settings.high_crossover).with_q(BUTTERWORTH_Q)
            }),
            settings,
            sample_rate,
        }
    }

    fn stages(&self) -> usize {
        1 << self.settings.crossover_slope.clamp(0, 2)
    }
}

impl DspUnit for ThreeEqUnit {
    fn dsp_type(&self) -> DspType {
        DspType::ThreeEq
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        if index == 5 {
            let slope = expect_int(DspType::ThreeEq, index, value)?;
            if slope != self.settings.crossover_slope {
                self.settings.crossover_slope = slope;
                self.reset();
            }
            return Ok(());
        }

        let v = expect_float(DspType::ThreeEq, index, value)?;
        let s = &mut self.settings;
        match index {
            0 => s.low_gain = v,
            1 => s.mid_gain = v,
            2 => s.high_gain = v,
            3 => {
                s.low_crossover = v;
                self.low.iter_mut().for_each(|f| f.set_cutoff(v));
            }
            _ => {
                s.high_crossover = v;
                self.high.iter_mut().for_each(|f| f.set_cutoff(v));
            }
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        let s = &self.settings;
        Some(match index {
            0 => ParamValue::Float(s.low_gain),
            1 => ParamValue::Float(s.mid_gain),
            2 => ParamValue::Float(s.high_gain),
            3 => ParamValue::Float(s.low_crossover),
            4 => ParamValue::Float(s.high_crossover),
            5 => ParamValue::Int(s.crossover_slope),
            _ => return None,
        })
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let stages = self.stages();
        let low_gain = db_to_linear(self.settings.low_gain);
        let mid_gain = db_to_linear(self.settings.mid_gain);
        let high_gain = db_to_linear(self.settings.high_gain);

        for sample in buffer.iter_mut() {
            let x = *sample;

            let mut low = x;
            for filter in &mut self.low[..stages] {
                low = filter.process(low, self.sample_rate);
            }

            let mut high = x;
            for filter in &mut self.high[..stages] {
                high = filter.process(high, self.sample_rate);
            }

            let mid = x - low - high;
            *sample = low * low_gain + mid * mid_gain + high * high_gain;
        }
    }

    fn reset(&mut self) {
        self.low.iter_mut().for_each(SVFilter::reset);
        self.high.iter_mut().for_each(SVFilter::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn tone(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * freq * n as f32 / 48_000.0).sin())
            .collect()
    }

    fn peak(buffer: &[f32]) -> f32 {
        buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_flat_gains_rebuild_input() {
        let mut unit = ThreeEqUnit::new(48_000.0);
        let mut buffer = tone(1000.0, 512);
        let original = buffer.clone();
        unit.process(&mut buffer);

        for (a, b) in buffer.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_low_cut_attenuates_bass() {
        let mut unit = ThreeEqUnit::new(48_000.0);
        unit.set_parameter(0, ParamValue::Float(-80.0)).unwrap();
        unit.set_parameter(5, ParamValue::Int(0)).unwrap();

        // Well below the 400 Hz crossover only the subtraction residue is left
        let mut buffer = tone(30.0, 9600);
        unit.process(&mut buffer);

        assert!(peak(&buffer[4800..]) < 0.15, "peak = {}", peak(&buffer[4800..]));
    }

    #[test]
    fn test_high_boost_lifts_treble() {
        let mut unit = ThreeEqUnit::new(48_000.0);
        unit.set_parameter(2, ParamValue::Float(6.0)).unwrap();

        let mut buffer = tone(15_000.0, 4800);
        unit.process(&mut buffer);

        assert!(peak(&buffer[2400..]) > 1.5, "peak = {}", peak(&buffer[2400..]));
    }

    #[test]
    fn test_slope_is_int() {
        let mut unit = ThreeEqUnit::new(48_000.0);
        unit.set_parameter(5, ParamValue::Int(2)).unwrap();
        assert_eq!(unit.stages(), 4);
        assert_eq!(unit.parameter(5), Some(ParamValue::Int(2)));
        assert!(unit.set_parameter(5, ParamValue::Float(2.0)).is_err());
    }
}
