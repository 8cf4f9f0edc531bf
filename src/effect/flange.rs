use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::{bipolar_to_unipolar, Lfo};
use crate::dsp::mix::blend_dry_wet;
use crate::effect::params::{expect_float, FLANGE};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Flange
======

Like chorus, but the swept delay is very short (0 - 10 ms). Summing the dry
signal with a copy only a few milliseconds late carves a comb of notches
that moves with the LFO, giving the familiar jet sweep.

  mix    (0 - 100 %)
  depth  (0.01 - 1)    share of the 10 ms sweep range
  rate   (0 - 20 Hz)
*/

const SWEEP_MS: f32 = 10.0;

/// Flange settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flange {
    pub mix: f32,
    pub depth: f32,
    pub rate: f32,
}

impl Default for Flange {
    fn default() -> Self {
        Self {
            mix: FLANGE[0].default,
            depth: FLANGE[1].default,
            rate: FLANGE[2].default,
        }
    }
}

impl Flange {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.mix, self.depth, self.rate]
    }
}

pub struct FlangeUnit {
    settings: Flange,
    delay_line: DelayLine,
    lfo: Lfo,
    sample_rate: f32,
}

impl FlangeUnit {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            settings: Flange::default(),
            delay_line: DelayLine::for_duration(SWEEP_MS + 1.0, sample_rate),
            lfo: Lfo::sine(),
            sample_rate,
        }
    }
}

impl DspUnit for FlangeUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Flange
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Flange, index, value)?;
        match index {
            0 => self.settings.mix = v,
            1 => self.settings.depth = v,
            _ => self.settings.rate = v,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        self.settings.values().get(index).copied().map(ParamValue::Float)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let sweep = SWEEP_MS * self.sample_rate / 1000.0 * self.settings.depth;
        let mix = self.settings.mix / 100.0;

        for sample in buffer.iter_mut() {
            let position = bipolar_to_unipolar(self.lfo.next(self.settings.rate, self.sample_rate));

            self.delay_line.write(*sample);
            let wet = self.delay_line.read_interpolated(position * sweep);

            *sample = blend_dry_wet(*sample, wet, mix);
        }
    }

    fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo.reset();
    }
}
