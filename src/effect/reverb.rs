use crate::dsp::delay::DelayLine;
use crate::dsp::mix::db_to_linear;
use crate::dsp::reverb::SchroederReverb;
use crate::effect::params::{expect_float, REVERB};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Reverb
======

    input ──┬───────────────────────────── × dry ──┐
            │                                      ├──► output
            └─► pre-delay ─► Schroeder tank ─ × wet┘

  decaytime     (100 - 20000 ms)  RT60 of the comb tank
  earlydelay    (0 - 300 ms)      gap before the tail starts
  hfdecayratio  (10 - 100 %)      high-frequency decay relative to low;
                                  100 keeps highs ringing, 10 dulls them fast
  diffusion     (0 - 100 %)       allpass smearing
  wetlevel      (-80 - 20 dB)
  drylevel      (-80 - 20 dB)
*/

const MAX_EARLY_DELAY_MS: f32 = 300.0;

/// Reverb settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reverb {
    pub decay_time: f32,
    pub early_delay: f32,
    pub hf_decay_ratio: f32,
    pub diffusion: f32,
    pub wet_level: f32,
    pub dry_level: f32,
}

impl Default for Reverb {
    fn default() -> Self {
        Self {
            decay_time: REVERB[0].default,
            early_delay: REVERB[1].default,
            hf_decay_ratio: REVERB[2].default,
            diffusion: REVERB[3].default,
            wet_level: REVERB[4].default,
            dry_level: REVERB[5].default,
        }
    }
}

impl Reverb {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![
            self.decay_time,
            self.early_delay,
            self.hf_decay_ratio,
            self.diffusion,
            self.wet_level,
            self.dry_level,
        ]
    }
}

pub struct ReverbUnit {
    settings: Reverb,
    tank: SchroederReverb,
    pre_delay: DelayLine,
    sample_rate: f32,
}

impl ReverbUnit {
    pub fn new(sample_rate: f32) -> Self {
        let mut unit = Self {
            settings: Reverb::default(),
            tank: SchroederReverb::new(sample_rate),
            pre_delay: DelayLine::for_duration(MAX_EARLY_DELAY_MS, sample_rate),
            sample_rate,
        };
        unit.apply_tank_settings();
        unit
    }

    fn apply_tank_settings(&mut self) {
        let s = self.settings;
        self.tank.set_decay_time(s.decay_time);
        self.tank.set_damping(1.0 - s.hf_decay_ratio / 100.0);
        self.tank.set_diffusion(s.diffusion / 100.0);
    }

    fn pre_delay_samples(&self) -> usize {
        let samples = (self.settings.early_delay * self.sample_rate / 1000.0).round() as usize;
        samples.min(self.pre_delay.max_delay())
    }
}

impl DspUnit for ReverbUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Reverb
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Reverb, index, value)?;
        let s = &mut self.settings;
        match index {
            0 => s.decay_time = v,
            1 => s.early_delay = v,
            2 => s.hf_decay_ratio = v,
            3 => s.diffusion = v,
            4 => s.wet_level = v,
            _ => s.dry_level = v,
        }
        self.apply_tank_settings();
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        self.settings.values().get(index).copied().map(ParamValue::Float)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let wet = db_to_linear(self.settings.wet_level);
        let dry = db_to_linear(self.settings.dry_level);
        let delay = self.pre_delay_samples();

        for sample in buffer.iter_mut() {
            let delayed = self.pre_delay.next_sample(*sample, delay);
            let tail = self.tank.process(delayed);
            *sample = *sample * dry + tail * wet;
        }
    }

    fn reset(&mut self) {
        self.tank.reset();
        self.pre_delay.reset();
    }
}
