use crate::dsp::delay::DelayLine;
use crate::dsp::mix::db_to_linear;
use crate::effect::params::{expect_float, ECHO};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/*
Echo
====

Feedback delay:

    delayed = line[n - delay]
    out     = dry_gain · x + wet_gain · delayed
    line[n] = x + feedback · delayed

  delay     (1 - 5000 ms)
  feedback  (0 - 100 %)   share of each echo fed back; 100 % never decays
  drylevel  (-80 - 10 dB)
  wetlevel  (-80 - 10 dB)
*/

const MAX_DELAY_MS: f32 = 5000.0;

/// Echo settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Echo {
    /// ms
    pub delay: f32,
    /// %
    pub feedback: f32,
    /// dB
    pub dry_level: f32,
    /// dB
    pub wet_level: f32,
}

impl Default for Echo {
    fn default() -> Self {
        Self {
            delay: ECHO[0].default,
            feedback: ECHO[1].default,
            dry_level: ECHO[2].default,
            wet_level: ECHO[3].default,
        }
    }
}

impl Echo {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.delay, self.feedback, self.dry_level, self.wet_level]
    }
}

pub struct EchoUnit {
    settings: Echo,
    delay_line: DelayLine,
    sample_rate: f32,
}

impl EchoUnit {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            settings: Echo::default(),
            delay_line: DelayLine::for_duration(MAX_DELAY_MS, sample_rate),
            sample_rate,
        }
    }
}

impl DspUnit for EchoUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Echo
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::Echo, index, value)?;
        match index {
            0 => self.settings.delay = v,
            1 => self.settings.feedback = v,
            2 => self.settings.dry_level = v,
            _ => self.settings.wet_level = v,
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        self.settings.values().get(index).copied().map(ParamValue::Float)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        let delay = ((self.settings.delay * self.sample_rate / 1000.0) as usize).max(1);
        let feedback = self.settings.feedback / 100.0;
        let dry = db_to_linear(self.settings.dry_level);
        let wet = db_to_linear(self.settings.wet_level);

        for sample in buffer.iter_mut() {
            // The write below lands one slot later, so look back delay - 1
            let delayed = self.delay_line.read(delay - 1);
            self.delay_line.write(*sample + feedback * delayed);
            *sample = dry * *sample + wet * delayed;
        }
    }

    fn reset(&mut self) {
        self.delay_line.reset();
    }
}
