use crate::dsp::pitch::PitchShifter;
use crate::effect::params::{expect_float, PITCH_SHIFT};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;

/// Pitch shift settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchShift {
    /// Ratio; 0.5 is an octave down, 2.0 an octave up
    pub pitch: f32,
    /// Analysis window in samples
    pub fft_size: f32,
}

impl Default for PitchShift {
    fn default() -> Self {
        Self {
            pitch: PITCH_SHIFT[0].default,
            fft_size: PITCH_SHIFT[1].default,
        }
    }
}

impl PitchShift {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.pitch, self.fft_size]
    }
}

/// Shifts pitch without changing duration. `fftsize` sets the window of the
/// time-domain shifter.
pub struct PitchShiftUnit {
    shifter: PitchShifter,
    fft_size: f32,
}

impl PitchShiftUnit {
    pub fn new() -> Self {
        let defaults = PitchShift::default();
        Self {
            shifter: PitchShifter::new(defaults.fft_size as usize),
            fft_size: defaults.fft_size,
        }
    }
}

impl Default for PitchShiftUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl DspUnit for PitchShiftUnit {
    fn dsp_type(&self) -> DspType {
        DspType::PitchShift
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        let v = expect_float(DspType::PitchShift, index, value)?;
        match index {
            0 => self.shifter.set_ratio(v),
            _ => {
                self.fft_size = v;
                self.shifter.set_window(v.round() as usize);
            }
        }
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        match index {
            0 => Some(ParamValue::Float(self.shifter.ratio())),
            1 => Some(ParamValue::Float(self.fft_size)),
            _ => None,
        }
    }

    fn process(&mut self, buffer: &mut [f32]) {
        self.shifter.render(buffer);
    }

    fn reset(&mut self) {
        self.shifter.reset();
    }
}
