//! DSP effect catalog.
//!
//! Each effect has two halves:
//!
//! - a plain settings struct (`Chorus`, `Echo`, ...) holding every parameter
//!   in table order, which is what callers build and the component validates
//! - a unit (`ChorusUnit`, `EchoUnit`, ...) implementing [`DspUnit`], which is
//!   what the engine runs inside a channel's chain
//!
//! Units are configured through the same index-addressed, kind-tagged
//! parameter interface regardless of type, so the component can set values by
//! introspecting [`ParamDesc::kind`] instead of knowing each unit.
//!
//! ```
//! use ga_audio::effect::{create_dsp, DspType, ParamValue};
//!
//! let mut unit = create_dsp(DspType::Fader, 48_000.0);
//! unit.set_parameter(0, ParamValue::Float(-6.0)).unwrap();
//!
//! let mut block = [1.0f32; 4];
//! unit.process(&mut block);
//! assert!(block[0] < 0.51);
//! ```

pub mod chorus;
pub mod compressor;
pub mod distortion;
pub mod echo;
pub mod fader;
pub mod flange;
pub mod limiter;
pub mod lowpass;
pub mod normalize;
pub mod oscillator;
pub mod params;
pub mod pitch_shift;
pub mod reverb;
pub mod three_eq;
pub mod tremolo;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::AudioResult;

pub use chorus::{Chorus, ChorusUnit};
pub use compressor::{Compressor, CompressorUnit};
pub use distortion::{Distortion, DistortionUnit};
pub use echo::{Echo, EchoUnit};
pub use fader::{Fader, FaderUnit};
pub use flange::{Flange, FlangeUnit};
pub use limiter::{Limiter, LimiterUnit};
pub use lowpass::{Lowpass, LowpassUnit};
pub use normalize::{Normalize, NormalizeUnit};
pub use oscillator::{Oscillator, OscillatorUnit};
pub use params::{check_ranges, ParamDesc, ParamKind, ParamValue, RangeViolation};
pub use pitch_shift::{PitchShift, PitchShiftUnit};
pub use reverb::{Reverb, ReverbUnit};
pub use three_eq::{ThreeEq, ThreeEqUnit};
pub use tremolo::{Tremolo, TremoloUnit};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DspType {
    Chorus,
    Compressor,
    Distortion,
    Echo,
    Fader,
    Flange,
    Limiter,
    Lowpass,
    Normalize,
    Oscillator,
    PitchShift,
    Reverb,
    ThreeEq,
    Tremolo,
}

impl DspType {
    pub const ALL: [DspType; 14] = [
        DspType::Chorus,
        DspType::Compressor,
        DspType::Distortion,
        DspType::Echo,
        DspType::Fader,
        DspType::Flange,
        DspType::Limiter,
        DspType::Lowpass,
        DspType::Normalize,
        DspType::Oscillator,
        DspType::PitchShift,
        DspType::Reverb,
        DspType::ThreeEq,
        DspType::Tremolo,
    ];

    /// Ordered parameter table for this type.
    pub fn params(self) -> &'static [ParamDesc] {
        match self {
            DspType::Chorus => params::CHORUS,
            DspType::Compressor => params::COMPRESSOR,
            DspType::Distortion => params::DISTORTION,
            DspType::Echo => params::ECHO,
            DspType::Fader => params::FADER,
            DspType::Flange => params::FLANGE,
            DspType::Limiter => params::LIMITER,
            DspType::Lowpass => params::LOWPASS,
            DspType::Normalize => params::NORMALIZE,
            DspType::Oscillator => params::OSCILLATOR,
            DspType::PitchShift => params::PITCH_SHIFT,
            DspType::Reverb => params::REVERB,
            DspType::ThreeEq => params::THREE_EQ,
            DspType::Tremolo => params::TREMOLO,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DspType::Chorus => "chorus",
            DspType::Compressor => "compressor",
            DspType::Distortion => "distortion",
            DspType::Echo => "echo",
            DspType::Fader => "fader",
            DspType::Flange => "flange",
            DspType::Limiter => "limiter",
            DspType::Lowpass => "lowpass",
            DspType::Normalize => "normalize",
            DspType::Oscillator => "oscillator",
            DspType::PitchShift => "pitch shift",
            DspType::Reverb => "reverb",
            DspType::ThreeEq => "three eq",
            DspType::Tremolo => "tremolo",
        }
    }
}

/// A processing stage in a channel's DSP chain.
///
/// Units run on the audio thread: `process` must not allocate, lock or block.
/// Parameters are addressed by their position in [`DspType::params`] and must
/// be given in the declared kind; float and int values are clamped into the
/// table range.
pub trait DspUnit: Send {
    fn dsp_type(&self) -> DspType;

    fn params(&self) -> &'static [ParamDesc] {
        self.dsp_type().params()
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()>;

    fn parameter(&self, index: usize) -> Option<ParamValue>;

    /// Process one mono block in place.
    fn process(&mut self, buffer: &mut [f32]);

    /// Clear internal state (delay lines, filter memory, LFO phase).
    fn reset(&mut self) {}
}

/// Build a unit of `dsp_type` with every parameter at its table default.
pub fn create_dsp(dsp_type: DspType, sample_rate: f32) -> Box<dyn DspUnit> {
    match dsp_type {
        DspType::Chorus => Box::new(ChorusUnit::new(sample_rate)),
        DspType::Compressor => Box::new(CompressorUnit::new(sample_rate)),
        DspType::Distortion => Box::new(DistortionUnit::new()),
        DspType::Echo => Box::new(EchoUnit::new(sample_rate)),
        DspType::Fader => Box::new(FaderUnit::new()),
        DspType::Flange => Box::new(FlangeUnit::new(sample_rate)),
        DspType::Limiter => Box::new(LimiterUnit::new(sample_rate)),
        DspType::Lowpass => Box::new(LowpassUnit::new(sample_rate)),
        DspType::Normalize => Box::new(NormalizeUnit::new(sample_rate)),
        DspType::Oscillator => Box::new(OscillatorUnit::new(sample_rate)),
        DspType::PitchShift => Box::new(PitchShiftUnit::new()),
        DspType::Reverb => Box::new(ReverbUnit::new(sample_rate)),
        DspType::ThreeEq => Box::new(ThreeEqUnit::new(sample_rate)),
        DspType::Tremolo => Box::new(TremoloUnit::new(sample_rate)),
    }
}

/// A fully specified effect request: one variant per DSP type, carrying every
/// parameter in table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Chorus(Chorus),
    Compressor(Compressor),
    Distortion(Distortion),
    Echo(Echo),
    Fader(Fader),
    Flange(Flange),
    Limiter(Limiter),
    Lowpass(Lowpass),
    Normalize(Normalize),
    Oscillator(Oscillator),
    PitchShift(PitchShift),
    Reverb(Reverb),
    ThreeEq(ThreeEq),
    Tremolo(Tremolo),
}

impl Effect {
    pub fn dsp_type(&self) -> DspType {
        match self {
            Effect::Chorus(_) => DspType::Chorus,
            Effect::Compressor(_) => DspType::Compressor,
            Effect::Distortion(_) => DspType::Distortion,
            Effect::Echo(_) => DspType::Echo,
            Effect::Fader(_) => DspType::Fader,
            Effect::Flange(_) => DspType::Flange,
            Effect::Limiter(_) => DspType::Limiter,
            Effect::Lowpass(_) => DspType::Lowpass,
            Effect::Normalize(_) => DspType::Normalize,
            Effect::Oscillator(_) => DspType::Oscillator,
            Effect::PitchShift(_) => DspType::PitchShift,
            Effect::Reverb(_) => DspType::Reverb,
            Effect::ThreeEq(_) => DspType::ThreeEq,
            Effect::Tremolo(_) => DspType::Tremolo,
        }
    }

    /// Parameter values in table order. Bools read as 0/1, ints as whole numbers.
    pub fn values(&self) -> Vec<f32> {
        match self {
            Effect::Chorus(s) => s.values(),
            Effect::Compressor(s) => s.values(),
            Effect::Distortion(s) => s.values(),
            Effect::Echo(s) => s.values(),
            Effect::Fader(s) => s.values(),
            Effect::Flange(s) => s.values(),
            Effect::Limiter(s) => s.values(),
            Effect::Lowpass(s) => s.values(),
            Effect::Normalize(s) => s.values(),
            Effect::Oscillator(s) => s.values(),
            Effect::PitchShift(s) => s.values(),
            Effect::Reverb(s) => s.values(),
            Effect::ThreeEq(s) => s.values(),
            Effect::Tremolo(s) => s.values(),
        }
    }

    /// Check every value against its table bounds.
    pub fn check(&self) -> Result<(), RangeViolation> {
        let checks: Vec<(f32, f32, f32)> = self
            .values()
            .into_iter()
            .zip(self.dsp_type().params())
            .map(|(value, desc)| (value, desc.min, desc.max))
            .collect();
        check_ranges(&checks)
    }

    /// Build a configured unit. Values are not range-checked here; call
    /// [`Effect::check`] first.
    pub fn build(&self, sample_rate: f32) -> AudioResult<Box<dyn DspUnit>> {
        let dsp_type = self.dsp_type();
        let mut unit = create_dsp(dsp_type, sample_rate);
        for (index, (desc, value)) in dsp_type.params().iter().zip(self.values()).enumerate() {
            unit.set_parameter(index, ParamValue::coerce(desc.kind, value))?;
        }
        Ok(unit)
    }
}

macro_rules! impl_from_settings {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Effect {
                fn from(settings: $variant) -> Self {
                    Effect::$variant(settings)
                }
            }
        )*
    };
}

impl_from_settings!(
    Chorus, Compressor, Distortion, Echo, Fader, Flange, Limiter, Lowpass, Normalize, Oscillator,
    PitchShift, Reverb, ThreeEq, Tremolo,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn default_effect(dsp_type: DspType) -> Effect {
        match dsp_type {
            DspType::Chorus => Chorus::default().into(),
            DspType::Compressor => Compressor::default().into(),
            DspType::Distortion => Distortion::default().into(),
            DspType::Echo => Echo::default().into(),
            DspType::Fader => Fader::default().into(),
            DspType::Flange => Flange::default().into(),
            DspType::Limiter => Limiter::default().into(),
            DspType::Lowpass => Lowpass::default().into(),
            DspType::Normalize => Normalize::default().into(),
            DspType::Oscillator => Oscillator::default().into(),
            DspType::PitchShift => PitchShift::default().into(),
            DspType::Reverb => Reverb::default().into(),
            DspType::ThreeEq => ThreeEq::default().into(),
            DspType::Tremolo => Tremolo::default().into(),
        }
    }

    #[test]
    fn test_created_units_report_their_type() {
        for dsp_type in DspType::ALL {
            let unit = create_dsp(dsp_type, 48_000.0);
            assert_eq!(unit.dsp_type(), dsp_type);
        }
    }

    #[test]
    fn test_created_units_start_at_defaults() {
        for dsp_type in DspType::ALL {
            let unit = create_dsp(dsp_type, 48_000.0);
            for (index, desc) in unit.params().iter().enumerate() {
                let value = unit.parameter(index).map(ParamValue::as_f32);
                assert_eq!(
                    value,
                    Some(desc.default),
                    "{} parameter {}",
                    dsp_type.name(),
                    desc.name
                );
            }
            assert!(unit.parameter(unit.params().len()).is_none());
        }
    }

    #[test]
    fn test_default_settings_match_tables() {
        for dsp_type in DspType::ALL {
            let effect = default_effect(dsp_type);
            assert_eq!(effect.dsp_type(), dsp_type);

            let defaults: Vec<f32> = dsp_type.params().iter().map(|d| d.default).collect();
            assert_eq!(effect.values(), defaults, "{}", dsp_type.name());
            assert!(effect.check().is_ok());
        }
    }

    #[test]
    fn test_default_effects_build() {
        for dsp_type in DspType::ALL {
            let unit = default_effect(dsp_type).build(48_000.0).unwrap();
            assert_eq!(unit.dsp_type(), dsp_type);
        }
    }

    #[test]
    fn test_check_flags_out_of_range_parameter() {
        let effect: Effect = Echo {
            delay: 0.0,
            ..Echo::default()
        }
        .into();
        let violation = effect.check().unwrap_err();
        assert_eq!(violation.position, 0);
        assert_eq!(violation.min, 1.0);
    }

    #[test]
    fn test_build_sets_bool_and_int_kinds() {
        let effect: Effect = ThreeEq {
            crossover_slope: 2,
            ..ThreeEq::default()
        }
        .into();
        let unit = effect.build(48_000.0).unwrap();
        assert_eq!(unit.parameter(5), Some(ParamValue::Int(2)));

        let effect: Effect = Compressor {
            linked: false,
            ..Compressor::default()
        }
        .into();
        let unit = effect.build(48_000.0).unwrap();
        assert_eq!(unit.parameter(5), Some(ParamValue::Bool(false)));
    }
}
