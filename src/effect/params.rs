//! Parameter tables and range validation.
//!
//! Every DSP type declares an ordered list of parameters. The component checks
//! requested values against these bounds before it builds a unit, then sets
//! each value according to the declared kind.

use thiserror::Error;

use super::DspType;
use crate::error::{AudioError, AudioResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Bool,
    Int,
}

impl ParamKind {
    fn label(self) -> &'static str {
        match self {
            ParamKind::Float => "a float",
            ParamKind::Bool => "a bool",
            ParamKind::Int => "an int",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Bool(bool),
    Int(i32),
}

impl ParamValue {
    /// Convert a validated number into the kind a parameter declares:
    /// bools are `value != 0`, ints truncate toward zero.
    pub fn coerce(kind: ParamKind, value: f32) -> Self {
        match kind {
            ParamKind::Float => ParamValue::Float(value),
            ParamKind::Bool => ParamValue::Bool(value != 0.0),
            ParamKind::Int => ParamValue::Int(value as i32),
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            ParamValue::Float(v) => v,
            ParamValue::Bool(b) => b as i32 as f32,
            ParamValue::Int(i) => i as f32,
        }
    }
}

/// One row of a DSP type's parameter table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDesc {
    pub name: &'static str,
    pub kind: ParamKind,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamDesc {
    const fn float(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            kind: ParamKind::Float,
            min,
            max,
            default,
        }
    }

    const fn int(name: &'static str, min: i32, max: i32, default: i32) -> Self {
        Self {
            name,
            kind: ParamKind::Int,
            min: min as f32,
            max: max as f32,
            default: default as f32,
        }
    }

    const fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParamKind::Bool,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const CHORUS: &[ParamDesc] = &[
    ParamDesc::float("mix", 0.0, 100.0, 50.0),
    ParamDesc::float("rate", 0.0, 20.0, 0.8),
    ParamDesc::float("depth", 0.0, 100.0, 3.0),
];

pub const COMPRESSOR: &[ParamDesc] = &[
    ParamDesc::float("threshold", -60.0, 0.0, 0.0),
    ParamDesc::float("ratio", 1.0, 50.0, 2.5),
    ParamDesc::float("attack", 0.1, 500.0, 20.0),
    ParamDesc::float("release", 10.0, 5000.0, 100.0),
    ParamDesc::float("gainmakeup", -30.0, 30.0, 0.0),
    ParamDesc::boolean("linked", true),
];

pub const DISTORTION: &[ParamDesc] = &[ParamDesc::float("level", 0.0, 1.0, 0.5)];

pub const ECHO: &[ParamDesc] = &[
    ParamDesc::float("delay", 1.0, 5000.0, 500.0),
    ParamDesc::float("feedback", 0.0, 100.0, 50.0),
    ParamDesc::float("drylevel", -80.0, 10.0, 0.0),
    ParamDesc::float("wetlevel", -80.0, 10.0, 0.0),
];

pub const FADER: &[ParamDesc] = &[ParamDesc::float("gain", -80.0, 10.0, 0.0)];

pub const FLANGE: &[ParamDesc] = &[
    ParamDesc::float("mix", 0.0, 100.0, 50.0),
    ParamDesc::float("depth", 0.01, 1.0, 1.0),
    ParamDesc::float("rate", 0.0, 20.0, 0.1),
];

pub const LIMITER: &[ParamDesc] = &[
    ParamDesc::float("releasetime", 1.0, 1000.0, 10.0),
    ParamDesc::float("ceiling", -12.0, 0.0, 0.0),
    ParamDesc::float("maximizergain", 0.0, 12.0, 0.0),
    ParamDesc::boolean("mode", false),
];

pub const LOWPASS: &[ParamDesc] = &[
    ParamDesc::float("cutoff", 10.0, 22_000.0, 5000.0),
    ParamDesc::float("resonance", 1.0, 10.0, 1.0),
];

pub const NORMALIZE: &[ParamDesc] = &[
    ParamDesc::float("fadetime", 0.0, 20_000.0, 5000.0),
    ParamDesc::float("threshold", 0.0, 1.0, 0.1),
    ParamDesc::float("maxamp", 1.0, 100_000.0, 20.0),
];

pub const OSCILLATOR: &[ParamDesc] = &[
    ParamDesc::int("type", 0, 5, 0),
    ParamDesc::float("rate", 0.0, 22_000.0, 220.0),
];

pub const PITCH_SHIFT: &[ParamDesc] = &[
    ParamDesc::float("pitch", 0.5, 2.0, 1.0),
    ParamDesc::float("fftsize", 256.0, 4096.0, 1024.0),
];

pub const REVERB: &[ParamDesc] = &[
    ParamDesc::float("decaytime", 100.0, 20_000.0, 1500.0),
    ParamDesc::float("earlydelay", 0.0, 300.0, 20.0),
    ParamDesc::float("hfdecayratio", 10.0, 100.0, 50.0),
    ParamDesc::float("diffusion", 0.0, 100.0, 50.0),
    ParamDesc::float("wetlevel", -80.0, 20.0, -6.0),
    ParamDesc::float("drylevel", -80.0, 20.0, 0.0),
];

pub const THREE_EQ: &[ParamDesc] = &[
    ParamDesc::float("lowgain", -80.0, 10.0, 0.0),
    ParamDesc::float("midgain", -80.0, 10.0, 0.0),
    ParamDesc::float("highgain", -80.0, 10.0, 0.0),
    ParamDesc::float("lowcrossover", 10.0, 22_000.0, 400.0),
    ParamDesc::float("highcrossover", 10.0, 22_000.0, 4000.0),
    ParamDesc::int("crossoverslope", 0, 2, 1),
];

pub const TREMOLO: &[ParamDesc] = &[
    ParamDesc::float("frequency", 0.1, 20.0, 5.0),
    ParamDesc::float("depth", 0.0, 1.0, 1.0),
    ParamDesc::float("duty", 0.0, 1.0, 0.5),
];

/// First `(value, min, max)` triple that failed its bounds.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("value {value} at position {position} outside [{min}, {max}]")]
pub struct RangeViolation {
    pub position: usize,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

/// Check every `(value, min, max)` triple; bounds are inclusive and NaN
/// always fails.
pub fn check_ranges(checks: &[(f32, f32, f32)]) -> Result<(), RangeViolation> {
    for (position, &(value, min, max)) in checks.iter().enumerate() {
        if !(value >= min && value <= max) {
            return Err(RangeViolation {
                position,
                value,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Look up a parameter row, failing for indices past the table.
pub(crate) fn param_desc(dsp: DspType, index: usize) -> AudioResult<&'static ParamDesc> {
    dsp.params()
        .get(index)
        .ok_or(AudioError::InvalidParameter { dsp, index })
}

/// Unpack a value of the declared kind, clamped into the table range.
pub(crate) fn expect_float(dsp: DspType, index: usize, value: ParamValue) -> AudioResult<f32> {
    let desc = param_desc(dsp, index)?;
    match (desc.kind, value) {
        (ParamKind::Float, ParamValue::Float(v)) => Ok(desc.clamp(v)),
        _ => Err(kind_error(dsp, desc)),
    }
}

pub(crate) fn expect_int(dsp: DspType, index: usize, value: ParamValue) -> AudioResult<i32> {
    let desc = param_desc(dsp, index)?;
    match (desc.kind, value) {
        (ParamKind::Int, ParamValue::Int(v)) => Ok(v.clamp(desc.min as i32, desc.max as i32)),
        _ => Err(kind_error(dsp, desc)),
    }
}

pub(crate) fn expect_bool(dsp: DspType, index: usize, value: ParamValue) -> AudioResult<bool> {
    let desc = param_desc(dsp, index)?;
    match (desc.kind, value) {
        (ParamKind::Bool, ParamValue::Bool(v)) => Ok(v),
        _ => Err(kind_error(dsp, desc)),
    }
}

fn kind_error(dsp: DspType, desc: &ParamDesc) -> AudioError {
    AudioError::ParameterKind {
        dsp,
        name: desc.name,
        expected: desc.kind.label(),
    }
}
