//! Engine error types

use std::path::PathBuf;

use thiserror::Error;

use crate::effect::DspType;

/// Errors raised by the engine layer.
///
/// The component never propagates these to its callers; it logs them and
/// answers with a sentinel instead.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Failed to open or decode a sound file
    #[error("Failed to load sound {path}: {source}")]
    SoundLoad {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Decoded file contained no samples
    #[error("Sound {0} contains no samples")]
    EmptySound(String),

    /// Sound handle does not refer to a loaded sound
    #[error("Invalid sound handle: {0}")]
    InvalidSound(usize),

    /// Channel handle is stale or was never issued
    #[error("Invalid channel handle: index {index}, generation {generation}")]
    InvalidHandle { index: usize, generation: u32 },

    /// Every voice is busy
    #[error("No free channels ({0} in use)")]
    NoFreeChannels(usize),

    /// DSP parameter index outside the unit's table
    #[error("{dsp:?} has no parameter {index}")]
    InvalidParameter { dsp: DspType, index: usize },

    /// DSP parameter value has the wrong kind for its slot
    #[error("{dsp:?} parameter {name} expects {expected}")]
    ParameterKind {
        dsp: DspType,
        name: &'static str,
        expected: &'static str,
    },

    /// No audio devices available
    #[error("No default audio output device available")]
    NoDevice,

    /// Failed to get device configuration
    #[error("Failed to get device config: {0}")]
    ConfigError(String),

    /// Failed to build or start the audio stream
    #[error("Audio stream error: {0}")]
    StreamError(String),
}

/// Result type for engine operations
pub type AudioResult<T> = Result<T, AudioError>;
