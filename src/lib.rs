pub mod component; // Channel-pool facade driven once per frame
pub mod config;
pub mod dsp;
pub mod effect; // DSP unit catalog and parameter tables
pub mod engine; // System, channels, sounds, output
pub mod error;

pub use component::{AudioComponent, Rejected};
pub use config::{AudioConfig, OutputMode};
pub use effect::{DspType, Effect};
pub use engine::{ChannelHandle, Sound, SoundHandle, System};
pub use error::{AudioError, AudioResult};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
