//! Engine configuration.
//!
//! ```
//! use ga_audio::{AudioConfig, OutputMode};
//!
//! let config = AudioConfig::new()
//!     .channels(16)
//!     .sample_rate(44_100)
//!     .output(OutputMode::NoSound);
//! assert_eq!(config.num_channels, 16);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_BLOCK_SIZE;

/// Where the mixer's output goes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Default output device through cpal; the device clock drives mixing.
    Device,
    /// No device. Each `update` mixes one block and discards it.
    NoSound,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Size of the playback channel pool
    pub num_channels: usize,
    /// Mix rate used by the `NoSound` backend. Device output uses the
    /// device's own rate.
    pub sample_rate: u32,
    /// Frames mixed per `update` in `NoSound` mode (clamped to `MAX_BLOCK_SIZE`)
    pub block_size: usize,
    pub output: OutputMode,
    /// Capacity of the scope ring buffer in samples
    pub scope_capacity: usize,
}

impl AudioConfig {
    pub fn new() -> Self {
        Self {
            num_channels: 32,
            sample_rate: 48_000,
            block_size: 512,
            output: OutputMode::Device,
            scope_capacity: 8192,
        }
    }

    pub fn channels(mut self, num_channels: usize) -> Self {
        self.num_channels = num_channels;
        self
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate.max(1);
        self
    }

    pub fn block_size(mut self, frames: usize) -> Self {
        self.block_size = frames.clamp(1, MAX_BLOCK_SIZE);
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn scope_capacity(mut self, samples: usize) -> Self {
        self.scope_capacity = samples.max(1);
        self
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_clamped() {
        let config = AudioConfig::new().block_size(1 << 20);
        assert_eq!(config.block_size, MAX_BLOCK_SIZE);

        let config = AudioConfig::new().block_size(0);
        assert_eq!(config.block_size, 1);
    }

    #[test]
    fn test_defaults_use_device_output() {
        let config = AudioConfig::default();
        assert_eq!(config.output, OutputMode::Device);
        assert_eq!(config.num_channels, 32);
    }
}
