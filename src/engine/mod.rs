//! In-process playback engine.
//!
//! The object model is the usual one for game audio: a [`System`] owns the
//! loaded [`Sound`]s and a fixed pool of channels; playing a sound claims a
//! free channel and hands back a [`ChannelHandle`]; DSP units are appended to
//! a channel's chain and run before volume and pan.

mod mixer;
mod output;
mod sound;
mod system;
mod voice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use sound::Sound;
pub use system::System;

/// Index into the system's sound table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub usize);

/// A claim on one channel for one playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelHandle {
    index: usize,
    generation: u32,
}

impl ChannelHandle {
    /// Position of the channel in the pool.
    pub fn index(&self) -> usize {
        self.index
    }
}
