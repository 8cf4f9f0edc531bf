use crate::dsp::distortion::soft_clip_buffer;
use crate::dsp::mix::apply_dry_wet;
use crate::effect::params::{expect_float, DISTORTION};
use crate::effect::{DspType, DspUnit, ParamValue};
use crate::error::AudioResult;
use crate::MAX_BLOCK_SIZE;

/*
Distortion
==========

Soft-clip waveshaping. A single `level` (0 - 1) sets both how hard the signal
is driven and how much of the shaped signal replaces the dry one, so level 0
is a clean pass-through and level 1 is fully saturated.

    drive = 1 + 20 · level
    out   = dry · (1 - level) + soft_clip(dry, drive) · level
*/

const MAX_DRIVE: f32 = 20.0;

/// Distortion settings, in parameter-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distortion {
    pub level: f32,
}

impl Default for Distortion {
    fn default() -> Self {
        Self {
            level: DISTORTION[0].default,
        }
    }
}

impl Distortion {
    pub(crate) fn values(&self) -> Vec<f32> {
        vec![self.level]
    }
}

pub struct DistortionUnit {
    level: f32,
    dry_buffer: [f32; MAX_BLOCK_SIZE], // Pre-allocated for allocation-free rendering
}

impl DistortionUnit {
    pub fn new() -> Self {
        Self {
            level: Distortion::default().level,
            dry_buffer: [0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl Default for DistortionUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl DspUnit for DistortionUnit {
    fn dsp_type(&self) -> DspType {
        DspType::Distortion
    }

    fn set_parameter(&mut self, index: usize, value: ParamValue) -> AudioResult<()> {
        self.level = expect_float(DspType::Distortion, index, value)?;
        Ok(())
    }

    fn parameter(&self, index: usize) -> Option<ParamValue> {
        (index == 0).then_some(ParamValue::Float(self.level))
    }

    fn process(&mut self, buffer: &mut [f32]) {
        if self.level <= 0.0 {
            return;
        }

        for block in buffer.chunks_mut(MAX_BLOCK_SIZE) {
            let len = block.len();
            self.dry_buffer[..len].copy_from_slice(block);

            soft_clip_buffer(block, 1.0 + MAX_DRIVE * self.level);
            apply_dry_wet(&self.dry_buffer[..len], block, self.level);
        }
    }
}
