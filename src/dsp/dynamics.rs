//! Level detection and gain computation for the dynamics units.

/*
Envelope Follower
=================

Tracks the peak level of a signal with separate rise and fall speeds:

    coeff  = exp(-1 / (time_seconds * sample_rate))
    level  = coeff * level + (1 - coeff) * |x|

Attack applies while |x| is above the current level, release while below.
An attack of zero makes the follower jump to new peaks immediately (limiter).

Gain Computer
=============

Above the threshold, every `ratio` dB of input yields 1 dB of output:

    over      = level_db - threshold_db        (only when > 0)
    reduction = over * (1 - 1 / ratio)
*/

use crate::{dsp::mix::linear_to_db, MIN_TIME};

#[inline]
fn time_coefficient(time_ms: f32, sample_rate: f32) -> f32 {
    let seconds = time_ms / 1000.0;
    if seconds < MIN_TIME {
        0.0
    } else {
        (-1.0 / (seconds * sample_rate)).exp()
    }
}

pub struct EnvelopeFollower {
    level: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl EnvelopeFollower {
    pub fn new(attack_ms: f32, release_ms: f32, sample_rate: f32) -> Self {
        Self {
            level: 0.0,
            attack_coeff: time_coefficient(attack_ms, sample_rate),
            release_coeff: time_coefficient(release_ms, sample_rate),
        }
    }

    pub fn set_attack(&mut self, attack_ms: f32, sample_rate: f32) {
        self.attack_coeff = time_coefficient(attack_ms, sample_rate);
    }

    pub fn set_release(&mut self, release_ms: f32, sample_rate: f32) {
        self.release_coeff = time_coefficient(release_ms, sample_rate);
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let input = sample.abs();
        let coeff = if input > self.level {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.level = coeff * self.level + (1.0 - coeff) * input;
        self.level
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

/// Gain reduction in dB (zero or negative) for a detected level.
#[inline]
pub fn compressor_gain_db(level: f32, threshold_db: f32, ratio: f32) -> f32 {
    let over = linear_to_db(level) - threshold_db;
    if over <= 0.0 {
        0.0
    } else {
        -over * (1.0 - 1.0 / ratio.max(1.0))
    }
}
