//! Gain, panning and dry/wet mixing helpers.

/*
Levels
======

Effect parameters speak decibels; the signal path multiplies by linear gain.

    linear = 10 ^ (dB / 20)

      0 dB  → 1.0
     -6 dB  → ~0.5
    -80 dB  → 0.0001 (treated as silence)
    +10 dB  → ~3.16

Panning
=======

Mono voices are placed in the stereo field with a constant-power law so a
sound keeps its loudness as it moves across:

    angle = (pan + 1) × π/4          pan ∈ [-1, 1]
    left  = cos(angle)
    right = sin(angle)

    pan = -1  →  (1.0, 0.0)
    pan =  0  →  (0.707, 0.707)
    pan =  1  →  (0.0, 1.0)
*/

use std::f32::consts::FRAC_PI_4;

/// Gains at or below this level are treated as silence.
pub const SILENCE_DB: f32 = -80.0;

#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    if db <= SILENCE_DB {
        0.0
    } else {
        10.0_f32.powf(db / 20.0)
    }
}

#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        SILENCE_DB
    } else {
        (20.0 * linear.log10()).max(SILENCE_DB)
    }
}

/// Constant-power (left, right) gains for a pan position in [-1, 1].
#[inline]
pub fn pan_gains(pan: f32) -> (f32, f32) {
    let angle = (pan.clamp(-1.0, 1.0) + 1.0) * FRAC_PI_4;
    (angle.cos(), angle.sin())
}

/// Blend dry and wet samples using linear crossfade (single sample version).
///
/// output = (dry × (1-mix)) + (wet × mix)
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Apply dry/wet mixing to a buffer, blending original (dry) with processed (wet).
///
/// Modifies `wet` in-place, using `dry` as the unprocessed reference.
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    if mix >= 1.0 {
        return; // 100% wet, nothing to do
    }

    let dry_amount = 1.0 - mix;
    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = dry_sample * dry_amount + *wet_sample * mix;
    }
}

/// Add `b` scaled by `gain` into `a`.
///
/// ⚠️ Can exceed [-1.0, +1.0]; the output stage does not limit.
#[inline]
pub fn sum_scaled(a: &mut [f32], b: &[f32], gain: f32) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb * gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_round_trip_points() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
        assert_eq!(db_to_linear(-80.0), 0.0);
        assert!((linear_to_db(0.1) + 20.0).abs() < 1e-4);
        assert_eq!(linear_to_db(0.0), SILENCE_DB);
    }

    #[test]
    fn test_pan_extremes() {
        let (l, r) = pan_gains(-1.0);
        assert!((l - 1.0).abs() < 1e-6 && r.abs() < 1e-6);

        let (l, r) = pan_gains(1.0);
        assert!(l.abs() < 1e-6 && (r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pan_center_is_constant_power() {
        let (l, r) = pan_gains(0.0);
        assert!((l * l + r * r - 1.0).abs() < 1e-6);
        assert!((l - r).abs() < 1e-6);
    }

    #[test]
    fn test_pan_clamped() {
        assert_eq!(pan_gains(5.0), pan_gains(1.0));
    }

    #[test]
    fn test_apply_dry_wet_half() {
        let dry = [1.0, 1.0];
        let mut wet = [0.0, 0.5];

        apply_dry_wet(&dry, &mut wet, 0.5);

        assert_eq!(wet, [0.5, 0.75]);
    }

    #[test]
    fn test_full_wet_untouched() {
        let dry = [1.0];
        let mut wet = [0.25];
        apply_dry_wet(&dry, &mut wet, 1.0);
        assert_eq!(wet, [0.25]);
    }

    #[test]
    fn test_sum_scaled_can_exceed_one() {
        let mut a = [1.0, 0.5];
        sum_scaled(&mut a, &[1.0, 0.8], 1.0);
        assert_eq!(a[0], 2.0);
        assert!((a[1] - 1.3).abs() < 1e-6);
    }
}
