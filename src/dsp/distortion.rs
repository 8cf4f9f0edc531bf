//! Waveshaping
//!
//! A waveshaper applies a transfer function to each sample:
//!   output = f(input * drive)
//!
//! Soft clip, `f(x) = x / (1 + |x|)`, compresses peaks gradually and is what
//! the distortion unit uses. Hard clip clamps at a threshold and is used by
//! the limiter as a final safety stage.
//!
//! # Drive Values
//!
//!   1.0  = Gentle rounding
//!   2-4  = Warm saturation
//!   5-10 = Obvious distortion
//!   10+  = Heavy, aggressive

/// Soft clipping using x / (1 + |x|) transfer function.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    let x = sample * drive;
    x / (1.0 + x.abs())
}

/// Hard clipping - simply clamps the signal at a threshold.
#[inline]
pub fn hard_clip(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    x.clamp(-threshold, threshold)
}

/// Apply soft clipping to an entire buffer in place.
pub fn soft_clip_buffer(buffer: &mut [f32], drive: f32) {
    for sample in buffer.iter_mut() {
        *sample = soft_clip(*sample, drive);
    }
}

/// Apply hard clipping to an entire buffer in place.
pub fn hard_clip_buffer(buffer: &mut [f32], drive: f32, threshold: f32) {
    for sample in buffer.iter_mut() {
        *sample = hard_clip(*sample, drive, threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_unity_drive() {
        // f(0.1) = 0.1 / 1.1
        let output = soft_clip(0.1, 1.0);
        assert!((output - 0.0909).abs() < 0.01);
    }

    #[test]
    fn test_soft_clip_high_drive() {
        // f(10) = 10 / 11
        let output = soft_clip(1.0, 10.0);
        assert!(output > 0.9 && output < 1.0);
    }

    #[test]
    fn test_soft_clip_is_odd() {
        assert!((soft_clip(-0.4, 3.0) + soft_clip(0.4, 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_hard_clip_below_threshold() {
        let output = hard_clip(0.3, 1.0, 1.0);
        assert!((output - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_hard_clip_buffer_limits_amplitude() {
        let mut buffer = vec![0.8, -0.8, 0.1];
        hard_clip_buffer(&mut buffer, 2.0, 1.0);
        assert_eq!(buffer, vec![1.0, -1.0, 0.2]);
    }
}
