//! Stand-in instrument samples for when no WAV files are given.
//!
//! Both are middle C (C4) so the keyboard's semitone offsets land on the
//! right notes.

use ga_audio::Sound;

pub const C4_HZ: f32 = 261.63;

const DURATION_S: f32 = 2.0;

/// A few decaying harmonics, roughly a struck string.
pub fn piano(sample_rate: u32) -> Sound {
    let sr = sample_rate as f32;
    let len = (DURATION_S * sr) as usize;
    // (harmonic, amplitude, decay per second)
    let partials = [(1.0, 0.6, 2.0), (2.0, 0.25, 3.0), (3.0, 0.1, 4.5), (4.0, 0.05, 6.0)];

    let samples = (0..len)
        .map(|n| {
            let t = n as f32 / sr;
            // 5 ms attack removes the click at the start
            let attack = (t / 0.005).min(1.0);
            let body: f32 = partials
                .iter()
                .map(|&(h, amp, decay)| {
                    amp * (-decay * t).exp() * (std::f32::consts::TAU * C4_HZ * h * t).sin()
                })
                .sum();
            attack * body
        })
        .collect();

    Sound::from_samples("piano_c4", samples, sample_rate)
}

/// Karplus-Strong plucked string.
pub fn guitar(sample_rate: u32) -> Sound {
    let sr = sample_rate as f32;
    let len = (DURATION_S * sr) as usize;
    let period = (sr / C4_HZ).round().max(2.0) as usize;

    // Seed the string with deterministic noise
    let mut state = 0x2545_F491u32;
    let mut string: Vec<f32> = (0..period)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect();

    let mut samples = Vec::with_capacity(len);
    let mut pos = 0;
    for _ in 0..len {
        let next = (pos + 1) % period;
        let out = string[pos];
        string[pos] = 0.996 * 0.5 * (string[pos] + string[next]);
        samples.push(out * 0.5);
        pos = next;
    }

    Sound::from_samples("guitar_c4", samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_are_two_seconds() {
        assert_eq!(piano(48_000).len(), 96_000);
        assert_eq!(guitar(44_100).len(), 88_200);
    }

    #[test]
    fn test_tones_stay_in_range() {
        for sound in [piano(48_000), guitar(48_000)] {
            assert!(sound.samples().iter().all(|s| s.abs() <= 1.0));
        }
    }

    #[test]
    fn test_guitar_decays() {
        let sound = guitar(48_000);
        let peak = |s: &[f32]| s.iter().fold(0.0f32, |a, &x| a.max(x.abs()));
        let start = peak(&sound.samples()[..4800]);
        let end = peak(&sound.samples()[91_200..]);
        assert!(end < start * 0.5);
    }
}
