//! Decoded sound clips.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{AudioError, AudioResult};

/// A decoded clip: mono `f32` samples at the source sample rate.
///
/// Multi-channel files are averaged down to one channel on load; pan is
/// applied per channel at mix time instead.
#[derive(Debug, Clone)]
pub struct Sound {
    name: String,
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Sound {
    /// Decode a WAV file (8/16/24/32-bit integer or 32-bit float PCM).
    pub fn load(path: impl AsRef<Path>) -> AudioResult<Self> {
        let path = path.as_ref();
        let load_error = |source: hound::Error| AudioError::SoundLoad {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = WavReader::open(path).map_err(load_error)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(load_error)?,
            SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(load_error)?
            }
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let samples = downmix(&interleaved, spec.channels as usize);
        if samples.is_empty() {
            return Err(AudioError::EmptySound(name));
        }

        log::debug!(
            "loaded {} ({} Hz, {} ch, {} frames)",
            name,
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        Ok(Self {
            name,
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    /// Wrap already-decoded mono samples, e.g. a procedurally generated tone.
    pub fn from_samples(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            samples,
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in frames.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn length_ms(&self) -> f32 {
        self.samples.len() as f32 * 1000.0 / self.sample_rate as f32
    }
}

/// Average interleaved frames down to mono.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_averages_frames() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix(&stereo, 2), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_downmix_drops_partial_frame() {
        assert_eq!(downmix(&[1.0, 1.0, 1.0], 2), vec![1.0]);
    }

    #[test]
    fn test_length_ms() {
        let sound = Sound::from_samples("beep", vec![0.0; 24_000], 48_000);
        assert_eq!(sound.length_ms(), 500.0);
        assert_eq!(sound.len(), 24_000);
        assert_eq!(sound.name(), "beep");
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Sound::load("/definitely/not/here.wav").unwrap_err();
        assert!(matches!(err, AudioError::SoundLoad { .. }));
    }
}
