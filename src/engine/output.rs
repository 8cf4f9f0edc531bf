//! Output backends: the default cpal device, or nothing at all.

use std::sync::{Arc, Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::engine::mixer::Mixer;
use crate::error::{AudioError, AudioResult};

/// The default output device, opened but not yet streaming.
pub(crate) struct DeviceOutput {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl DeviceOutput {
    pub fn open() -> AudioResult<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::ConfigError(e.to_string()))?;

        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    pub fn channels(&self) -> usize {
        self.config.channels() as usize
    }

    /// Build and start the stream. The audio callback locks the mixer for
    /// the length of each device buffer.
    pub fn start(self, mixer: Arc<Mutex<Mixer>>) -> AudioResult<cpal::Stream> {
        let channels = self.channels();
        let Self { device, config } = self;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let mut mixer = mixer.lock().unwrap_or_else(PoisonError::into_inner);
                        mixer.render(data, channels);
                    },
                    |err| log::error!("audio stream error: {}", err),
                    None,
                )
                .map_err(|e| AudioError::StreamError(e.to_string()))?,
            format => {
                return Err(AudioError::StreamError(format!(
                    "unsupported sample format: {}",
                    format
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::StreamError(e.to_string()))?;

        Ok(stream)
    }
}

/// Where mixed audio ends up.
pub(crate) enum Output {
    /// Held so the stream keeps running; dropping it stops playback.
    Device { _stream: cpal::Stream },
    /// Mixed blocks land here and are thrown away.
    NoSound { block: Vec<f32> },
}

impl Output {
    pub fn no_sound(block_size: usize) -> Self {
        // stereo
        Output::NoSound {
            block: vec![0.0; block_size * 2],
        }
    }
}
