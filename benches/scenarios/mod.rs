//! Whole-mix scenarios rendered offline through the component.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ga_audio::{AudioComponent, AudioConfig, OutputMode, Sound};

use crate::SAMPLE_RATE;

const BLOCK: usize = 512;

fn component(channels: usize) -> AudioComponent {
    let config = AudioConfig::new()
        .channels(channels)
        .sample_rate(SAMPLE_RATE)
        .output(OutputMode::NoSound);
    let mut audio = match AudioComponent::with_config(config) {
        Ok(audio) => audio,
        Err(e) => panic!("no-sound component failed: {}", e),
    };

    // Long enough that nothing runs out during measurement
    let tone: Vec<f32> = (0..SAMPLE_RATE as usize * 60)
        .map(|i| (i as f32 * 0.03).sin() * 0.3)
        .collect();
    audio.add_sound_data(Sound::from_samples("tone", tone, SAMPLE_RATE));
    audio
}

/// Plain voices, no effects: resampling, pan and summing only.
pub fn bench_channels(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/channels");

    for &voices in &[1usize, 8, 32] {
        let mut audio = component(voices);
        for key in 0..voices {
            if let Some(ch) = audio.play_sound(0) {
                let _ = audio.set_channel_pitch(ch, key as f32 - 12.0);
            }
        }

        let mut out = vec![0.0f32; BLOCK * 2];
        group.bench_with_input(BenchmarkId::new("render", voices), &voices, |b, _| {
            b.iter(|| audio.system().render(black_box(&mut out), 2))
        });
    }

    group.finish();
}

/// Eight notes each carrying the demo's full effect chain.
pub fn bench_piano_chain(c: &mut Criterion) {
    let mut audio = component(8);
    for key in 0..8 {
        if let Some(ch) = audio.play_sound(0) {
            let _ = audio.set_channel_pitch(ch, key as f32);
            let _ = audio.set_channel_distortion(ch, 1.0);
            let _ = audio.set_channel_echo(ch, 400.0, 50.0, 0.0, 0.0);
            let _ = audio.set_channel_tremolo(ch, 5.0, 1.0, 0.5);
            let _ = audio.set_channel_chorus(ch, 50.0, 0.8, 3.0);
            let _ = audio.set_channel_three_eq(ch, 0.0, 0.0, 0.0, 400.0, 4000.0, 1);
        }
    }

    let mut out = vec![0.0f32; BLOCK * 2];
    c.bench_function("scenarios/piano_chain", |b| {
        b.iter(|| audio.system().render(black_box(&mut out), 2))
    });
}
