//! Per-unit cost of every effect type.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ga_audio::effect::create_dsp;
use ga_audio::DspType;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();

        for dsp_type in DspType::ALL {
            let mut unit = create_dsp(dsp_type, SAMPLE_RATE as f32);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(dsp_type.name(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        unit.process(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
