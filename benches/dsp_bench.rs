//! Benchmarks for the effect units and the channel mixer.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - effects/*    Each DSP unit on its own, default settings
//!   - scenarios/*  Full mixes through the audio component

use criterion::{criterion_group, criterion_main};

mod effects;
mod scenarios;

pub const BLOCK_SIZES: &[usize] = &[64, 256, 512];

pub const SAMPLE_RATE: u32 = 48_000;

criterion_group!(
    benches,
    effects::bench_effects,
    scenarios::bench_channels,
    scenarios::bench_piano_chain,
);
criterion_main!(benches);
