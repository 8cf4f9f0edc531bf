//! Low-level DSP primitives used by the effect units.
//!
//! These components never allocate while processing, so they are safe to run
//! inside the mixer on the audio thread. Anything that needs memory (delay
//! lines, reverb buffers) sizes it once at construction.

/// Circular delay buffer with fractional reads.
pub mod delay;
/// Soft and hard waveshapers.
pub mod distortion;
/// Envelope follower and compressor gain computer.
pub mod dynamics;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Phase-accumulating oscillator for modulation and tone generation.
pub mod lfo;
/// Decibel conversion, panning and dry/wet blending.
pub mod mix;
/// Two-head delay-line pitch shifter.
pub mod pitch;
/// Schroeder reverb network.
pub mod reverb;
