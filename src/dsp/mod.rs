//! DSP: sample generation.
//!
//! Everything here is synchronous and allocation-free inside the per-sample
//! loops. Generators write into a caller-owned [`buffer::Buffer`]; export to
//! disk lives in [`crate::export`].

pub mod buffer;
pub mod sequencer;
pub mod tone;
pub mod waveform;
pub mod wavetable;
