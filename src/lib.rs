pub mod batch;
pub mod config;
pub mod dsp;
pub mod error;
pub mod export;

use crate::dsp::buffer::Buffer;
use crate::dsp::tone::vibrato_sine;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the tinysynth version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Render one full-length vibrato note into a fresh buffer.
pub fn render_note(note: i32, octave: i32, length: usize, sample_rate: u32) -> Buffer {
    let mut buffer = Buffer::with_format(length, sample_rate, 1);
    vibrato_sine(&mut buffer, note, octave, 0, length, 1.0);
    buffer
}

/// WASM-exposed: render a vibrato note to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_note_samples(note: i32, octave: i32, length: usize, sample_rate: u32) -> Vec<f32> {
    render_note(note, octave, length, sample_rate)
        .samples()
        .iter()
        .map(|&s| s as f32)
        .collect()
}

/// WASM-exposed: render a vibrato note to a 16-bit WAV byte array.
#[wasm_bindgen]
pub fn render_note_wav(
    note: i32,
    octave: i32,
    length: usize,
    sample_rate: u32,
) -> Result<Vec<u8>, JsValue> {
    let buffer = render_note(note, octave, length, sample_rate);
    export::encode_wav(&buffer).map_err(|e| JsValue::from_str(&format!("{e}")))
}
