//! Tone generators: fill a buffer (or a region of one) from the
//! waveform primitives.
//!
//! All phase and envelope state lives in locals of a single call; nothing
//! carries over between notes.

use tracing::{debug, warn};

use super::buffer::Buffer;
use super::waveform::{midi_to_frequency, periodic_sine, sawtooth};

/// Vibrato LFO rate in Hz.
pub const VIBRATO_RATE: f64 = 8.0;
/// Peak phase-increment deviation added by the vibrato LFO, in cycles/sample.
pub const VIBRATO_DEPTH: f64 = 0.00006;
/// Starting level of the vibrato tone's linear fade.
pub const VIBRATO_PEAK: f64 = 0.9;

/// Write a fading, vibrato-modulated sine into `[offset, offset + length)`.
///
/// The envelope falls linearly from 0.9 to 0 across the region. An 8 Hz
/// LFO perturbs the carrier's phase increment every sample.
///
/// Panics if the region extends past the end of the buffer.
pub fn vibrato_sine(
    buffer: &mut Buffer,
    note: i32,
    octave: i32,
    offset: usize,
    length: usize,
    amplitude: f64,
) {
    assert!(
        offset + length <= buffer.len(),
        "region {offset}..{} exceeds buffer of {}",
        offset + length,
        buffer.len()
    );
    debug!(note, octave, offset, length, amplitude, "vibrato_sine");

    let sps = buffer.seconds_per_sample();
    // cycles/second * seconds/sample = cycles/sample
    let relfreq = midi_to_frequency(note, octave) * sps;
    let lfo_relfreq = VIBRATO_RATE * sps;

    let mut phase = 0.0;
    let mut lfo_phase = 0.0;

    for n in 0..length {
        let env = (VIBRATO_PEAK - VIBRATO_PEAK * n as f64 / length as f64).max(0.0);
        let out = periodic_sine(phase) * env;

        phase += relfreq + periodic_sine(lfo_phase) * VIBRATO_DEPTH;
        lfo_phase += lfo_relfreq;

        buffer.set(offset + n, out * amplitude);
    }
}

/// Fill the whole buffer with a self-restarting plucked C2.
///
/// A sawtooth running at 2 Hz drives both the carrier phase and a fast
/// decay; each wrap of the ramp retriggers the note.
pub fn repeator(buffer: &mut Buffer) {
    let sps = buffer.seconds_per_sample();
    let freq = midi_to_frequency(0, 1);
    debug!(len = buffer.len(), freq, "repeator");

    for n in 0..buffer.len() {
        let time = sawtooth(n as f64 * sps * 2.0);
        let env = (1.0 - time * 4.0).max(0.0);
        let phase = time * freq;

        buffer.set(n, periodic_sine(phase) * env);
    }
}

/// Write a single `1.0` at `index`.
pub fn unit_impulse(buffer: &mut Buffer, index: usize) {
    buffer.set(index, 1.0);
}

/// Place four evenly spaced unit impulses across the buffer.
///
/// Samples between the impulses keep whatever they held before.
pub fn impulse_rhythm(buffer: &mut Buffer) {
    let len = buffer.len();
    let step = len / 4;
    if step == 0 {
        if len > 0 {
            warn!(len, "buffer too short for four impulses, writing one");
            unit_impulse(buffer, 0);
        }
        return;
    }

    for n in (0..len).step_by(step) {
        unit_impulse(buffer, n);
    }
}

/// Fill the buffer with a plain sine of `frequency` Hz at `amplitude`.
pub fn constant_sine(buffer: &mut Buffer, frequency: f64, amplitude: f64) {
    let relfreq = frequency * buffer.seconds_per_sample();
    debug!(len = buffer.len(), frequency, amplitude, "constant_sine");

    let mut phase = 0.0;
    for n in 0..buffer.len() {
        let out = periodic_sine(phase);
        phase += relfreq;
        buffer.set(n, out * amplitude);
    }
}
