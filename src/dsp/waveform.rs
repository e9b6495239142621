//! Waveform primitives: stateless periodic functions and pitch math.
//!
//! Every function takes its phase in whole cycles (`1.0` = one period),
//! not radians.

use std::f64::consts::TAU;

/// Frequency of MIDI note 0 in octave 0 (C1), in Hz.
pub const C1_FREQUENCY: f64 = 32.703_195_662_574_83;

/// Sine of a phase given in cycles.
pub fn periodic_sine(periods: f64) -> f64 {
    (periods * TAU).sin()
}

/// Linear ramp from 0 up to (but excluding) 1, then silent forever.
///
/// Used as a single-shot gate: `spike(t * rate)` plays once through
/// `[0, 1)` and then stays at zero.
pub fn spike(periods: f64) -> f64 {
    if periods < 1.0 { periods } else { 0.0 }
}

/// Repeating 0 → 1 ramp (the fractional part of `periods`).
pub fn sawtooth(periods: f64) -> f64 {
    periods - periods.floor()
}

/// Equal-tempered frequency of a semitone `note` within `octave`.
///
/// `midi_to_frequency(0, 0)` is C1; adding 12 to `note` or 1 to `octave`
/// doubles the frequency.
pub fn midi_to_frequency(note: i32, octave: i32) -> f64 {
    C1_FREQUENCY * (2.0_f64).powf(note as f64 / 12.0 + octave as f64)
}

/// Decode an unsigned 8-bit PCM byte into roughly `[-1, 1)`.
pub fn decode_u8(byte: u8) -> f64 {
    byte as f64 / 128.0 - 1.0
}

/// Quantize a float sample to unsigned 8-bit PCM (clamped).
pub fn encode_u8(value: f64) -> u8 {
    ((value + 1.0) * 128.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_starts_at_zero() {
        assert!(periodic_sine(0.0).abs() < 1e-12);
        assert!((periodic_sine(0.25) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sine_is_periodic() {
        for i in 0..100 {
            let p = i as f64 * 0.137 - 5.0;
            let diff = (periodic_sine(p) - periodic_sine(p + 1.0)).abs();
            assert!(diff < 1e-9, "sine not periodic at {p}: diff {diff}");
        }
    }

    #[test]
    fn sawtooth_range_and_period() {
        for i in 0..1000 {
            let p = i as f64 * 0.0173;
            let s = sawtooth(p);
            assert!((0.0..1.0).contains(&s), "Saw out of range at {p}: {s}");
            assert!((s - sawtooth(p + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn spike_gates_after_one_period() {
        assert_eq!(spike(0.0), 0.0);
        assert_eq!(spike(0.5), 0.5);
        assert_eq!(spike(1.0), 0.0);
        assert_eq!(spike(2.0), 0.0);
    }

    #[test]
    fn c1_reference_pitch() {
        assert!((midi_to_frequency(0, 0) - 32.70319566257483).abs() < 1e-9);
    }

    #[test]
    fn octave_doubles_frequency() {
        let c1 = midi_to_frequency(0, 0);
        assert!((midi_to_frequency(12, 0) - 2.0 * c1).abs() < 1e-9);
        assert!((midi_to_frequency(0, 1) - 2.0 * c1).abs() < 1e-9);
        // A4 lands on 440 Hz: semitone 9 of octave 3
        assert!((midi_to_frequency(9, 3) - 440.0).abs() < 1e-6);
    }

    #[test]
    fn u8_decoding() {
        assert_eq!(decode_u8(128), 0.0);
        assert_eq!(decode_u8(0), -1.0);
        assert!((decode_u8(255) - 0.9921875).abs() < 1e-12);
        assert_eq!(encode_u8(decode_u8(37)), 37);
        assert_eq!(encode_u8(4.0), 255);
    }
}
