//! Batch routines: build note sets, render them and export each buffer.

use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::dsp::buffer::Buffer;
use crate::dsp::sequencer::{DrumLoopMode, drum_loop};
use crate::dsp::tone::{constant_sine, impulse_rhythm, repeator, vibrato_sine};
use crate::dsp::wavetable::DrumKit;
use crate::error::SynthError;
use crate::export::Export;

/// Sample rate used by [`make_constant_sine`].
pub const CONSTANT_SINE_RATE: u32 = 48000;
/// Semitones per chromatic note set (an octave, both ends included).
pub const CHROMATIC_NOTES: i32 = 13;

/// A named pitch: semitone `midi_note` within `midi_octave`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub name: String,
    pub midi_note: i32,
    pub midi_octave: i32,
}

impl Note {
    pub fn new(name: impl Into<String>, midi_note: i32, midi_octave: i32) -> Self {
        Note {
            name: name.into(),
            midi_note,
            midi_octave,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.wav", self.name)
    }
}

/// Semitones 0..=12 of `octave`, named `{prefix}{semitone}`.
pub fn chromatic_notes(prefix: &str, octave: i32) -> Vec<Note> {
    (0..CHROMATIC_NOTES)
        .map(|n| Note::new(format!("{prefix}{n}"), n, octave))
        .collect()
}

/// One fading vibrato note per semitone, `length` samples each.
pub fn make_notes(
    sink: &mut impl Export,
    length: usize,
    prefix: &str,
    config: &RenderConfig,
) -> Result<(), SynthError> {
    config.validate()?;
    let notes = chromatic_notes(prefix, config.octave);
    info!(count = notes.len(), length, prefix, "rendering notes");

    for note in &notes {
        let mut buffer = Buffer::with_format(length, config.sample_rate, 1);
        vibrato_sine(&mut buffer, note.midi_note, note.midi_octave, 0, length, 1.0);
        sink.export(&buffer, &note.file_name())?;
    }
    Ok(())
}

/// Four-beat metronome clicks per semitone: an accented beat an octave up,
/// then three softer beats at the base octave.
pub fn make_metronome_notes(
    sink: &mut impl Export,
    length: usize,
    prefix: &str,
    config: &RenderConfig,
) -> Result<(), SynthError> {
    config.validate()?;
    let notes = chromatic_notes(prefix, config.octave);
    let beat = length / 4;
    info!(count = notes.len(), length, beat, prefix, "rendering metronome notes");

    // (octave offset, amplitude) per beat
    const BEATS: [(i32, f64); 4] = [(1, 1.0), (0, 0.4), (0, 0.6), (0, 0.4)];

    for note in &notes {
        let mut buffer = Buffer::with_format(length, config.sample_rate, 1);
        for (i, &(octave_offset, amp)) in BEATS.iter().enumerate() {
            vibrato_sine(
                &mut buffer,
                note.midi_note,
                note.midi_octave + octave_offset,
                beat * i,
                beat,
                amp,
            );
        }
        sink.export(&buffer, &note.file_name())?;
    }
    Ok(())
}

/// Eight seconds of the self-retriggering C2 tone, as `c1_long.wav`.
pub fn make_long_note(sink: &mut impl Export, config: &RenderConfig) -> Result<(), SynthError> {
    config.validate()?;
    let mut buffer = Buffer::with_format(config.sample_rate as usize * 8, config.sample_rate, 1);
    repeator(&mut buffer);
    sink.export(&buffer, "c1_long.wav")
}

/// A steady half-amplitude sine at 48 kHz.
pub fn make_constant_sine(
    sink: &mut impl Export,
    length: usize,
    frequency: f64,
    file_name: &str,
) -> Result<(), SynthError> {
    let mut buffer = Buffer::with_format(length, CONSTANT_SINE_RATE, 1);
    constant_sine(&mut buffer, frequency, 0.5);
    debug!(frequency, period = CONSTANT_SINE_RATE as f64 / frequency, "constant sine");
    sink.export(&buffer, file_name)
}

/// The built-in drum pattern across `length` samples.
pub fn make_drum_loop(
    sink: &mut impl Export,
    kit: &DrumKit,
    length: usize,
    mode: DrumLoopMode,
    file_name: &str,
    config: &RenderConfig,
) -> Result<(), SynthError> {
    config.validate()?;
    let mut buffer = Buffer::with_format(length, config.sample_rate, 1);
    drum_loop(&mut buffer, kit, mode);
    sink.export(&buffer, file_name)
}

/// Four unit impulses across `length` samples.
pub fn make_impulse_rhythm(
    sink: &mut impl Export,
    length: usize,
    file_name: &str,
    config: &RenderConfig,
) -> Result<(), SynthError> {
    config.validate()?;
    let mut buffer = Buffer::with_format(length, config.sample_rate, 1);
    impulse_rhythm(&mut buffer);
    sink.export(&buffer, file_name)
}
