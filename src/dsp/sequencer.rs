//! Step sequencer: plays drum wave tables into a buffer from an 8-step
//! pattern.

use tracing::debug;

use super::buffer::Buffer;
use super::waveform::spike;
use super::wavetable::{Drum, DrumKit, WaveTable};

/// Number of steps in a pattern. The buffer is split into this many
/// equal slices.
pub const STEPS: usize = 8;

/// Maps playback time to a read phase through a step's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseFunction {
    /// Phase equals seconds since the start of the buffer.
    #[default]
    Sustain,
    /// Phase equals seconds since the start of the step, so the table
    /// restarts at every step boundary.
    Retrigger,
}

impl PhaseFunction {
    /// Read phase for a sample `elapsed` seconds into the buffer and
    /// `in_step` seconds into its step.
    pub fn phase(self, elapsed: f64, in_step: f64) -> f64 {
        match self {
            PhaseFunction::Sustain => elapsed,
            PhaseFunction::Retrigger => in_step,
        }
    }
}

/// One step: which drum sounds and how its table is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub drum: Drum,
    pub phase: PhaseFunction,
}

impl Step {
    pub const fn new(drum: Drum) -> Self {
        Step {
            drum,
            phase: PhaseFunction::Sustain,
        }
    }

    pub const fn rest() -> Self {
        Step::new(Drum::Silence)
    }

    pub const fn retrigger(drum: Drum) -> Self {
        Step {
            drum,
            phase: PhaseFunction::Retrigger,
        }
    }
}

/// A fixed 8-step drum pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub steps: [Step; STEPS],
}

impl Pattern {
    pub const fn new(steps: [Step; STEPS]) -> Self {
        Pattern { steps }
    }

    /// The built-in break: kick, rest, hat, kick, rest, kick, snare, snare.
    pub const fn amen() -> Self {
        Pattern::new([
            Step::new(Drum::BassDrum),
            Step::rest(),
            Step::new(Drum::HiHat),
            Step::new(Drum::BassDrum),
            Step::rest(),
            Step::new(Drum::BassDrum),
            Step::new(Drum::Snare),
            Step::new(Drum::Snare),
        ])
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::amen()
    }
}

/// How [`drum_loop`] fills the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrumLoopMode {
    /// Render the pattern.
    #[default]
    Pattern,
    /// Render the pattern, then overwrite everything with a one-shot kick
    /// gated four times across the buffer (the old two-pass behaviour).
    LegacyOverwrite,
}

/// Render `pattern` into the whole buffer.
///
/// Step `n * 8 / len` is active at sample `n`; its phase function picks the
/// read position. Rests write silence.
pub fn render_pattern(buffer: &mut Buffer, kit: &DrumKit, pattern: &Pattern) {
    let len = buffer.len();
    let sps = buffer.seconds_per_sample();
    debug!(len, "render_pattern");

    for n in 0..len {
        let beat = n * STEPS / len;
        let beat_start = (beat * len).div_ceil(STEPS);
        let step = pattern.steps[beat];

        let out = match kit.table(step.drum) {
            Some(table) => {
                let elapsed = n as f64 * sps;
                let in_step = (n - beat_start) as f64 * sps;
                table.read(step.phase.phase(elapsed, in_step))
            }
            None => 0.0,
        };
        buffer.set(n, out);
    }
}

/// Overwrite the buffer with a single spike-gated pass through `table`.
///
/// The gate ramps from 0 to 1 over `1 / cycles` of a second, then holds the
/// table's first sample.
pub fn one_shot(buffer: &mut Buffer, table: &WaveTable, cycles: f64) {
    let sps = buffer.seconds_per_sample();
    debug!(len = buffer.len(), cycles, "one_shot");

    for n in 0..buffer.len() {
        let p = spike(n as f64 * sps * cycles);
        buffer.set(n, table.read(p));
    }
}

/// Fill the buffer with a drum loop from the built-in pattern.
pub fn drum_loop(buffer: &mut Buffer, kit: &DrumKit, mode: DrumLoopMode) {
    render_pattern(buffer, kit, &Pattern::amen());
    if mode == DrumLoopMode::LegacyOverwrite {
        one_shot(buffer, &kit.bass_drum, 4.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::waveform::decode_u8;

    fn flat_kit() -> DrumKit {
        // Each voice is a constant level so steps are easy to tell apart.
        DrumKit::new(
            WaveTable::new(vec![192u8; 64]),
            WaveTable::new(vec![160u8; 64]),
            WaveTable::new(vec![64u8; 64]),
        )
    }

    #[test]
    fn step_boundaries_split_buffer_in_eight() {
        for len in [8usize, 800, 803, 44100] {
            for n in 0..len {
                let beat = n * STEPS / len;
                let start = (beat * len).div_ceil(STEPS);
                assert!(start <= n, "len {len} n {n}: start {start} after n");
                assert_eq!(start * STEPS / len, beat);
            }
        }
    }

    #[test]
    fn pattern_selects_drums_per_step() {
        let kit = flat_kit();
        // 64 samples per step at 44.1 kHz: phase never reaches 1.0.
        let mut buf = Buffer::new(512);
        render_pattern(&mut buf, &kit, &Pattern::amen());

        let expected = [0.5, 0.0, 0.25, 0.5, 0.0, 0.5, -0.5, -0.5];
        for (step, &level) in expected.iter().enumerate() {
            for n in step * 64..(step + 1) * 64 {
                assert_eq!(buf.get(n), level, "step {step} sample {n}");
            }
        }
    }

    fn ramp_kit() -> DrumKit {
        let ramp: Vec<u8> = (0..=255u8).collect();
        DrumKit::new(
            WaveTable::new(ramp),
            WaveTable::new(vec![128u8]),
            WaveTable::new(vec![128u8]),
        )
    }

    #[test]
    fn sustain_reads_from_buffer_start() {
        let kit = ramp_kit();
        let mut buf = Buffer::new(800);
        render_pattern(&mut buf, &kit, &Pattern::amen());

        // Step 3 is a kick; its read position keeps counting from sample 0.
        let expected = decode_u8((342.0 / 44100.0 * 256.0) as u8);
        assert_eq!(buf.get(342), expected);
        assert_eq!(expected, -0.9921875);
        assert_ne!(buf.get(300), buf.get(0));
    }

    #[test]
    fn retrigger_restarts_each_step() {
        let kit = ramp_kit();
        let mut pattern = Pattern::amen();
        pattern.steps[0] = Step::retrigger(Drum::BassDrum);
        pattern.steps[3] = Step::retrigger(Drum::BassDrum);
        let mut buf = Buffer::new(800);
        render_pattern(&mut buf, &kit, &pattern);

        // Steps 0 and 3 both start the kick from its first byte.
        assert_eq!(buf.get(0), buf.get(300));
        assert_eq!(buf.get(99), buf.get(399));
        assert_eq!(buf.get(300), -1.0);
    }

    #[test]
    fn long_steps_fall_silent_after_the_table() {
        let kit = flat_kit();
        // Two-second steps; a table is read over the buffer's first second.
        let mut buf = Buffer::new(44100 * 16);
        render_pattern(&mut buf, &kit, &Pattern::amen());
        assert_eq!(buf.get(5), 0.5);
        assert_eq!(buf.get(44099), 0.5);
        assert_eq!(buf.get(44100), 0.5);
        assert_eq!(buf.get(66150), 0.0);
    }

    #[test]
    fn legacy_overwrite_discards_pattern() {
        let kit = flat_kit();
        let mut buf = Buffer::new(44100);
        drum_loop(&mut buf, &kit, DrumLoopMode::LegacyOverwrite);
        // After the gate closes the first kick sample is held everywhere.
        assert_eq!(buf.get(40000), 0.5);
        assert!(buf.samples().iter().all(|&s| s == 0.5));

        let mut plain = Buffer::new(44100);
        drum_loop(&mut plain, &kit, DrumLoopMode::Pattern);
        assert_eq!(plain.get(6000), 0.0);
    }
}
