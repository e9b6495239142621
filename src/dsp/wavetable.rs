//! Wave tables: 8-bit unsigned PCM sample data and the drum kit.
//!
//! Tables are read-only and cheaply cloneable. Every read goes through
//! [`WaveTable::read`], which owns the bounds handling.

use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::buffer::DEFAULT_SAMPLE_RATE;
use super::waveform::{decode_u8, encode_u8, periodic_sine};
use crate::error::SynthError;

/// An immutable table of unsigned 8-bit PCM samples.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    data: Arc<[u8]>,
}

impl WaveTable {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        WaveTable { data: data.into() }
    }

    /// Quantize float samples in `[-1, 1]` into a table.
    pub fn from_f64(samples: &[f64]) -> Self {
        let data: Vec<u8> = samples.iter().map(|&s| encode_u8(s)).collect();
        WaveTable::new(data)
    }

    /// Load a mono integer WAV file, requantized to 8-bit unsigned.
    pub fn from_wav(path: impl AsRef<Path>) -> Result<Self, SynthError> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        if spec.channels != 1 || spec.sample_format != hound::SampleFormat::Int {
            return Err(SynthError::UnsupportedTable {
                path: path.to_path_buf(),
                reason: format!(
                    "expected mono integer PCM, found {} channel(s) of {:?}",
                    spec.channels, spec.sample_format
                ),
            });
        }

        // hound hands 8-bit data back already re-centred around zero.
        let shift = spec.bits_per_sample.saturating_sub(8);
        let data = reader
            .samples::<i32>()
            .map(|s| s.map(|v| ((v >> shift) + 128).clamp(0, 255) as u8))
            .collect::<Result<Vec<u8>, _>>()?;

        debug!(path = %path.display(), len = data.len(), "loaded wave table");
        Ok(WaveTable::new(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Decoded sample at a phase through the table (`0.0` = start,
    /// `1.0` = end).
    ///
    /// `floor(phase * len)` picks the element. A phase that lands exactly
    /// on the end clamps to the last element; anything further, a negative
    /// phase, or an empty table reads as silence.
    pub fn read(&self, phase: f64) -> f64 {
        let len = self.data.len();
        if len == 0 || !(phase >= 0.0) {
            return 0.0;
        }

        let index = (phase * len as f64).floor() as usize;
        match index.cmp(&len) {
            std::cmp::Ordering::Less => decode_u8(self.data[index]),
            std::cmp::Ordering::Equal => decode_u8(self.data[len - 1]),
            std::cmp::Ordering::Greater => 0.0,
        }
    }
}

/// A drum voice selectable by a sequencer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drum {
    Silence,
    BassDrum,
    HiHat,
    Snare,
}

/// The three sampled drum voices.
#[derive(Debug, Clone)]
pub struct DrumKit {
    pub bass_drum: WaveTable,
    pub hi_hat: WaveTable,
    pub snare: WaveTable,
}

impl DrumKit {
    pub fn new(bass_drum: WaveTable, hi_hat: WaveTable, snare: WaveTable) -> Self {
        DrumKit {
            bass_drum,
            hi_hat,
            snare,
        }
    }

    /// Load `bd.wav`, `hh.wav` and `sn.wav` from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, SynthError> {
        let dir = dir.as_ref();
        Ok(DrumKit {
            bass_drum: WaveTable::from_wav(dir.join("bd.wav"))?,
            hi_hat: WaveTable::from_wav(dir.join("hh.wav"))?,
            snare: WaveTable::from_wav(dir.join("sn.wav"))?,
        })
    }

    /// A kit synthesized at 44.1 kHz: swept-sine kick, noise hat, and a
    /// tone-plus-noise snare. The noise is seeded, so the kit is identical
    /// on every run.
    pub fn synthesized() -> Self {
        let sr = DEFAULT_SAMPLE_RATE as f64;
        let mut rng = StdRng::seed_from_u64(0x5eed);

        let kick_len = (sr * 0.25) as usize;
        let mut phase = 0.0;
        let kick: Vec<f64> = (0..kick_len)
            .map(|n| {
                let t = n as f64 / sr;
                let freq = 50.0 + 100.0 * (-t * 30.0).exp();
                let out = periodic_sine(phase) * (-t * 12.0).exp();
                phase += freq / sr;
                out * 0.95
            })
            .collect();

        let hat_len = (sr * 0.08) as usize;
        let hat: Vec<f64> = (0..hat_len)
            .map(|n| {
                let t = n as f64 / sr;
                rng.gen_range(-1.0f64..1.0) * (-t * 60.0).exp() * 0.6
            })
            .collect();

        let snare_len = (sr * 0.2) as usize;
        let snare: Vec<f64> = (0..snare_len)
            .map(|n| {
                let t = n as f64 / sr;
                let tone = periodic_sine(t * 180.0) * (-t * 25.0).exp();
                let noise = rng.gen_range(-1.0f64..1.0) * (-t * 18.0).exp();
                (tone * 0.5 + noise * 0.5) * 0.9
            })
            .collect();

        DrumKit::new(
            WaveTable::from_f64(&kick),
            WaveTable::from_f64(&hat),
            WaveTable::from_f64(&snare),
        )
    }

    /// The table for `drum`, or `None` for [`Drum::Silence`].
    pub fn table(&self, drum: Drum) -> Option<&WaveTable> {
        match drum {
            Drum::Silence => None,
            Drum::BassDrum => Some(&self.bass_drum),
            Drum::HiHat => Some(&self.hi_hat),
            Drum::Snare => Some(&self.snare),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_picks_floor_index() {
        let table = WaveTable::new(vec![128u8, 192, 64, 0]);
        assert_eq!(table.read(0.0), 0.0);
        assert_eq!(table.read(0.3), 0.5);
        assert_eq!(table.read(0.5), -0.5);
        assert_eq!(table.read(0.99), -1.0);
    }

    #[test]
    fn read_at_end_clamps_to_last_element() {
        let table = WaveTable::new(vec![128u8, 192, 64, 0]);
        assert_eq!(table.read(1.0), -1.0);
    }

    #[test]
    fn read_past_end_is_silent() {
        let table = WaveTable::new(vec![255u8; 4]);
        assert_eq!(table.read(1.5), 0.0);
        assert_eq!(table.read(1000.0), 0.0);
        assert_eq!(table.read(-0.1), 0.0);
        assert_eq!(table.read(f64::NAN), 0.0);
        assert_eq!(WaveTable::new(Vec::<u8>::new()).read(0.0), 0.0);
    }

    #[test]
    fn synthesized_kit_is_deterministic() {
        let a = DrumKit::synthesized();
        let b = DrumKit::synthesized();
        assert_eq!(a.hi_hat, b.hi_hat);
        assert_eq!(a.snare, b.snare);
        assert_eq!(a.bass_drum.len(), 11025);
        assert!(a.bass_drum.bytes().iter().any(|&b| b > 200));
    }

    #[test]
    fn silence_has_no_table() {
        let kit = DrumKit::synthesized();
        assert!(kit.table(Drum::Silence).is_none());
        assert_eq!(kit.table(Drum::Snare), Some(&kit.snare));
    }

    #[test]
    fn wav_table_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("t.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 8,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("create");
        for s in [-128i8, 0, 64, 127] {
            writer.write_sample(s).expect("write");
        }
        writer.finalize().expect("finalize");

        let table = WaveTable::from_wav(&path).expect("load");
        assert_eq!(table.bytes(), &[0u8, 128, 192, 255]);
    }

    #[test]
    fn stereo_wav_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("s.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("create");
        writer.write_sample(0i16).expect("write");
        writer.write_sample(0i16).expect("write");
        writer.finalize().expect("finalize");

        let err = WaveTable::from_wav(&path).unwrap_err();
        assert!(matches!(err, SynthError::UnsupportedTable { .. }), "{err}");
    }
}
