//! WAV export: the sink every finished buffer is handed to.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::dsp::buffer::Buffer;
use crate::error::SynthError;

/// Destination for finished buffers.
pub trait Export {
    /// Consume a finished buffer under `file_name` (e.g. `"note3.wav"`).
    fn export(&mut self, buffer: &Buffer, file_name: &str) -> Result<(), SynthError>;
}

/// Writes each buffer as a 16-bit PCM WAV file inside a directory.
#[derive(Debug, Clone)]
pub struct WavDirectory {
    dir: PathBuf,
}

impl WavDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        WavDirectory { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Export for WavDirectory {
    fn export(&mut self, buffer: &Buffer, file_name: &str) -> Result<(), SynthError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        write_wav(buffer, &path)?;
        info!(
            path = %path.display(),
            samples = buffer.len(),
            sample_rate = buffer.sample_rate(),
            "exported"
        );
        Ok(())
    }
}

/// Keeps exported buffers in memory, in export order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Buffer)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Export for MemorySink {
    fn export(&mut self, buffer: &Buffer, file_name: &str) -> Result<(), SynthError> {
        self.files.push((file_name.to_string(), buffer.clone()));
        Ok(())
    }
}

fn wav_spec(buffer: &Buffer) -> hound::WavSpec {
    hound::WavSpec {
        channels: buffer.channel_count(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn write_pcm<W: Write + Seek>(writer: W, buffer: &Buffer) -> Result<(), SynthError> {
    let mut wav = hound::WavWriter::new(writer, wav_spec(buffer))?;
    for sample in buffer.to_pcm_i16() {
        wav.write_sample(sample)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write `buffer` to `path` as 16-bit PCM.
pub fn write_wav(buffer: &Buffer, path: impl AsRef<Path>) -> Result<(), SynthError> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_pcm(file, buffer)
}

/// Encode `buffer` as an in-memory 16-bit PCM WAV file.
pub fn encode_wav(buffer: &Buffer) -> Result<Vec<u8>, SynthError> {
    let mut cursor = Cursor::new(Vec::new());
    write_pcm(&mut cursor, buffer)?;
    Ok(cursor.into_inner())
}

/// Read an integer or float WAV file back into a buffer.
pub fn read_wav(path: impl AsRef<Path>) -> Result<Buffer, SynthError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 * scale))
                .collect::<Result<Vec<f64>, _>>()?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<Result<Vec<f64>, _>>()?,
    };
    Ok(Buffer::from_samples(samples, spec.sample_rate, spec.channels))
}
