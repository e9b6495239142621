//! Sample buffer: a fixed-length run of float samples plus its format.

/// Default sample rate for new buffers.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// An owned, fixed-length sequence of samples.
///
/// The length only changes through [`Buffer::resize`]. Indexed access is
/// checked: writing or reading past the end is a caller bug and panics.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    samples: Vec<f64>,
    sample_rate: u32,
    channels: u16,
}

impl Buffer {
    /// A silent mono buffer at 44.1 kHz.
    pub fn new(sample_count: usize) -> Self {
        Self::with_format(sample_count, DEFAULT_SAMPLE_RATE, 1)
    }

    /// A silent buffer with an explicit sample rate and channel count.
    pub fn with_format(sample_count: usize, sample_rate: u32, channels: u16) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        assert!(channels > 0, "channel count must be positive");
        Buffer {
            samples: vec![0.0; sample_count],
            sample_rate,
            channels,
        }
    }

    /// Wrap existing samples.
    pub fn from_samples(samples: Vec<f64>, sample_rate: u32, channels: u16) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        assert!(channels > 0, "channel count must be positive");
        Buffer {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channels
    }

    /// Duration of one sample in seconds.
    pub fn seconds_per_sample(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Write `value` at `index`.
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: f64) {
        let len = self.samples.len();
        match self.samples.get_mut(index) {
            Some(slot) => *slot = value,
            None => panic!("sample index {index} out of range for buffer of {len}"),
        }
    }

    /// Read the sample at `index`.
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        match self.get_checked(index) {
            Some(value) => value,
            None => panic!(
                "sample index {index} out of range for buffer of {}",
                self.samples.len()
            ),
        }
    }

    pub fn get_checked(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    /// Change the sample count, truncating or padding with silence.
    pub fn resize(&mut self, new_count: usize) {
        self.samples.resize(new_count, 0.0);
    }

    /// Reset every sample to silence, keeping the length.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
    }

    /// Convert to 16-bit signed PCM (for WAV export).
    pub fn to_pcm_i16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| (s * 32767.0).round().clamp(-32768.0, 32767.0) as i16)
            .collect()
    }
}
