//! Render configuration, loadable from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dsp::buffer::DEFAULT_SAMPLE_RATE;
use crate::error::SynthError;

/// Settings shared by the batch routines.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Sample rate for note buffers, in Hz.
    pub sample_rate: u32,
    /// Octave the chromatic note sets are built in.
    pub octave: i32,
    /// Directory exported WAV files are written to.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            octave: 3,
            output_dir: PathBuf::from("."),
        }
    }
}

impl RenderConfig {
    /// Read a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SynthError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SynthError> {
        let config: RenderConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no buffer can be built with.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }
}
