use std::path::PathBuf;

/// Errors from the I/O edge of the synth: writing WAV files, loading
/// tables and reading configuration. Sample generation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unsupported wave table {}: {reason}", .path.display())]
    UnsupportedTable { path: PathBuf, reason: String },

    #[error("Invalid sample rate {0} Hz: must be positive")]
    InvalidSampleRate(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = SynthError::InvalidSampleRate(0);
        assert_eq!(err.to_string(), "Invalid sample rate 0 Hz: must be positive");

        let err = SynthError::UnsupportedTable {
            path: PathBuf::from("kit/bd.wav"),
            reason: "stereo".into(),
        };
        assert_eq!(err.to_string(), "Unsupported wave table kit/bd.wav: stereo");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SynthError = io.into();
        assert!(matches!(err, SynthError::Io(_)));
    }
}
