//! Error types shared across Parlance crates.

use std::path::PathBuf;

/// Top-level error type for Parlance operations.
#[derive(Debug, thiserror::Error)]
pub enum ParlanceError {
    /// Model download failed at the transport/HTTP level.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A downloaded artifact did not match what the server announced.
    #[error("Integrity error: {message}")]
    Integrity { message: String },

    /// Input audio could not be decoded or converted.
    #[error("Unsupported audio format: {message}")]
    UnsupportedFormat { message: String },

    /// Diarization or speech-recognition inference failed.
    #[error("Model inference error: {message}")]
    ModelInference { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ParlanceError.
pub type ParlanceResult<T> = Result<T, ParlanceError>;

impl ParlanceError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
        }
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity {
            message: msg.into(),
        }
    }

    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: msg.into(),
        }
    }

    pub fn model_inference(msg: impl Into<String>) -> Self {
        Self::ModelInference {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_their_kind() {
        let err = ParlanceError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = ParlanceError::unsupported_format("not a wav");
        assert_eq!(err.to_string(), "Unsupported audio format: not a wav");
    }

    #[test]
    fn test_io_error_converts_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: ParlanceError = io.into();
        assert!(matches!(err, ParlanceError::Io(_)));
    }
}
