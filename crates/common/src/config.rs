//! Application configuration.
//!
//! Defaults first, then the JSON config file, then environment variables.
//! Recognized environment keys:
//! - `PARLANCE_MODEL_DIR` — overrides the model cache directory
//! - `HUGGINGFACE_ACCESS_TOKEN` — optional bearer token for model downloads

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where downloaded model artifacts are cached.
    pub model_cache_dir: PathBuf,

    /// Default transcription settings.
    pub transcription: TranscriptionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default transcription parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionDefaults {
    /// Whisper model name (e.g. "base", "small", "large-v3-turbo").
    pub whisper_model: String,

    /// Language hint (ISO 639-1 code); None lets whisper auto-detect.
    pub language: Option<String>,

    /// File extensions recognized during batch discovery.
    pub extensions: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "parlance=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_cache_dir: default_model_cache_dir(),
            transcription: TranscriptionDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TranscriptionDefaults {
    fn default() -> Self {
        Self {
            whisper_model: "base".to_string(),
            language: None,
            extensions: vec![
                "wav".to_string(),
                "mp3".to_string(),
                "mp4".to_string(),
                "m4a".to_string(),
                "flac".to_string(),
                "ogg".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults,
    /// then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_file().unwrap_or_default();
        config.apply_env();
        config
    }

    fn load_file() -> Option<Self> {
        let config_path = config_file_path();
        if !config_path.exists() {
            return None;
        }
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                None
            }
        }
    }

    /// Apply recognized environment variables on top of the loaded values.
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("PARLANCE_MODEL_DIR") {
            if !dir.is_empty() {
                self.model_cache_dir = PathBuf::from(dir);
            }
        }
    }

    /// Optional Hugging Face token for model downloads.
    pub fn hf_token() -> Option<String> {
        std::env::var("HUGGINGFACE_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("parlance").join("config.json")
}

/// Default model cache directory.
fn default_model_cache_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("parlance").join("models")
}
