//! Static registry of downloadable model artifacts.

use std::path::{Path, PathBuf};

/// One downloadable model artifact.
#[derive(Debug, Clone, Copy)]
pub struct ModelArtifact {
    /// Human-readable name for logging.
    pub name: &'static str,
    /// Filename inside the cache directory.
    pub filename: &'static str,
    /// Download URL.
    pub url: &'static str,
    /// Approximate size, for logging only.
    pub size_mb: f64,
}

/// Pyannote segmentation model (speech turn detection).
pub const SEGMENTATION_MODEL: ModelArtifact = ModelArtifact {
    name: "Segmentation 3.0",
    filename: "segmentation-3.0.onnx",
    url: "https://github.com/thewh1teagle/pyannote-rs/releases/download/v0.1.0/segmentation-3.0.onnx",
    size_mb: 5.9,
};

/// WeSpeaker speaker-embedding model (speaker clustering).
pub const EMBEDDING_MODEL: ModelArtifact = ModelArtifact {
    name: "WeSpeaker Embedding",
    filename: "wespeaker_en_voxceleb_CAM++.onnx",
    url: "https://github.com/thewh1teagle/pyannote-rs/releases/download/v0.1.0/wespeaker_en_voxceleb_CAM++.onnx",
    size_mb: 26.5,
};

/// Whisper model names we know how to fetch, with approximate sizes.
pub const WHISPER_MODELS: &[(&str, f64)] = &[
    ("tiny", 78.0),
    ("tiny.en", 78.0),
    ("base", 148.0),
    ("base.en", 148.0),
    ("small", 488.0),
    ("small.en", 488.0),
    ("medium", 1530.0),
    ("large-v3-turbo", 1620.0),
    ("large-v3", 3100.0),
];

/// Hugging Face download URL for a whisper.cpp GGML model.
pub fn whisper_model_url(model_name: &str) -> Option<String> {
    if !WHISPER_MODELS.iter().any(|(name, _)| *name == model_name) {
        return None;
    }
    Some(format!(
        "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-{model_name}.bin"
    ))
}

/// Approximate download size of a known whisper model, in megabytes.
pub fn whisper_model_size_mb(model_name: &str) -> Option<f64> {
    WHISPER_MODELS
        .iter()
        .find(|(name, _)| *name == model_name)
        .map(|(_, size_mb)| *size_mb)
}

/// Filename of a whisper GGML model inside the cache directory.
pub fn whisper_model_filename(model_name: &str) -> String {
    format!("ggml-{model_name}.bin")
}

/// Resolved on-disk locations of the three artifacts one pipeline run needs.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub segmentation: PathBuf,
    pub embedding: PathBuf,
    pub whisper: PathBuf,
}

impl ModelPaths {
    /// Compute cache paths for a given whisper model without touching disk.
    pub fn in_cache(cache_dir: &Path, whisper_model: &str) -> Self {
        Self {
            segmentation: cache_dir.join(SEGMENTATION_MODEL.filename),
            embedding: cache_dir.join(EMBEDDING_MODEL.filename),
            whisper: cache_dir.join(whisper_model_filename(whisper_model)),
        }
    }

    /// Whether every artifact is present on disk.
    pub fn all_present(&self) -> bool {
        self.segmentation.exists() && self.embedding.exists() && self.whisper.exists()
    }

    /// Names of artifacts missing from the cache.
    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for (label, path) in [
            ("segmentation", &self.segmentation),
            ("embedding", &self.embedding),
            ("whisper", &self.whisper),
        ] {
            if !path.exists() {
                missing.push(format!("{} ({})", label, path.display()));
            }
        }
        missing
    }
}
