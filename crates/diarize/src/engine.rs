//! Diarization engine built on pyannote-rs.

use std::path::PathBuf;

use parlance_audio::AudioBuffer;
use parlance_common::{ParlanceError, ParlanceResult};
use parlance_transcript::Segment;
use pyannote_rs::{get_segments, EmbeddingExtractor, EmbeddingManager};
use serde::{Deserialize, Serialize};

/// Configuration for the diarization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizerConfig {
    /// Path to the segmentation model (segmentation-3.0.onnx).
    pub segmentation_model_path: PathBuf,
    /// Path to the speaker embedding model (wespeaker_en_voxceleb_CAM++.onnx).
    pub embedding_model_path: PathBuf,
    /// Maximum number of distinct speakers tracked per file.
    pub max_speakers: usize,
    /// Cosine similarity threshold for assigning a segment to an existing
    /// speaker; below it a new speaker is created while capacity allows.
    pub similarity_threshold: f32,
}

impl DiarizerConfig {
    pub fn new(segmentation_model_path: PathBuf, embedding_model_path: PathBuf) -> Self {
        Self {
            segmentation_model_path,
            embedding_model_path,
            max_speakers: 10,
            similarity_threshold: 0.5,
        }
    }
}

/// Speaker diarization engine.
///
/// The embedding model is loaded once at construction and reused read-only
/// across files; clustering state is created fresh per [`Self::diarize`]
/// call so files never bleed speakers into each other.
pub struct Diarizer {
    config: DiarizerConfig,
    embedding_extractor: EmbeddingExtractor,
}

impl Diarizer {
    pub fn new(config: DiarizerConfig) -> ParlanceResult<Self> {
        for (label, path) in [
            ("segmentation", &config.segmentation_model_path),
            ("embedding", &config.embedding_model_path),
        ] {
            if !path.exists() {
                return Err(ParlanceError::config(format!(
                    "{label} model not found at {}; run `parlance fetch-models` first",
                    path.display()
                )));
            }
        }

        let embedding_extractor =
            EmbeddingExtractor::new(&config.embedding_model_path).map_err(|e| {
                ParlanceError::model_inference(format!("failed to load embedding model: {e}"))
            })?;

        tracing::info!(
            segmentation = %config.segmentation_model_path.display(),
            embedding = %config.embedding_model_path.display(),
            "Diarizer initialized"
        );

        Ok(Self {
            config,
            embedding_extractor,
        })
    }

    /// Run diarization over one audio buffer.
    ///
    /// Returns time-ordered, non-overlapping segments labeled "Speaker 1",
    /// "Speaker 2", ... in order of first appearance. Per-segment embedding
    /// failures are logged and the segment keeps a fallback label; a
    /// segmentation failure aborts the run.
    pub fn diarize(&mut self, audio: &AudioBuffer) -> ParlanceResult<Vec<Segment>> {
        let samples = audio.to_i16();
        tracing::info!(
            samples = samples.len(),
            sample_rate = audio.sample_rate,
            "Running diarization"
        );

        let segment_iter = get_segments(
            &samples,
            audio.sample_rate,
            &self.config.segmentation_model_path,
        )
        .map_err(|e| ParlanceError::model_inference(format!("segmentation failed: {e}")))?;

        // Session-local clustering: reset per file.
        let mut embedding_manager = EmbeddingManager::new(self.config.max_speakers);
        let mut segments: Vec<Segment> = Vec::new();

        for segment_result in segment_iter {
            let raw = match segment_result {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Skipping undecodable speech segment: {e}");
                    continue;
                }
            };

            let speaker = match self.embedding_extractor.compute(&raw.samples) {
                Ok(embedding) => {
                    let embedding: Vec<f32> = embedding.collect();
                    match embedding_manager
                        .search_speaker(embedding, self.config.similarity_threshold)
                    {
                        Some(idx) => format!("Speaker {}", idx + 1),
                        // Speaker capacity exhausted.
                        None => parlance_transcript::UNKNOWN_SPEAKER.to_string(),
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        start_secs = raw.start,
                        end_secs = raw.end,
                        "Embedding failed for segment, labeling unknown: {e}"
                    );
                    parlance_transcript::UNKNOWN_SPEAKER.to_string()
                }
            };

            tracing::debug!(
                start_secs = raw.start,
                end_secs = raw.end,
                speaker = %speaker,
                "Diarized segment"
            );
            segments.push(Segment::new(speaker, raw.start, raw.end));
        }

        // The model emits segments in time order; enforce it anyway since
        // downstream alignment and turn merging rely on it.
        segments.sort_by(|a, b| a.start_secs.total_cmp(&b.start_secs));

        tracing::info!(segments = segments.len(), "Diarization complete");
        Ok(segments)
    }
}
