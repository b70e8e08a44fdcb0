//! Parlance Speech Recognition
//!
//! Wraps whisper.cpp (via `whisper-rs`) into a [`Transcriber`] that turns a
//! normalized audio buffer into an ordered sequence of timestamped
//! [`Fragment`]s. The model context is loaded once and reused read-only; a
//! fresh inference state is created per call.

use std::path::PathBuf;

use parlance_audio::AudioBuffer;
use parlance_common::{ParlanceError, ParlanceResult};
use parlance_transcript::Fragment;
use serde::{Deserialize, Serialize};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Configuration for the speech-recognition engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to the whisper GGML model file.
    pub model_path: PathBuf,
    /// Language hint (ISO 639-1 code); None lets whisper auto-detect.
    pub language: Option<String>,
    /// Translate to English instead of transcribing in-language.
    pub translate: bool,
    /// Number of CPU threads for inference; None uses whisper's default.
    pub threads: Option<i32>,
}

impl TranscriberConfig {
    pub fn new(model_path: PathBuf) -> Self {
        Self {
            model_path,
            language: None,
            translate: false,
            threads: None,
        }
    }
}

/// Speech-recognition engine.
pub struct Transcriber {
    config: TranscriberConfig,
    context: WhisperContext,
}

impl Transcriber {
    /// Load the whisper model. This is the expensive step; the returned
    /// engine is reused across files.
    pub fn new(config: TranscriberConfig) -> ParlanceResult<Self> {
        if !config.model_path.exists() {
            return Err(ParlanceError::config(format!(
                "whisper model not found at {}; run `parlance fetch-models` first",
                config.model_path.display()
            )));
        }

        let context = WhisperContext::new_with_params(
            &config.model_path.to_string_lossy(),
            WhisperContextParameters::default(),
        )
        .map_err(|e| {
            ParlanceError::model_inference(format!(
                "failed to load whisper model {}: {e}",
                config.model_path.display()
            ))
        })?;

        tracing::info!(model = %config.model_path.display(), "Transcriber initialized");

        Ok(Self { config, context })
    }

    /// Transcribe one audio buffer into time-ordered fragments.
    ///
    /// Whisper reports segment bounds in centiseconds; they are converted to
    /// seconds here. Empty segments are dropped.
    pub fn transcribe(&self, audio: &AudioBuffer) -> ParlanceResult<Vec<Fragment>> {
        tracing::info!(
            duration_secs = audio.duration_secs(),
            "Running speech recognition"
        );

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(self.config.language.as_deref());
        params.set_translate(self.config.translate);
        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads);
        }
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_suppress_blank(true);
        params.set_no_context(true);

        let mut state = self
            .context
            .create_state()
            .map_err(|e| ParlanceError::model_inference(format!("whisper state: {e}")))?;

        state
            .full(params, &audio.samples)
            .map_err(|e| ParlanceError::model_inference(format!("whisper inference: {e}")))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| ParlanceError::model_inference(format!("whisper segments: {e}")))?;

        let mut fragments = Vec::with_capacity(num_segments as usize);
        for i in 0..num_segments {
            let text = match state.full_get_segment_text_lossy(i) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(segment = i, "Skipping unreadable whisper segment: {e}");
                    continue;
                }
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let start_cs = state.full_get_segment_t0(i).unwrap_or(0);
            let end_cs = state.full_get_segment_t1(i).unwrap_or(start_cs);

            fragments.push(Fragment::new(
                text,
                start_cs as f64 / 100.0,
                end_cs as f64 / 100.0,
            ));
        }

        tracing::info!(fragments = fragments.len(), "Speech recognition complete");
        Ok(fragments)
    }
}
