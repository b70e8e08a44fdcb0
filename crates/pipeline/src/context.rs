//! Single-file transcription pipeline.

use std::path::Path;

use parlance_common::ParlanceResult;
use parlance_diarize::{merge_turns, Diarizer, DiarizerConfig, TurnMergeConfig};
use parlance_models::ModelPaths;
use parlance_transcribe::{Transcriber, TranscriberConfig};
use parlance_transcript::{align, write_transcript, Transcript};

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Language hint forwarded to whisper.
    pub language: Option<String>,
    /// Turn merging thresholds.
    pub turn_merge: TurnMergeConfig,
}

/// All loaded model state for the pipeline.
///
/// Built once (model loading is expensive) and reused across files; nothing
/// in here is mutated between files except the diarizer's per-call session
/// state, which it resets itself.
pub struct PipelineContext {
    diarizer: Diarizer,
    transcriber: Transcriber,
    options: PipelineOptions,
}

impl PipelineContext {
    /// Load both engines from provisioned model paths.
    pub fn new(models: &ModelPaths, options: PipelineOptions) -> ParlanceResult<Self> {
        let diarizer = Diarizer::new(DiarizerConfig::new(
            models.segmentation.clone(),
            models.embedding.clone(),
        ))?;

        let mut transcriber_config = TranscriberConfig::new(models.whisper.clone());
        transcriber_config.language = options.language.clone();
        let transcriber = Transcriber::new(transcriber_config)?;

        Ok(Self {
            diarizer,
            transcriber,
            options,
        })
    }

    /// Run the full pipeline for one file and write the transcript.
    ///
    /// Surfaces the first error and aborts this file; the caller decides
    /// whether to continue with other files.
    pub fn process_file(&mut self, input: &Path, output: &Path) -> ParlanceResult<Transcript> {
        tracing::info!(input = %input.display(), "Transcribing");

        let audio = parlance_audio::load(input)?;
        tracing::info!(duration_secs = audio.duration_secs(), "Audio loaded");

        let segments = self.diarizer.diarize(&audio)?;
        let turns = merge_turns(&segments, &self.options.turn_merge);
        tracing::info!(
            segments = segments.len(),
            turns = turns.len(),
            "Speaker turns computed"
        );

        let fragments = self.transcriber.transcribe(&audio)?;

        let transcript = align(&turns, &fragments).coalesce();
        write_transcript(&transcript, output)?;

        tracing::info!(
            output = %output.display(),
            records = transcript.len(),
            "Transcript written"
        );
        Ok(transcript)
    }
}
