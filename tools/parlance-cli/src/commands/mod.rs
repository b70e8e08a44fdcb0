pub mod batch;
pub mod fetch_models;
pub mod file;

use std::path::PathBuf;

use parlance_common::AppConfig;
use parlance_models::ModelPaths;
use parlance_pipeline::{PipelineContext, PipelineOptions};

/// Resolve cache paths and fail with guidance when models are missing.
pub(crate) fn resolved_models(
    config: &AppConfig,
    whisper_model: Option<String>,
) -> anyhow::Result<ModelPaths> {
    let whisper_model =
        whisper_model.unwrap_or_else(|| config.transcription.whisper_model.clone());
    let paths = ModelPaths::in_cache(&config.model_cache_dir, &whisper_model);

    let missing = paths.missing();
    if !missing.is_empty() {
        anyhow::bail!(
            "missing model artifacts: {}. Run `parlance fetch-models` first.",
            missing.join(", ")
        );
    }
    Ok(paths)
}

/// Build the pipeline (loads both models; the expensive step).
pub(crate) fn build_pipeline(
    config: &AppConfig,
    whisper_model: Option<String>,
    language: Option<String>,
) -> anyhow::Result<PipelineContext> {
    let models = resolved_models(config, whisper_model)?;
    let options = PipelineOptions {
        language: language.or_else(|| config.transcription.language.clone()),
        ..Default::default()
    };
    Ok(PipelineContext::new(&models, options)?)
}

/// Model cache directory, honoring an explicit override.
pub(crate) fn cache_dir(config: &AppConfig, model_dir: Option<PathBuf>) -> PathBuf {
    model_dir.unwrap_or_else(|| config.model_cache_dir.clone())
}
