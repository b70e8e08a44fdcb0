//! Download the diarization and whisper models into the local cache.

use std::path::PathBuf;

use parlance_common::AppConfig;

pub async fn run(
    config: &AppConfig,
    model_dir: Option<PathBuf>,
    whisper_model: Option<String>,
) -> anyhow::Result<()> {
    let cache_dir = super::cache_dir(config, model_dir);
    let whisper_model =
        whisper_model.unwrap_or_else(|| config.transcription.whisper_model.clone());
    let hf_token = AppConfig::hf_token();

    println!("Fetching models into: {}", cache_dir.display());
    if hf_token.is_none() {
        tracing::debug!("No HUGGINGFACE_ACCESS_TOKEN set; downloading anonymously");
    }

    let paths =
        parlance_models::ensure_models(&cache_dir, &whisper_model, hf_token.as_deref()).await?;

    println!("  Segmentation: {}", paths.segmentation.display());
    println!("  Embedding:    {}", paths.embedding.display());
    println!("  Whisper:      {}", paths.whisper.display());
    println!("\nAll models ready.");

    Ok(())
}
