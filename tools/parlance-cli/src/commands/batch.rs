//! Transcribe every audio file under a folder.

use std::path::PathBuf;

use parlance_common::AppConfig;
use parlance_pipeline::{discover_sources, run_batch, FileOutcome};

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &AppConfig,
    root: PathBuf,
    output_dir: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    whisper_model: Option<String>,
    language: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let extensions = extensions.unwrap_or_else(|| config.transcription.extensions.clone());
    let mut pipeline = super::build_pipeline(config, whisper_model, language)?;

    let report = run_batch(discover_sources(&root, &extensions), |source| {
        let output = match &output_dir {
            Some(dir) => source.transcript_path_under(&root, dir),
            None => source.transcript_path(),
        };
        if output.exists() && !force {
            return Ok(FileOutcome::SkippedExisting(output));
        }
        pipeline.process_file(&source.path, &output)?;
        Ok(FileOutcome::Written(output))
    });

    println!(
        "Processed {} file(s): {} written, {} skipped, {} failed",
        report.total(),
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    );

    if !report.is_success() {
        for (path, error) in &report.failed {
            eprintln!("  {}: {}", path.display(), error);
        }
        anyhow::bail!("{} file(s) failed", report.failed.len());
    }

    Ok(())
}
