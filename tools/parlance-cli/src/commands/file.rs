//! Transcribe a single audio file.

use std::path::PathBuf;

use parlance_common::AppConfig;
use parlance_pipeline::AudioSource;

pub fn run(
    config: &AppConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    whisper_model: Option<String>,
    language: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let source = AudioSource::new(input);
    let output = output.unwrap_or_else(|| source.transcript_path());

    if output.exists() && !force {
        println!(
            "Transcript already exists at {} (use --force to overwrite)",
            output.display()
        );
        return Ok(());
    }

    let mut pipeline = super::build_pipeline(config, whisper_model, language)?;
    let transcript = pipeline.process_file(&source.path, &output)?;

    println!(
        "Wrote {} record(s) to {}",
        transcript.len(),
        output.display()
    );
    Ok(())
}
