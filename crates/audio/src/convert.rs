//! Container conversion via the system `ffmpeg` binary.
//!
//! Anything hound cannot read (mp3, mp4, m4a, flac, ogg, ...) is transcoded
//! to 16 kHz mono pcm_s16le WAV in a scratch directory before decoding.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use parlance_common::{ParlanceError, ParlanceResult};

/// Whether an `ffmpeg` binary is reachable on PATH.
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Convert `input` to a canonical WAV file inside `output_dir`.
///
/// Returns the path of the converted file.
pub fn convert_to_wav(input: &Path, output_dir: &Path) -> ParlanceResult<PathBuf> {
    if !ffmpeg_available() {
        return Err(ParlanceError::unsupported_format(format!(
            "{}: ffmpeg is required to read non-WAV audio but was not found on PATH",
            input.display()
        )));
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "converted".to_string());
    let output = output_dir.join(format!("{stem}.wav"));

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        "Converting to WAV via ffmpeg"
    );

    let result = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
        .arg(&output)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            ParlanceError::unsupported_format(format!("failed to start ffmpeg: {e}"))
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ParlanceError::unsupported_format(format!(
            "ffmpeg failed on {} ({}): {}",
            input.display(),
            result.status,
            tail
        )));
    }

    Ok(output)
}
