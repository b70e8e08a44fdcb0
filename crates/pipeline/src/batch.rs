//! Failure-isolated batch processing.
//!
//! One bad file must not abort the rest of the batch: every per-file error
//! is recorded and processing continues, with an aggregate report at the
//! end.

use std::path::PathBuf;

use parlance_common::{ParlanceError, ParlanceResult};

use crate::source::AudioSource;

/// What happened to one file in a batch.
#[derive(Debug)]
pub enum FileOutcome {
    /// A transcript was produced at this path.
    Written(PathBuf),
    /// An up-to-date transcript already existed and `--force` was not given.
    SkippedExisting(PathBuf),
}

/// Aggregate result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, ParlanceError)>,
}

impl BatchReport {
    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files seen.
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }
}

/// Drive `process` over every source, isolating per-file failures.
///
/// `process` is the per-file pipeline; it is injected so the driver stays
/// independent of model state (and trivially testable).
pub fn run_batch<I, F>(sources: I, mut process: F) -> BatchReport
where
    I: IntoIterator<Item = AudioSource>,
    F: FnMut(&AudioSource) -> ParlanceResult<FileOutcome>,
{
    let mut report = BatchReport::default();

    for source in sources {
        match process(&source) {
            Ok(FileOutcome::Written(path)) => {
                tracing::info!(input = %source.path.display(), output = %path.display(), "Done");
                report.written.push(path);
            }
            Ok(FileOutcome::SkippedExisting(path)) => {
                tracing::info!(
                    input = %source.path.display(),
                    output = %path.display(),
                    "Transcript already exists, skipping"
                );
                report.skipped.push(path);
            }
            Err(e) => {
                tracing::error!(input = %source.path.display(), "Failed: {e}");
                report.failed.push((source.path.clone(), e));
            }
        }
    }

    tracing::info!(
        total = report.total(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Batch complete"
    );

    report
}
