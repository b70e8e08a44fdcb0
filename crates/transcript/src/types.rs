//! Core transcript types.
//!
//! All timestamps are seconds from the start of the audio file.

use serde::{Deserialize, Serialize};

/// Sentinel speaker label for fragments no diarization segment overlaps.
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// A timestamped unit of speaker attribution produced by the diarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Speaker label (e.g. "Speaker 1").
    pub speaker: String,
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds.
    pub end_secs: f64,
}

impl Segment {
    pub fn new(speaker: impl Into<String>, start_secs: f64, end_secs: f64) -> Self {
        Self {
            speaker: speaker.into(),
            start_secs,
            end_secs,
        }
    }

    /// Segment duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// A timestamped unit of recognized text produced by the transcriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Recognized text.
    pub text: String,
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds.
    pub end_secs: f64,
}

impl Fragment {
    pub fn new(text: impl Into<String>, start_secs: f64, end_secs: f64) -> Self {
        Self {
            text: text.into(),
            start_secs,
            end_secs,
        }
    }
}

/// One merged, speaker-labeled unit of the final transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub speaker: String,
    pub text: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// The ordered, speaker-labeled output for one audio file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub records: Vec<TranscriptRecord>,
}

impl Transcript {
    pub fn new(records: Vec<TranscriptRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Drop empty-text records and merge consecutive records from the same
    /// speaker into one block, keeping the earliest start and latest end.
    /// Text of merged records is joined with a single space.
    pub fn coalesce(&self) -> Transcript {
        let mut records: Vec<TranscriptRecord> = Vec::new();

        for record in &self.records {
            if record.text.trim().is_empty() {
                continue;
            }

            match records.last_mut() {
                Some(last) if last.speaker == record.speaker => {
                    last.end_secs = record.end_secs;
                    last.text.push(' ');
                    last.text.push_str(record.text.trim());
                }
                _ => {
                    let mut merged = record.clone();
                    merged.text = merged.text.trim().to_string();
                    records.push(merged);
                }
            }
        }

        Transcript { records }
    }
}
