//! Plain-text transcript serialization.
//!
//! One line per record:
//!
//! ```text
//! [00:00:01.000 --> 00:00:04.000] Speaker 1: hello there
//! ```
//!
//! Timestamps carry millisecond precision. Embedded newlines in record text
//! are flattened to spaces so the format stays line-oriented, which makes
//! write → parse the identity on flattened records.

use std::path::Path;

use parlance_common::{ParlanceError, ParlanceResult};

use crate::types::{Transcript, TranscriptRecord};

/// Render a transcript to its plain-text representation.
pub fn render_transcript(transcript: &Transcript) -> String {
    let mut output = String::new();

    for record in &transcript.records {
        output.push_str(&format!(
            "[{} --> {}] {}: {}\n",
            format_timestamp(record.start_secs),
            format_timestamp(record.end_secs),
            record.speaker,
            flatten_text(&record.text),
        ));
    }

    output
}

/// Write a transcript to a file.
pub fn write_transcript(transcript: &Transcript, path: &Path) -> ParlanceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render_transcript(transcript))?;
    Ok(())
}

/// Parse the plain-text representation back into a transcript.
pub fn parse_transcript(content: &str) -> ParlanceResult<Transcript> {
    let mut records = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_line(line).ok_or_else(|| {
            ParlanceError::config(format!(
                "malformed transcript line {}: {:?}",
                line_no + 1,
                line
            ))
        })?;
        records.push(record);
    }

    Ok(Transcript::new(records))
}

fn parse_line(line: &str) -> Option<TranscriptRecord> {
    let rest = line.strip_prefix('[')?;
    let (times, rest) = rest.split_once(']')?;
    let (start, end) = times.split_once(" --> ")?;
    let (speaker, text) = rest.strip_prefix(' ')?.split_once(": ")?;

    Some(TranscriptRecord {
        speaker: speaker.to_string(),
        text: text.to_string(),
        start_secs: parse_timestamp(start)?,
        end_secs: parse_timestamp(end)?,
    })
}

/// Format seconds as `HH:MM:SS.mmm`.
pub fn format_timestamp(secs: f64) -> String {
    let total_ms = (secs * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Parse a `HH:MM:SS.mmm` timestamp back to seconds.
pub fn parse_timestamp(value: &str) -> Option<f64> {
    let (hms, millis) = value.split_once('.')?;
    let mut parts = hms.splitn(3, ':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    let millis: u64 = millis.parse().ok()?;

    Some((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

fn flatten_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transcript() -> Transcript {
        Transcript::new(vec![
            TranscriptRecord {
                speaker: "Speaker 1".into(),
                text: "hello there".into(),
                start_secs: 1.0,
                end_secs: 4.0,
            },
            TranscriptRecord {
                speaker: "Speaker 2".into(),
                text: "general kenobi".into(),
                start_secs: 4.5,
                end_secs: 7.25,
            },
        ])
    }

    #[test]
    fn test_render_one_line_per_record() {
        let rendered = render_transcript(&sample_transcript());
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "[00:00:01.000 --> 00:00:04.000] Speaker 1: hello there"
        );
        assert_eq!(
            lines[1],
            "[00:00:04.500 --> 00:00:07.250] Speaker 2: general kenobi"
        );
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let transcript = sample_transcript();
        let parsed = parse_transcript(&render_transcript(&transcript)).unwrap();
        assert_eq!(parsed, transcript);
    }

    #[test]
    fn test_newlines_in_text_are_flattened() {
        let transcript = Transcript::new(vec![TranscriptRecord {
            speaker: "A".into(),
            text: "line one\nline two".into(),
            start_secs: 0.0,
            end_secs: 1.0,
        }]);

        let rendered = render_transcript(&transcript);
        assert_eq!(rendered.lines().count(), 1);

        let parsed = parse_transcript(&rendered).unwrap();
        assert_eq!(parsed.records[0].text, "line one line two");
    }

    #[test]
    fn test_empty_transcript_renders_empty() {
        assert_eq!(render_transcript(&Transcript::default()), "");
        assert!(parse_transcript("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        assert!(parse_transcript("not a transcript line").is_err());
    }

    #[test]
    fn test_timestamp_formatting() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(3661.5), "01:01:01.500");
        assert_eq!(parse_timestamp("01:01:01.500"), Some(3661.5));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        write_transcript(&sample_transcript(), &path).unwrap();
        let parsed = parse_transcript(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
