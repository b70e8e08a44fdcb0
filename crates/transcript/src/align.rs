//! Overlap-based alignment of diarization segments and recognized text.
//!
//! Policy: each fragment is assigned the speaker of the segment whose
//! `[start, end)` interval overlaps it the most. Ties go to the segment that
//! starts earlier. A fragment no segment overlaps gets [`UNKNOWN_SPEAKER`].
//! Fragment time order is preserved.

use crate::types::{Fragment, Segment, Transcript, TranscriptRecord, UNKNOWN_SPEAKER};

/// Overlap in seconds between two `[start, end)` intervals.
fn overlap_secs(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0.0)
}

/// Pick the segment with maximal overlap for one fragment.
///
/// Returns None when no segment overlaps the fragment at all.
fn best_segment<'a>(segments: &'a [Segment], fragment: &Fragment) -> Option<&'a Segment> {
    let mut best: Option<(&Segment, f64)> = None;

    for segment in segments {
        let overlap = overlap_secs(
            segment.start_secs,
            segment.end_secs,
            fragment.start_secs,
            fragment.end_secs,
        );
        if overlap <= 0.0 {
            continue;
        }
        // Strictly-greater keeps the earlier segment on ties; segments
        // arrive time-ordered from the diarizer.
        match best {
            Some((_, best_overlap)) if overlap <= best_overlap => {}
            _ => best = Some((segment, overlap)),
        }
    }

    best.map(|(segment, _)| segment)
}

/// Merge diarization segments with transcription fragments into a transcript.
pub fn align(segments: &[Segment], fragments: &[Fragment]) -> Transcript {
    let records = fragments
        .iter()
        .map(|fragment| {
            let speaker = best_segment(segments, fragment)
                .map(|segment| segment.speaker.clone())
                .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());

            TranscriptRecord {
                speaker,
                text: fragment.text.clone(),
                start_secs: fragment.start_secs,
                end_secs: fragment.end_secs,
            }
        })
        .collect();

    Transcript::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seg(speaker: &str, start: f64, end: f64) -> Segment {
        Segment::new(speaker, start, end)
    }

    fn frag(text: &str, start: f64, end: f64) -> Fragment {
        Fragment::new(text, start, end)
    }

    #[test]
    fn test_two_speaker_scenario() {
        let segments = vec![seg("A", 0.0, 5.0), seg("B", 5.0, 10.0)];
        let fragments = vec![frag("hello", 1.0, 4.0), frag("world", 6.0, 9.0)];

        let transcript = align(&segments, &fragments);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.records[0].speaker, "A");
        assert_eq!(transcript.records[0].text, "hello");
        assert_eq!(transcript.records[1].speaker, "B");
        assert_eq!(transcript.records[1].text, "world");
    }

    #[test]
    fn test_fragment_straddling_boundary_takes_larger_overlap() {
        let segments = vec![seg("A", 0.0, 5.0), seg("B", 5.0, 10.0)];
        // 1s inside A, 3s inside B.
        let fragments = vec![frag("mostly b", 4.0, 8.0)];

        let transcript = align(&segments, &fragments);
        assert_eq!(transcript.records[0].speaker, "B");
    }

    #[test]
    fn test_exact_tie_goes_to_earlier_segment() {
        let segments = vec![seg("A", 0.0, 5.0), seg("B", 5.0, 10.0)];
        // 2s in each.
        let fragments = vec![frag("split", 3.0, 7.0)];

        let transcript = align(&segments, &fragments);
        assert_eq!(transcript.records[0].speaker, "A");
    }

    #[test]
    fn test_no_overlap_gets_unknown_sentinel() {
        let segments = vec![seg("A", 0.0, 5.0)];
        let fragments = vec![frag("late", 20.0, 22.0)];

        let transcript = align(&segments, &fragments);
        assert_eq!(transcript.records[0].speaker, UNKNOWN_SPEAKER);
    }

    #[test]
    fn test_zero_segments_labels_everything_unknown() {
        let fragments = vec![frag("a", 0.0, 1.0), frag("b", 1.0, 2.0)];

        let transcript = align(&[], &fragments);
        assert_eq!(transcript.len(), 2);
        assert!(transcript
            .records
            .iter()
            .all(|r| r.speaker == UNKNOWN_SPEAKER));
    }

    #[test]
    fn test_empty_fragments_yield_empty_transcript() {
        let segments = vec![seg("A", 0.0, 5.0)];
        assert!(align(&segments, &[]).is_empty());
    }

    #[test]
    fn test_fragment_order_is_preserved() {
        let segments = vec![seg("A", 0.0, 100.0)];
        let fragments = vec![
            frag("one", 0.0, 1.0),
            frag("two", 1.0, 2.0),
            frag("three", 2.0, 3.0),
        ];

        let texts: Vec<_> = align(&segments, &fragments)
            .records
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    /// Generate non-overlapping, time-ordered segments the way a diarizer
    /// produces them.
    fn arb_segments() -> impl Strategy<Value = Vec<Segment>> {
        prop::collection::vec((0.1f64..5.0, 0.0f64..2.0), 0..8).prop_map(|spans| {
            let mut cursor = 0.0;
            spans
                .into_iter()
                .enumerate()
                .map(|(i, (duration, gap))| {
                    let start = cursor + gap;
                    cursor = start + duration;
                    Segment::new(format!("Speaker {}", i % 3 + 1), start, cursor)
                })
                .collect()
        })
    }

    fn arb_fragments() -> impl Strategy<Value = Vec<Fragment>> {
        prop::collection::vec((0.0f64..30.0, 0.1f64..4.0), 0..12).prop_map(|spans| {
            let mut fragments: Vec<Fragment> = spans
                .into_iter()
                .enumerate()
                .map(|(i, (start, duration))| {
                    Fragment::new(format!("f{i}"), start, start + duration)
                })
                .collect();
            fragments.sort_by(|a, b| a.start_secs.total_cmp(&b.start_secs));
            fragments
        })
    }

    proptest! {
        /// Every fragment gets exactly one label, and whenever any segment
        /// overlaps a fragment the assigned label achieves the maximum
        /// overlap among all segments.
        #[test]
        fn prop_every_fragment_gets_max_overlap_label(
            segments in arb_segments(),
            fragments in arb_fragments(),
        ) {
            let transcript = align(&segments, &fragments);
            prop_assert_eq!(transcript.len(), fragments.len());

            for (record, fragment) in transcript.records.iter().zip(&fragments) {
                let max_overlap = segments
                    .iter()
                    .map(|s| overlap_secs(
                        s.start_secs, s.end_secs,
                        fragment.start_secs, fragment.end_secs,
                    ))
                    .fold(0.0f64, f64::max);

                if max_overlap > 0.0 {
                    prop_assert_ne!(&record.speaker, UNKNOWN_SPEAKER);
                    let assigned_overlap = segments
                        .iter()
                        .filter(|s| s.speaker == record.speaker)
                        .map(|s| overlap_secs(
                            s.start_secs, s.end_secs,
                            fragment.start_secs, fragment.end_secs,
                        ))
                        .fold(0.0f64, f64::max);
                    prop_assert!((assigned_overlap - max_overlap).abs() < 1e-12);
                } else {
                    prop_assert_eq!(&record.speaker, UNKNOWN_SPEAKER);
                }
            }
        }
    }
}
