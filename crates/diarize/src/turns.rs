//! Merging of raw diarization segments into speaker turns.
//!
//! The raw model output slices speech finely; for transcript alignment it is
//! better to work with longer same-speaker turns. Consecutive segments from
//! the same speaker are merged while the running turn stays short, slivers
//! under a second are absorbed into the current turn, and a hard duration
//! cap forces a split so a monologue cannot grow without bound.

use parlance_transcript::Segment;
use serde::{Deserialize, Serialize};

/// Thresholds controlling turn merging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurnMergeConfig {
    /// Merge freely while the running turn is shorter than this.
    pub merge_below_secs: f64,
    /// Segments shorter than this are absorbed even past `merge_below_secs`,
    /// after which the turn is closed.
    pub sliver_secs: f64,
    /// Never grow a turn beyond this.
    pub max_turn_secs: f64,
}

impl Default for TurnMergeConfig {
    fn default() -> Self {
        Self {
            merge_below_secs: 60.0,
            sliver_secs: 1.0,
            max_turn_secs: 120.0,
        }
    }
}

/// Merge consecutive same-speaker segments into turns.
///
/// Input must be time-ordered; speaker changes always split.
pub fn merge_turns(segments: &[Segment], config: &TurnMergeConfig) -> Vec<Segment> {
    let mut iter = segments.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut turns: Vec<Segment> = vec![first.clone()];
    let mut force_split = false;

    for segment in iter {
        let current = turns.last_mut().expect("turns is never empty here");

        if force_split || current.speaker != segment.speaker {
            turns.push(segment.clone());
            force_split = false;
            continue;
        }

        let grown = segment.end_secs - current.start_secs;

        if grown < config.merge_below_secs {
            current.end_secs = segment.end_secs;
            continue;
        }

        // Past the merge threshold: absorb a trailing sliver, then split.
        if segment.duration_secs() < config.sliver_secs {
            current.end_secs = segment.end_secs;
            force_split = true;
            continue;
        }

        if grown < config.max_turn_secs {
            current.end_secs = segment.end_secs;
            continue;
        }

        turns.push(segment.clone());
    }

    turns
}
