//! Parlance Speaker Diarization
//!
//! Wraps pyannote segmentation (speech turn detection) and WeSpeaker
//! embedding clustering into one engine that turns a normalized audio buffer
//! into an ordered sequence of speaker-labeled [`Segment`]s.

pub mod engine;
pub mod turns;

pub use engine::*;
pub use turns::*;
