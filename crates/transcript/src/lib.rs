//! Parlance Transcript Model
//!
//! The shared data model for one transcription run:
//! - **Segment:** a timestamped unit of speaker attribution (from diarization)
//! - **Fragment:** a timestamped unit of recognized text (from speech-to-text)
//! - **TranscriptRecord / Transcript:** the merged, speaker-labeled output
//!
//! Plus the two operations that tie them together: overlap-based alignment
//! and the plain-text writer/parser.

pub mod align;
pub mod types;
pub mod writer;

pub use align::*;
pub use types::*;
pub use writer::*;
