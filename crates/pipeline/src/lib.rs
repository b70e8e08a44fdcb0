//! Parlance Pipeline
//!
//! Ties the pieces together: audio loading, diarization, speech recognition,
//! alignment, and output writing for one file ([`context`]), and lazy
//! discovery plus failure-isolated batch processing for folders ([`batch`],
//! [`source`]).

pub mod batch;
pub mod context;
pub mod source;

pub use batch::*;
pub use context::*;
pub use source::*;
