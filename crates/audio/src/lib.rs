//! Parlance Audio Loading
//!
//! Normalizes arbitrary input audio into the canonical buffer both inference
//! engines expect: mono f32 at 16 kHz. WAV files are decoded directly with
//! `hound`; anything else is converted through the system `ffmpeg` binary
//! first.

pub mod convert;
pub mod loader;

pub use loader::*;
