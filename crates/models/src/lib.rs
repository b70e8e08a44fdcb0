//! Parlance Model Provisioning
//!
//! Downloads and caches the pretrained artifacts the pipeline needs: the
//! pyannote segmentation and speaker-embedding ONNX models, and a whisper.cpp
//! GGML model. Provisioning is a one-time setup step; it is idempotent and a
//! warm cache performs no network access.

pub mod provisioner;
pub mod registry;

pub use provisioner::*;
pub use registry::*;
