// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod emotion;
pub mod guidance;
pub mod lexicon;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze, AnalysisResult, EmotionAnalyzer, Sentiment};
pub use crate::api::router;
pub use crate::emotion::{Emotion, EmotionCategory};
pub use crate::lexicon::LexiconConfig;
