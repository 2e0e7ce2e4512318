// src/analyze/mod.rs
//! Analysis pipeline entry: tokenize -> sarcasm -> contextual scoring -> aggregate.
//!
//! `EmotionAnalyzer` owns the compiled tables and is immutable after
//! construction, so one instance can be shared across threads. The free
//! function `analyze` uses a lazily built analyzer over the embedded lexicon.

pub mod aggregate;
pub mod debug;
pub mod sarcasm;
pub mod scoring;
pub mod tokenize;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::emotion::ScoreVector;
use crate::lexicon::{LexiconConfig, Tables};

// Re-export convenient types.
pub use crate::analyze::aggregate::{AnalysisResult, Sentiment};
pub use crate::analyze::sarcasm::{SarcasmSignal, SarcasmVerdict};
pub use crate::analyze::scoring::ScoreOutcome;

static DEFAULT_ANALYZER: Lazy<EmotionAnalyzer> = Lazy::new(|| {
    let cfg = LexiconConfig::embedded().expect("embedded lexicon parses");
    EmotionAnalyzer::from_config(cfg).expect("embedded lexicon is valid")
});

/// Full trace of one analysis: the public result plus the raw numbers behind it.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub scores: ScoreVector,
    pub sarcasm: SarcasmVerdict,
    pub contrast_detected: bool,
}

#[derive(Debug, Clone)]
pub struct EmotionAnalyzer {
    tables: Tables,
}

impl EmotionAnalyzer {
    pub fn from_config(cfg: LexiconConfig) -> Result<Self> {
        let tables = Tables::build(&cfg).context("building lexicon tables")?;
        Ok(Self { tables })
    }

    /// Lexicon from `$EMOTION_LEXICON_PATH` (or the embedded one) with env overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_config(LexiconConfig::from_env()?)
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyze_detailed(text).result
    }

    pub fn analyze_detailed(&self, text: &str) -> Analysis {
        let normalized = tokenize::normalize(text);
        let tokens = tokenize::tokenize_normalized(&normalized);
        let sarcasm = self
            .tables
            .sarcasm
            .detect(&normalized, &tokens, &self.tables.lexicon);
        let outcome = scoring::score_tokens(&tokens, &self.tables);
        let result = aggregate::aggregate(text, &outcome, sarcasm.detected, &self.tables);

        // Never log raw text. Only hashed id + outcome.
        debug!(
            target: "emotion",
            id = %anon_hash(text),
            tokens = tokens.len(),
            emotion = %result.emotion,
            negation = result.negation_detected,
            sarcasm = result.sarcasm_detected,
            sarcasm_score = sarcasm.score,
            "text analyzed"
        );

        Analysis {
            result,
            scores: outcome.scores,
            sarcasm,
            contrast_detected: outcome.contrast_detected,
        }
    }
}

/// Shared analyzer over the embedded lexicon.
pub fn default_analyzer() -> &'static EmotionAnalyzer {
    &DEFAULT_ANALYZER
}

/// Analyze with the embedded lexicon.
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(text)
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::{Emotion, EmotionCategory};

    #[test]
    fn detailed_and_plain_agree() {
        let a = default_analyzer();
        let text = "I'm happy but still worried";
        let d = a.analyze_detailed(text);
        assert_eq!(d.result, a.analyze(text));
        assert!(d.contrast_detected);
        assert!(d.scores[EmotionCategory::Joy] > d.scores[EmotionCategory::Fear]);
    }

    #[test]
    fn sarcasm_sees_the_same_tokens_as_scoring() {
        let a = default_analyzer();
        let text = "  PERFECT!   Another   Problem  ";
        let d = a.analyze_detailed(text);
        assert!(d.sarcasm.detected);

        let normalized = tokenize::normalize(text);
        let tokens = tokenize::tokenize_normalized(&normalized);
        let t = a.tables();
        assert_eq!(d.sarcasm, t.sarcasm.detect(&normalized, &tokens, &t.lexicon));
    }

    #[test]
    fn free_function_uses_embedded_lexicon() {
        let r = analyze("I love you");
        assert_eq!(r.emotion, Emotion::Love);
        assert_eq!(r.text, "I love you");
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let h = anon_hash("some text");
        assert_eq!(h.len(), 12);
        assert_eq!(h, anon_hash("some text"));
        assert_ne!(h, anon_hash("other text"));
    }
}
