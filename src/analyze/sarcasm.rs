// src/analyze/sarcasm.rs
//! Sarcasm detector: an ordered rule chain over the lowercased text.
//!
//! Rules, in priority order:
//! 1. `phrase`:                 template phrase or pattern ("oh great", "isn't this just ...").
//!                               Decisive: detection is immediate and the chain stops.
//! 2. `positive_then_negative`: a positive keyword followed, within a few tokens,
//!                               by a negative-context marker ("great ... broke ... again").
//! 3. `quoted_positive`:        a positive keyword in quotes ("your 'lovely' idea").
//! 4. `exclaimed_positive`:     a positive keyword directly followed by `!`.
//!
//! Non-decisive rules add their points; detection fires once the sum reaches
//! the threshold. Confidence = min(score / 10, 1).
//!
//! Pure function of the text and the static tables.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;

use super::tokenize::{normalize, Token};
use crate::emotion::{EmotionCategory, Polarity};
use crate::lexicon::{Lexicon, SarcasmCfg};

// Boundaries around the quotes are checked by hand in `quoted_words`, so a
// match never eats the opening quote of the next word.
static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'“]([\p{L}]+)["'”]"#).expect("quoted word regex"));

/// Words wrapped in quotes that are not glued to a neighbouring letter or
/// digit, so contractions ("i'm", "don't") never open or close a quote.
fn quoted_words(text: &str) -> impl Iterator<Item = &str> + '_ {
    let glued = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
    QUOTED_RE.captures_iter(text).filter_map(move |c| {
        let m = c.get(0)?;
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if glued(before) || glued(after) {
            return None;
        }
        c.get(1).map(|w| w.as_str())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SarcasmSignal {
    Phrase,
    PositiveThenNegative,
    QuotedPositive,
    ExclaimedPositive,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    signal: SarcasmSignal,
    points: f64,
    decisive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SarcasmVerdict {
    pub detected: bool,
    pub score: f64,
    pub confidence: f64,
    pub signals: Vec<SarcasmSignal>,
}

impl SarcasmVerdict {
    fn none() -> Self {
        Self {
            detected: false,
            score: 0.0,
            confidence: 0.0,
            signals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SarcasmDetector {
    phrases: Vec<Regex>,
    markers: HashSet<String>,
    window: usize,
    threshold: f64,
    rules: Vec<Rule>,
    inversion: Vec<(EmotionCategory, f64)>,
}

impl SarcasmDetector {
    pub fn build(cfg: &SarcasmCfg) -> Result<Self> {
        let points = [
            ("threshold", cfg.threshold),
            ("phrase_points", cfg.phrase_points),
            ("cooccurrence_points", cfg.cooccurrence_points),
            ("quoted_points", cfg.quoted_points),
            ("exclaimed_points", cfg.exclaimed_points),
        ];
        for (name, v) in points {
            if !v.is_finite() || v < 0.0 {
                bail!("sarcasm.{name} must be a finite non-negative number, got {v}");
            }
        }

        let mut phrases = Vec::with_capacity(cfg.phrases.len() + cfg.patterns.len());
        for raw in &cfg.phrases {
            let p = normalize(raw);
            if p.is_empty() {
                bail!("empty sarcasm phrase");
            }
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(&p)))
                .with_context(|| format!("sarcasm phrase '{p}'"))?;
            phrases.push(re);
        }
        for raw in &cfg.patterns {
            let re = RegexBuilder::new(raw)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("sarcasm pattern '{raw}'"))?;
            phrases.push(re);
        }

        let markers = cfg
            .negative_markers
            .iter()
            .map(|m| normalize(m))
            .filter(|m| !m.is_empty())
            .collect();

        let mut inversion = Vec::with_capacity(cfg.inversion.len());
        let mut share_sum = 0.0;
        for (name, share) in &cfg.inversion {
            let cat: EmotionCategory = name.parse().context("in [sarcasm.inversion]")?;
            if cat.polarity() != Polarity::Negative {
                bail!("sarcasm inversion target {cat} is not a negative emotion");
            }
            if !share.is_finite() || *share < 0.0 {
                bail!("sarcasm inversion share for {cat} must be non-negative, got {share}");
            }
            share_sum += share;
            inversion.push((cat, *share));
        }
        if (share_sum - 1.0).abs() > 1e-6 {
            bail!("sarcasm inversion shares must sum to 1, got {share_sum}");
        }

        let rules = vec![
            Rule {
                signal: SarcasmSignal::Phrase,
                points: cfg.phrase_points,
                decisive: true,
            },
            Rule {
                signal: SarcasmSignal::PositiveThenNegative,
                points: cfg.cooccurrence_points,
                decisive: false,
            },
            Rule {
                signal: SarcasmSignal::QuotedPositive,
                points: cfg.quoted_points,
                decisive: false,
            },
            Rule {
                signal: SarcasmSignal::ExclaimedPositive,
                points: cfg.exclaimed_points,
                decisive: false,
            },
        ];

        Ok(Self {
            phrases,
            markers,
            window: cfg.cooccurrence_window,
            threshold: cfg.threshold,
            rules,
            inversion,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Where positive mass goes when sarcasm flips an analysis.
    pub fn inversion(&self) -> &[(EmotionCategory, f64)] {
        &self.inversion
    }

    /// `text` must already be normalized and `tokens` must come from it
    /// (`tokenize_normalized`), so token spans index into `text`.
    pub fn detect(&self, text: &str, tokens: &[Token], lexicon: &Lexicon) -> SarcasmVerdict {
        if text.is_empty() {
            return SarcasmVerdict::none();
        }

        let mut score = 0.0;
        let mut signals = Vec::new();
        let mut decided = false;
        for rule in &self.rules {
            if !self.fires(rule.signal, text, tokens, lexicon) {
                continue;
            }
            score += rule.points;
            signals.push(rule.signal);
            if rule.decisive {
                decided = true;
                break;
            }
        }

        SarcasmVerdict {
            detected: decided || (score > 0.0 && score >= self.threshold),
            score,
            confidence: (score / 10.0).min(1.0),
            signals,
        }
    }

    fn fires(&self, signal: SarcasmSignal, text: &str, tokens: &[Token], lexicon: &Lexicon) -> bool {
        match signal {
            SarcasmSignal::Phrase => self.phrases.iter().any(|re| re.is_match(text)),
            SarcasmSignal::PositiveThenNegative => tokens.iter().enumerate().any(|(i, t)| {
                lexicon.is_positive_keyword(&t.text)
                    && tokens[i + 1..]
                        .iter()
                        .take(self.window)
                        .any(|n| self.markers.contains(&n.text))
            }),
            SarcasmSignal::QuotedPositive => {
                quoted_words(text).any(|w| lexicon.is_positive_keyword(w))
            }
            SarcasmSignal::ExclaimedPositive => tokens.iter().any(|t| {
                lexicon.is_positive_keyword(&t.text) && text[t.end..].trim_start().starts_with('!')
            }),
        }
    }
}
