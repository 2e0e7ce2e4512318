// src/analyze/aggregate.rs
//! Aggregator: raw ScoreVector -> percentage distribution, dominant emotion,
//! positive/negative/neutral sentiment.
//!
//! Order:
//! 1) sarcasm inversion: positive-group mass moves to the negative group
//!    (split from `[sarcasm.inversion]`)
//! 2) distribution[c] = round2(100 * |score[c]| / sum |score|); all zero if the sum is 0
//! 3) dominant = max raw score above `dominance_floor`, else neutral
//! 4) sentiment: each polarity group's share of the unrounded total, rounded
//!    once. If sarcastic and the positive share still leads, positive and
//!    negative are swapped. Neutral is the rest.
//!
//! Distribution values are rounded independently, so they sum to 100 only
//! approximately. Sentiment values stay within [0, 100].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::scoring::ScoreOutcome;
use crate::emotion::{Emotion, EmotionCategory, Polarity, ScoreVector};
use crate::lexicon::Tables;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Final record returned to callers; serializes to the public JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub emotion: Emotion,
    pub emotion_distribution: BTreeMap<EmotionCategory, f64>,
    pub sentiment: Sentiment,
    pub negation_detected: bool,
    pub sarcasm_detected: bool,
}

impl AnalysisResult {
    /// Percentage for one category (0 if absent).
    pub fn distribution(&self, cat: EmotionCategory) -> f64 {
        self.emotion_distribution.get(&cat).copied().unwrap_or(0.0)
    }
}

pub fn aggregate(
    text: &str,
    outcome: &ScoreOutcome,
    sarcasm_detected: bool,
    tables: &Tables,
) -> AnalysisResult {
    let mut scores = outcome.scores;
    if sarcasm_detected {
        invert_positive(&mut scores, tables.sarcasm.inversion());
    }

    let total = scores.total_abs();
    let (emotion_distribution, emotion) = if total <= 0.0 {
        let zero: BTreeMap<EmotionCategory, f64> =
            EmotionCategory::ALL.into_iter().map(|c| (c, 0.0)).collect();
        (zero, Emotion::Neutral)
    } else {
        let dist: BTreeMap<EmotionCategory, f64> = scores
            .iter()
            .map(|(c, v)| (c, round2(100.0 * v.abs() / total)))
            .collect();
        (dist, dominant(&scores, tables.tuning.dominance_floor))
    };

    let sentiment = sentiment(&scores, total, sarcasm_detected);

    AnalysisResult {
        text: text.to_string(),
        emotion,
        emotion_distribution,
        sentiment,
        negation_detected: outcome.negation_detected,
        sarcasm_detected,
    }
}

fn invert_positive(scores: &mut ScoreVector, split: &[(EmotionCategory, f64)]) {
    for c in EmotionCategory::ALL {
        if c.polarity() != Polarity::Positive || scores[c] <= 0.0 {
            continue;
        }
        let mass = scores[c];
        for (target, share) in split {
            scores[*target] += mass * share;
        }
        scores[c] = 0.0;
    }
}

/// Highest score strictly above `floor`; ties keep declaration order.
fn dominant(scores: &ScoreVector, floor: f64) -> Emotion {
    let mut best: Option<(EmotionCategory, f64)> = None;
    for (c, v) in scores.iter() {
        if v > floor && best.map_or(true, |(_, b)| v > b) {
            best = Some((c, v));
        }
    }
    best.map(|(c, _)| c.into()).unwrap_or(Emotion::Neutral)
}

fn sentiment(scores: &ScoreVector, total: f64, sarcasm_detected: bool) -> Sentiment {
    if total <= 0.0 {
        return Sentiment {
            positive: 0.0,
            negative: 0.0,
            neutral: 100.0,
        };
    }
    // Summing already-rounded percentages can overshoot 100 (e.g. 100.01).
    let share = |p: Polarity| -> f64 {
        let mass: f64 = scores
            .iter()
            .filter(|(c, _)| c.polarity() == p)
            .map(|(_, v)| v.abs())
            .sum();
        round2(100.0 * mass / total).clamp(0.0, 100.0)
    };
    let mut positive = share(Polarity::Positive);
    let mut negative = share(Polarity::Negative);

    // Surface-positive wording is negative when sarcastic. Inversion already
    // moved the mass, so only swap if positive still leads.
    if sarcasm_detected && positive > negative {
        std::mem::swap(&mut positive, &mut negative);
    }

    let neutral = round2((100.0 - positive - negative).max(0.0));
    Sentiment {
        positive,
        negative,
        neutral,
    }
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
