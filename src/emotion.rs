// src/emotion.rs
//! Emotion vocabulary shared by the whole crate.
//!
//! - `EmotionCategory`: the six scorable categories (closed set).
//! - `Emotion`: a category or the synthetic `neutral` outcome of an analysis.
//! - `ScoreVector`: per-request accumulator, a fixed array indexed by category,
//!   so a missing key cannot happen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the six scorable emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Love,
}

/// Positive vs negative emotion group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl EmotionCategory {
    pub const COUNT: usize = 6;

    /// Declaration order; also the tie-break order for the dominant emotion.
    pub const ALL: [EmotionCategory; Self::COUNT] = [
        EmotionCategory::Joy,
        EmotionCategory::Sadness,
        EmotionCategory::Anger,
        EmotionCategory::Fear,
        EmotionCategory::Surprise,
        EmotionCategory::Love,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionCategory::Joy => "joy",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Anger => "anger",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Surprise => "surprise",
            EmotionCategory::Love => "love",
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            EmotionCategory::Joy | EmotionCategory::Surprise | EmotionCategory::Love => {
                Polarity::Positive
            }
            EmotionCategory::Sadness | EmotionCategory::Anger | EmotionCategory::Fear => {
                Polarity::Negative
            }
        }
    }

    pub fn is_positive(self) -> bool {
        self.polarity() == Polarity::Positive
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        EmotionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| anyhow::anyhow!("unknown emotion category '{s}'"))
    }
}

/// Dominant emotion of an analysis: a category, or `neutral` when nothing
/// cleared the dominance floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Love,
    Neutral,
}

/// Free-form labels (model outputs, UI strings) onto the shared vocabulary.
/// Order matters for the substring pass: negative forms before the words they contain.
const LABEL_SYNONYMS: &[(&str, Emotion)] = &[
    ("unhappy", Emotion::Sadness),
    ("sadness", Emotion::Sadness),
    ("sad", Emotion::Sadness),
    ("depressed", Emotion::Sadness),
    ("happiness", Emotion::Joy),
    ("happy", Emotion::Joy),
    ("joyful", Emotion::Joy),
    ("joy", Emotion::Joy),
    ("excited", Emotion::Joy),
    ("angry", Emotion::Anger),
    ("anger", Emotion::Anger),
    ("furious", Emotion::Anger),
    ("frustrated", Emotion::Anger),
    ("fearful", Emotion::Fear),
    ("scared", Emotion::Fear),
    ("afraid", Emotion::Fear),
    ("anxious", Emotion::Fear),
    ("worried", Emotion::Fear),
    ("fear", Emotion::Fear),
    ("surprised", Emotion::Surprise),
    ("surprise", Emotion::Surprise),
    ("shocked", Emotion::Surprise),
    ("amazed", Emotion::Surprise),
    ("affectionate", Emotion::Love),
    ("caring", Emotion::Love),
    ("fond", Emotion::Love),
    ("love", Emotion::Love),
    ("neutral", Emotion::Neutral),
    ("calm", Emotion::Neutral),
    ("relaxed", Emotion::Neutral),
    ("bored", Emotion::Neutral),
    ("tired", Emotion::Neutral),
];

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Love,
        Emotion::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self.category() {
            Some(c) => c.as_str(),
            None => "neutral",
        }
    }

    /// The scorable category behind this emotion (`None` for neutral).
    pub fn category(self) -> Option<EmotionCategory> {
        match self {
            Emotion::Joy => Some(EmotionCategory::Joy),
            Emotion::Sadness => Some(EmotionCategory::Sadness),
            Emotion::Anger => Some(EmotionCategory::Anger),
            Emotion::Fear => Some(EmotionCategory::Fear),
            Emotion::Surprise => Some(EmotionCategory::Surprise),
            Emotion::Love => Some(EmotionCategory::Love),
            Emotion::Neutral => None,
        }
    }

    /// Standardize a free-form label. Exact synonym first, then substring
    /// ("very angry" -> anger). Anything unrecognized is neutral.
    pub fn from_label(label: &str) -> Emotion {
        let lower = label.trim().to_lowercase();
        if let Some((_, e)) = LABEL_SYNONYMS.iter().find(|(k, _)| *k == lower) {
            return *e;
        }
        LABEL_SYNONYMS
            .iter()
            .find(|(k, _)| lower.contains(k))
            .map(|(_, e)| *e)
            .unwrap_or(Emotion::Neutral)
    }
}

impl From<EmotionCategory> for Emotion {
    fn from(c: EmotionCategory) -> Self {
        match c {
            EmotionCategory::Joy => Emotion::Joy,
            EmotionCategory::Sadness => Emotion::Sadness,
            EmotionCategory::Anger => Emotion::Anger,
            EmotionCategory::Fear => Emotion::Fear,
            EmotionCategory::Surprise => Emotion::Surprise,
            EmotionCategory::Love => Emotion::Love,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-category accumulator for one analysis. Starts at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreVector([f64; EmotionCategory::COUNT]);

impl ScoreVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cat: EmotionCategory) -> f64 {
        self.0[cat.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, f64)> + '_ {
        EmotionCategory::ALL.into_iter().map(|c| (c, self.0[c.index()]))
    }

    /// Sum of absolute values over all categories.
    pub fn total_abs(&self) -> f64 {
        self.0.iter().map(|v| v.abs()).sum()
    }

    pub fn polarity_total(&self, polarity: Polarity) -> f64 {
        self.iter()
            .filter(|(c, _)| c.polarity() == polarity)
            .map(|(_, v)| v)
            .sum()
    }

    /// Multiply every category of one polarity group by `factor`.
    pub fn scale_polarity(&mut self, polarity: Polarity, factor: f64) {
        for c in EmotionCategory::ALL {
            if c.polarity() == polarity {
                self[c] *= factor;
            }
        }
    }
}

impl Index<EmotionCategory> for ScoreVector {
    type Output = f64;

    fn index(&self, cat: EmotionCategory) -> &f64 {
        &self.0[cat.index()]
    }
}

impl IndexMut<EmotionCategory> for ScoreVector {
    fn index_mut(&mut self, cat: EmotionCategory) -> &mut f64 {
        &mut self.0[cat.index()]
    }
}

// Serialized as a `{category: score}` map, same shape as the distribution.
impl Serialize for ScoreVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(EmotionCategory::COUNT))?;
        for (c, v) in self.iter() {
            map.serialize_entry(&c, &v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_roundtrip_and_polarity() {
        for c in EmotionCategory::ALL {
            assert_eq!(c.as_str().parse::<EmotionCategory>().unwrap(), c);
        }
        assert!(" JOY ".parse::<EmotionCategory>().is_ok());
        assert!("neutral".parse::<EmotionCategory>().is_err());
        assert!(EmotionCategory::Love.is_positive());
        assert_eq!(EmotionCategory::Fear.polarity(), Polarity::Negative);
    }

    #[test]
    fn label_standardization() {
        assert_eq!(Emotion::from_label("Happy"), Emotion::Joy);
        assert_eq!(Emotion::from_label("unhappy"), Emotion::Sadness);
        assert_eq!(Emotion::from_label("very angry"), Emotion::Anger);
        assert_eq!(Emotion::from_label("calm"), Emotion::Neutral);
        assert_eq!(Emotion::from_label("disgust"), Emotion::Neutral);
        assert_eq!(Emotion::from_label(""), Emotion::Neutral);
    }

    #[test]
    fn score_vector_indexing_and_totals() {
        let mut v = ScoreVector::new();
        v[EmotionCategory::Joy] += 2.0;
        v[EmotionCategory::Sadness] += 1.0;
        v[EmotionCategory::Anger] = -0.5;
        assert_eq!(v.get(EmotionCategory::Joy), 2.0);
        assert!((v.total_abs() - 3.5).abs() < 1e-9);
        assert!((v.polarity_total(Polarity::Negative) - 0.5).abs() < 1e-9);

        v.scale_polarity(Polarity::Positive, 0.5);
        assert!((v[EmotionCategory::Joy] - 1.0).abs() < 1e-9);
        assert_eq!(v[EmotionCategory::Sadness], 1.0);
    }

    #[test]
    fn serializes_lowercase() {
        let s = serde_json::to_string(&Emotion::Neutral).unwrap();
        assert_eq!(s, "\"neutral\"");
        let s = serde_json::to_string(&EmotionCategory::Surprise).unwrap();
        assert_eq!(s, "\"surprise\"");

        let mut v = ScoreVector::new();
        v[EmotionCategory::Fear] = 1.5;
        let j = serde_json::to_value(v).unwrap();
        assert_eq!(j["fear"], 1.5);
        assert_eq!(j["joy"], 0.0);
    }
}
