// src/lexicon.rs
//! Lexicon & modifier tables: TOML schema, compilation and startup validation.
//!
//! The tables are built once (`Tables::build`) and never mutated afterward.
//! Everything that would otherwise be a runtime lookup failure is rejected here:
//! - a keyword listed under two emotion categories
//! - a word that is both a keyword and a modifier, or two kinds of modifier
//! - an opposite-category table that is not total (or maps a category to itself)
//! - non-finite / negative tuning factors, invalid sarcasm regexes
//!
//! Default config is `config/lexicon.toml`, embedded at build time.
//! `EMOTION_LEXICON_PATH` points to a replacement file;
//! `EMOTION_SARCASM_THRESHOLD` overrides the sarcasm threshold.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyze::sarcasm::SarcasmDetector;
use crate::analyze::tokenize::{normalize, Token};
use crate::emotion::EmotionCategory;

pub const DEFAULT_LEXICON_TOML: &str = include_str!("../config/lexicon.toml");

pub const ENV_LEXICON_PATH: &str = "EMOTION_LEXICON_PATH";
pub const ENV_SARCASM_THRESHOLD: &str = "EMOTION_SARCASM_THRESHOLD";

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub tuning: Tuning,
    pub emotions: BTreeMap<String, Vec<String>>,
    pub opposites: BTreeMap<String, String>,
    #[serde(default)]
    pub modifiers: ModifiersCfg,
    pub sarcasm: SarcasmCfg,
}

/// Scoring constants. Windows are measured in token positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_score: f64,
    pub modifier_window: usize,
    pub intensifier_factor: f64,
    pub diminisher_factor: f64,
    pub negation_window: usize,
    pub negation_transfer: f64,
    pub contrast_window: usize,
    pub contrast_factor: f64,
    pub balance_factor: f64,
    pub dominance_floor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_score: 1.0,
            modifier_window: 2,
            intensifier_factor: 2.0,
            diminisher_factor: 0.3,
            negation_window: 3,
            negation_transfer: 0.7,
            contrast_window: 3,
            contrast_factor: 0.5,
            balance_factor: 0.5,
            dominance_floor: 0.1,
        }
    }
}

impl Tuning {
    fn validate(&self) -> Result<()> {
        let factors = [
            ("base_score", self.base_score),
            ("intensifier_factor", self.intensifier_factor),
            ("diminisher_factor", self.diminisher_factor),
            ("negation_transfer", self.negation_transfer),
            ("contrast_factor", self.contrast_factor),
            ("balance_factor", self.balance_factor),
            ("dominance_floor", self.dominance_floor),
        ];
        for (name, v) in factors {
            if !v.is_finite() || v < 0.0 {
                bail!("tuning.{name} must be a finite non-negative number, got {v}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifiersCfg {
    #[serde(default)]
    pub negators: Vec<String>,
    #[serde(default)]
    pub intensifiers: Vec<String>,
    #[serde(default)]
    pub diminishers: Vec<String>,
    #[serde(default)]
    pub contrast: Vec<String>,
}

fn default_threshold() -> f64 {
    3.0
}
fn default_phrase_points() -> f64 {
    3.0
}
fn default_cooccurrence_points() -> f64 {
    2.0
}
fn default_quoted_points() -> f64 {
    2.0
}
fn default_exclaimed_points() -> f64 {
    1.0
}
fn default_cooccurrence_window() -> usize {
    8
}
fn default_inversion() -> BTreeMap<String, f64> {
    BTreeMap::from([("sadness".to_string(), 0.6), ("anger".to_string(), 0.4)])
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarcasmCfg {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_phrase_points")]
    pub phrase_points: f64,
    #[serde(default = "default_cooccurrence_points")]
    pub cooccurrence_points: f64,
    #[serde(default = "default_quoted_points")]
    pub quoted_points: f64,
    #[serde(default = "default_exclaimed_points")]
    pub exclaimed_points: f64,
    #[serde(default = "default_cooccurrence_window")]
    pub cooccurrence_window: usize,
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Raw regexes (`regex` crate syntax), matched against the lowercased text.
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub negative_markers: Vec<String>,
    /// Category -> share of the inverted positive mass.
    #[serde(default = "default_inversion")]
    pub inversion: BTreeMap<String, f64>,
}

impl LexiconConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("parsing lexicon TOML")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// The default vocabulary compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_LEXICON_TOML)
    }

    /// Load using env var + fallbacks:
    /// 1) $EMOTION_LEXICON_PATH
    /// 2) embedded `config/lexicon.toml`
    ///
    /// then apply `$EMOTION_SARCASM_THRESHOLD` if it parses.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_LEXICON_PATH) {
            Ok(p) if !p.trim().is_empty() => {
                let pb = PathBuf::from(p.trim());
                if !pb.exists() {
                    bail!("{ENV_LEXICON_PATH} points to non-existent path {}", pb.display());
                }
                Self::from_path(&pb)?
            }
            _ => Self::embedded()?,
        };
        if let Some(t) = parse_threshold_env(std::env::var(ENV_SARCASM_THRESHOLD).ok()) {
            cfg.sarcasm.threshold = t;
        }
        Ok(cfg)
    }
}

// parse optional non-negative float env
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/* ----------------------------
Compiled tables
---------------------------- */

/// Keyword -> category index plus the per-category keyword sets.
#[derive(Debug, Clone)]
pub struct Lexicon {
    index: HashMap<String, EmotionCategory>,
    by_category: BTreeMap<EmotionCategory, BTreeSet<String>>,
}

impl Lexicon {
    fn build(emotions: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut index: HashMap<String, EmotionCategory> = HashMap::new();
        let mut by_category: BTreeMap<EmotionCategory, BTreeSet<String>> = BTreeMap::new();

        for (name, words) in emotions {
            let cat: EmotionCategory = name.parse().context("in [emotions]")?;
            let set = by_category.entry(cat).or_default();
            for raw in words {
                let w = normalize(raw);
                if w.is_empty() {
                    bail!("empty keyword under {cat}");
                }
                if w.contains(' ') {
                    bail!("emotion keyword '{w}' must be a single word");
                }
                if let Some(prev) = index.get(&w) {
                    if *prev != cat {
                        bail!("keyword '{w}' listed under both {prev} and {cat}");
                    }
                }
                index.insert(w.clone(), cat);
                set.insert(w);
            }
        }

        for cat in EmotionCategory::ALL {
            if by_category.get(&cat).map_or(true, |s| s.is_empty()) {
                bail!("emotion category {cat} has no keywords");
            }
        }

        Ok(Self { index, by_category })
    }

    #[inline]
    pub fn category_of(&self, word: &str) -> Option<EmotionCategory> {
        self.index.get(word).copied()
    }

    pub fn is_positive_keyword(&self, word: &str) -> bool {
        self.category_of(word).is_some_and(EmotionCategory::is_positive)
    }

    pub fn keywords(&self, cat: EmotionCategory) -> impl Iterator<Item = &str> + '_ {
        self.by_category
            .get(&cat)
            .into_iter()
            .flat_map(|s| s.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Negator,
    Intensifier,
    Diminisher,
    Contrast,
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModifierKind::Negator => "negator",
            ModifierKind::Intensifier => "intensifier",
            ModifierKind::Diminisher => "diminisher",
            ModifierKind::Contrast => "contrast word",
        })
    }
}

/// Negators, intensifiers, diminishers and contrast words. Entries may be
/// multi-word ("a little", "even though"); those are matched longest first.
#[derive(Debug, Clone)]
pub struct ModifierSets {
    entries: HashMap<String, ModifierKind>,
    phrases: Vec<(Vec<String>, ModifierKind)>,
}

impl ModifierSets {
    fn build(cfg: &ModifiersCfg, lexicon: &Lexicon) -> Result<Self> {
        let groups = [
            (ModifierKind::Negator, &cfg.negators),
            (ModifierKind::Intensifier, &cfg.intensifiers),
            (ModifierKind::Diminisher, &cfg.diminishers),
            (ModifierKind::Contrast, &cfg.contrast),
        ];

        let mut entries: HashMap<String, ModifierKind> = HashMap::new();
        let mut phrases: Vec<(Vec<String>, ModifierKind)> = Vec::new();

        for (kind, list) in groups {
            for raw in list {
                let w = normalize(raw);
                if w.is_empty() {
                    bail!("empty {kind} entry");
                }
                if let Some(cat) = lexicon.category_of(&w) {
                    bail!("'{w}' is both a {kind} and a {cat} keyword");
                }
                // a phrase part that is a keyword would be swallowed by `match_at`
                for part in w.split(' ').filter(|p| *p != w) {
                    if let Some(cat) = lexicon.category_of(part) {
                        bail!("{kind} '{w}' contains the {cat} keyword '{part}'");
                    }
                }
                match entries.get(&w) {
                    Some(prev) if *prev != kind => bail!("'{w}' is both a {prev} and a {kind}"),
                    Some(_) => continue,
                    None => {}
                }
                if w.contains(' ') {
                    phrases.push((w.split(' ').map(str::to_string).collect(), kind));
                }
                entries.insert(w, kind);
            }
        }

        // Longest first, so "even though" wins over "though".
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Ok(Self { entries, phrases })
    }

    /// Kind of a (normalized) single word or phrase entry.
    pub fn kind_of(&self, entry: &str) -> Option<ModifierKind> {
        self.entries.get(entry).copied()
    }

    /// Modifier starting at token `i`: its kind and how many tokens it spans.
    /// A multi-word modifier never spans a sentence boundary.
    pub fn match_at(&self, tokens: &[Token], i: usize) -> Option<(ModifierKind, usize)> {
        let first = tokens.get(i)?;
        for (parts, kind) in &self.phrases {
            let end = i + parts.len();
            if end > tokens.len() {
                continue;
            }
            let window = &tokens[i..end];
            if window.iter().zip(parts).all(|(t, p)| t.text == *p)
                && window.iter().all(|t| t.sentence == first.sentence)
            {
                return Some((*kind, parts.len()));
            }
        }
        self.entries.get(&first.text).map(|k| (*k, 1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Total map category -> semantically opposite category, used when a
/// keyword is negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OppositeTable([EmotionCategory; EmotionCategory::COUNT]);

impl OppositeTable {
    fn build(map: &BTreeMap<String, String>) -> Result<Self> {
        let mut parsed: BTreeMap<EmotionCategory, EmotionCategory> = BTreeMap::new();
        for (k, v) in map {
            let from: EmotionCategory = k.parse().context("in [opposites]")?;
            let to: EmotionCategory = v.parse().with_context(|| format!("in [opposites].{k}"))?;
            if from == to {
                bail!("opposite of {from} cannot be {from} itself");
            }
            parsed.insert(from, to);
        }

        let mut table = EmotionCategory::ALL;
        for (slot, cat) in table.iter_mut().zip(EmotionCategory::ALL) {
            *slot = *parsed
                .get(&cat)
                .ok_or_else(|| anyhow!("[opposites] has no entry for {cat}"))?;
        }
        Ok(Self(table))
    }

    pub fn of(&self, cat: EmotionCategory) -> EmotionCategory {
        // ALL is in declaration order, so the discriminant is the slot.
        self.0[cat as usize]
    }
}

/// Everything the analyzer reads: immutable after `build`.
#[derive(Debug, Clone)]
pub struct Tables {
    pub lexicon: Lexicon,
    pub modifiers: ModifierSets,
    pub opposites: OppositeTable,
    pub sarcasm: SarcasmDetector,
    pub tuning: Tuning,
}

impl Tables {
    pub fn build(cfg: &LexiconConfig) -> Result<Self> {
        cfg.tuning.validate()?;
        let lexicon = Lexicon::build(&cfg.emotions)?;
        let modifiers = ModifierSets::build(&cfg.modifiers, &lexicon)?;
        let opposites = OppositeTable::build(&cfg.opposites)?;
        let sarcasm = SarcasmDetector::build(&cfg.sarcasm)?;

        info!(
            target: "emotion",
            keywords = lexicon.len(),
            modifiers = modifiers.len(),
            sarcasm_threshold = sarcasm.threshold(),
            "lexicon tables built"
        );

        Ok(Self {
            lexicon,
            modifiers,
            opposites,
            sarcasm,
            tuning: cfg.tuning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tokenize::tokenize;

    fn tables() -> Tables {
        Tables::build(&LexiconConfig::embedded().unwrap()).unwrap()
    }

    #[test]
    fn embedded_lexicon_is_valid_and_total() {
        let t = tables();
        for cat in EmotionCategory::ALL {
            assert!(t.lexicon.keywords(cat).next().is_some(), "{cat} empty");
            assert_ne!(t.opposites.of(cat), cat);
        }
        assert_eq!(t.opposites.of(EmotionCategory::Joy), EmotionCategory::Sadness);
        assert_eq!(t.opposites.of(EmotionCategory::Sadness), EmotionCategory::Joy);
        assert_eq!(t.tuning, Tuning::default());
    }

    #[test]
    fn keyword_and_modifier_sets_are_disjoint() {
        let t = tables();
        for cat in EmotionCategory::ALL {
            for w in t.lexicon.keywords(cat) {
                assert!(t.modifiers.kind_of(w).is_none(), "'{w}' is also a modifier");
            }
        }
    }

    #[test]
    fn multi_word_modifiers_match_longest_first() {
        let t = tables();
        let toks = tokenize("even though it was a little late");
        assert_eq!(t.modifiers.match_at(&toks, 0), Some((ModifierKind::Contrast, 2)));
        assert_eq!(t.modifiers.match_at(&toks, 1), Some((ModifierKind::Contrast, 1)));
        assert_eq!(t.modifiers.match_at(&toks, 4), Some((ModifierKind::Diminisher, 2)));
        assert_eq!(t.modifiers.match_at(&toks, 3), None);
        assert_eq!(t.modifiers.match_at(&toks, 99), None);
    }

    #[test]
    fn phrase_does_not_span_sentences() {
        let t = tables();
        let toks = tokenize("give me a. little time");
        assert_eq!(t.modifiers.match_at(&toks, 2), None);
    }

    #[test]
    fn threshold_env_parsing() {
        assert_eq!(parse_threshold_env(Some(" 4.5 ".into())), Some(4.5));
        assert_eq!(parse_threshold_env(Some("-1".into())), None);
        assert_eq!(parse_threshold_env(Some("abc".into())), None);
        assert_eq!(parse_threshold_env(None), None);
    }
}
