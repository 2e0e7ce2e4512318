// src/analyze/scoring.rs
//! Contextual scorer: walks the tokens once and accumulates a raw score per
//! emotion category.
//!
//! For every keyword occurrence (base = `tuning.base_score`):
//! 1) modifier:  the pending intensifier/diminisher, if it ends within
//!                `modifier_window` tokens, scales the base. The keyword always
//!                consumes the pending anchor, so one modifier never amplifies
//!                two keywords ("very very happy" counts once).
//! 2) negation:  a negator within `negation_window` tokens in the same sentence
//!                routes `base * negation_transfer` to the opposite category
//!                instead of the keyword's own.
//! 3) contrast:  a contrast word within `contrast_window` tokens *before* the
//!                keyword walks back the keyword category's accumulator
//!                (`* contrast_factor`).
//!
//! After the pass, if any contrast word was seen and both polarity groups scored,
//! the weaker group is scaled by `balance_factor`.

use super::tokenize::Token;
use crate::emotion::{Polarity, ScoreVector};
use crate::lexicon::{ModifierKind, Tables};

/// Raw scorer output for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub scores: ScoreVector,
    pub negation_detected: bool,
    pub contrast_detected: bool,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    pos: usize, // last token of the (possibly multi-word) modifier
    sentence: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingModifier {
    kind: ModifierKind,
    at: Anchor,
}

pub fn score_tokens(tokens: &[Token], tables: &Tables) -> ScoreOutcome {
    let t = &tables.tuning;
    let mut scores = ScoreVector::new();
    let mut negators: Vec<Anchor> = Vec::new();
    let mut contrasts: Vec<Anchor> = Vec::new();
    let mut pending: Option<PendingModifier> = None;

    let mut i = 0;
    while i < tokens.len() {
        if let Some((kind, len)) = tables.modifiers.match_at(tokens, i) {
            let last = i + len - 1;
            let at = Anchor {
                pos: last,
                sentence: tokens[last].sentence,
            };
            match kind {
                ModifierKind::Negator => negators.push(at),
                ModifierKind::Contrast => contrasts.push(at),
                ModifierKind::Intensifier | ModifierKind::Diminisher => {
                    pending = Some(PendingModifier { kind, at })
                }
            }
            i += len;
            continue;
        }

        let tok = &tokens[i];
        let Some(cat) = tables.lexicon.category_of(&tok.text) else {
            i += 1;
            continue;
        };

        let mut base = t.base_score;
        if let Some(m) = pending.take() {
            if m.at.sentence == tok.sentence && i - m.at.pos <= t.modifier_window {
                base *= match m.kind {
                    ModifierKind::Intensifier => t.intensifier_factor,
                    _ => t.diminisher_factor,
                };
            }
        }

        let negated = negators
            .iter()
            .rev()
            .take_while(|a| i - a.pos <= t.negation_window)
            .any(|a| a.sentence == tok.sentence);

        if negated {
            scores[tables.opposites.of(cat)] += base * t.negation_transfer;
        } else {
            scores[cat] += base;
        }

        let contrast_before = contrasts
            .last()
            .is_some_and(|a| i - a.pos <= t.contrast_window);
        if contrast_before {
            scores[cat] *= t.contrast_factor;
        }

        i += 1;
    }

    let contrast_detected = !contrasts.is_empty();
    if contrast_detected {
        balance_clauses(&mut scores, t.balance_factor);
    }

    ScoreOutcome {
        scores,
        negation_detected: !negators.is_empty(),
        contrast_detected,
    }
}

/// Mixed clauses: keep the stronger polarity, damp the weaker one.
fn balance_clauses(scores: &mut ScoreVector, factor: f64) {
    let pos = scores.polarity_total(Polarity::Positive);
    let neg = scores.polarity_total(Polarity::Negative);
    if pos <= 0.0 || neg <= 0.0 {
        return;
    }
    if pos > neg {
        scores.scale_polarity(Polarity::Negative, factor);
    } else if neg > pos {
        scores.scale_polarity(Polarity::Positive, factor);
    }
}
