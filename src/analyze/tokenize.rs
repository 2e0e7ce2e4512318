// src/analyze/tokenize.rs
//! Tokenizer: lowercase, collapse whitespace, split into word tokens.
//!
//! - Words are runs of letters/digits; an inner apostrophe keeps contractions
//!   whole ("don't", "i'm").
//! - `.`, `!`, `?`, `;` are not tokens, they close the current sentence.
//!   Negation never reaches across a sentence, so each token carries its
//!   sentence number.
//! - Nothing is filtered: negators and modifiers must stay addressable by position.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*|[.!?;]+").expect("tokenizer regex")
});

/// A single word with byte span (into the normalized text) and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub index: usize, // 0-based token index in the sequence
    pub sentence: usize,
}

/// Lowercase, unify typographic apostrophes, collapse whitespace, trim.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        let ch = match ch {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            c => c,
        };
        if ch.is_whitespace() {
            if !last_space && !out.is_empty() {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            last_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Normalize then tokenize. Empty or whitespace-only input gives no tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_normalized(&normalize(input))
}

/// Tokenize text that already went through `normalize`.
pub fn tokenize_normalized(text: &str) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    let mut sentence = 0;
    for m in TOKEN_RE.find_iter(text) {
        let s = m.as_str();
        if s.starts_with(|c: char| matches!(c, '.' | '!' | '?' | ';')) {
            sentence += 1;
            continue;
        }
        out.push(Token {
            text: s.to_string(),
            start: m.start(),
            end: m.end(),
            index: out.len(),
            sentence,
        });
    }
    out
}
