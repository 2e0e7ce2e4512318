// tests/lexicon_config.rs
//
// Lexicon loading and startup validation: every broken table must be
// rejected before an analyzer exists, and the env overrides must apply.

use emotion_analyzer::lexicon::{
    LexiconConfig, Tables, DEFAULT_LEXICON_TOML, ENV_LEXICON_PATH, ENV_SARCASM_THRESHOLD,
};
use emotion_analyzer::{Emotion, EmotionAnalyzer};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

/* ----------------------------
Inline, deterministic TOML cfg
---------------------------- */
const SMALL_TOML: &str = r#"
[opposites]
joy = "sadness"
love = "sadness"
surprise = "fear"
sadness = "joy"
anger = "joy"
fear = "joy"

[emotions]
joy = ["chuffed"]
sadness = ["glum"]
anger = ["cross"]
fear = ["jumpy"]
surprise = ["gobsmacked"]
love = ["smitten"]

[modifiers]
negators = ["not"]
intensifiers = ["well"]

[sarcasm]
phrases = ["cheers for that"]
"#;

fn build(toml_str: &str) -> anyhow::Result<Tables> {
    Tables::build(&LexiconConfig::from_toml_str(toml_str)?)
}

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("emotion_lexicon_{}_{name}.toml", std::process::id()));
    std::fs::write(&path, content).expect("write temp lexicon");
    path
}

#[test]
fn embedded_default_is_valid() {
    let t = build(DEFAULT_LEXICON_TOML).expect("embedded lexicon");
    assert!(t.lexicon.len() > 100);
    assert!(!t.modifiers.is_empty());
}

#[test]
fn small_custom_lexicon_drives_analysis() {
    let cfg = LexiconConfig::from_toml_str(SMALL_TOML).unwrap();
    let a = EmotionAnalyzer::from_config(cfg).unwrap();
    assert_eq!(a.analyze("Well chuffed").emotion, Emotion::Joy);
    assert_eq!(a.analyze("not smitten").emotion, Emotion::Sadness);
    // words from the default vocabulary are unknown here
    assert_eq!(a.analyze("I am happy").emotion, Emotion::Neutral);
    assert!(a.analyze("Cheers for that").sarcasm_detected);
}

#[test]
fn rejects_keyword_in_two_categories() {
    let bad = SMALL_TOML.replace(r#"sadness = ["glum"]"#, r#"sadness = ["glum", "chuffed"]"#);
    let err = build(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("chuffed"), "{err:#}");
}

#[test]
fn rejects_keyword_that_is_also_a_modifier() {
    let bad = SMALL_TOML.replace(r#"negators = ["not"]"#, r#"negators = ["not", "glum"]"#);
    assert!(build(&bad).is_err());
}

#[test]
fn rejects_keyword_inside_multi_word_modifier() {
    let bad = SMALL_TOML
        .replace(r#"joy = ["chuffed"]"#, r#"joy = ["chuffed", "kind"]"#)
        .replace(
            r#"intensifiers = ["well"]"#,
            "intensifiers = [\"well\"]\ndiminishers = [\"kind of\"]",
        );
    let err = build(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("'kind'"), "{err:#}");

    // the same phrase is fine when no part of it is a keyword
    let ok = SMALL_TOML.replace(
        r#"intensifiers = ["well"]"#,
        "intensifiers = [\"well\"]\ndiminishers = [\"kind of\"]",
    );
    let t = build(&ok).unwrap();
    assert_eq!(t.modifiers.len(), 3);
}

#[test]
fn rejects_word_in_two_modifier_sets() {
    let bad = SMALL_TOML.replace(r#"intensifiers = ["well"]"#, r#"intensifiers = ["well", "not"]"#);
    assert!(build(&bad).is_err());
}

#[test]
fn rejects_partial_or_reflexive_opposites() {
    let missing = SMALL_TOML.replace("fear = \"joy\"\n", "");
    let err = build(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("fear"), "{err:#}");

    let reflexive = SMALL_TOML.replace(r#"anger = "joy""#, r#"anger = "anger""#);
    assert!(build(&reflexive).is_err());
}

#[test]
fn rejects_empty_or_unknown_categories() {
    let empty = SMALL_TOML.replace(r#"love = ["smitten"]"#, "love = []");
    assert!(build(&empty).is_err());

    let unknown = SMALL_TOML.replace(r#"love = ["smitten"]"#, r#"disgust = ["yuck"]"#);
    assert!(build(&unknown).is_err());
}

#[test]
fn rejects_bad_tuning() {
    let bad = format!("[tuning]\nintensifier_factor = -2.0\n{SMALL_TOML}");
    let err = build(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("intensifier_factor"), "{err:#}");
}

#[test]
fn rejects_invalid_sarcasm_pattern() {
    let bad = format!("{SMALL_TOML}patterns = ['(open']\n");
    assert!(build(&bad).is_err());
}

#[test]
#[serial]
fn env_path_overrides_embedded_lexicon() {
    let path = write_temp("override", SMALL_TOML);
    env::set_var(ENV_LEXICON_PATH, &path);
    env::remove_var(ENV_SARCASM_THRESHOLD);

    let a = EmotionAnalyzer::from_env().expect("analyzer from env");
    assert_eq!(a.analyze("chuffed").emotion, Emotion::Joy);

    env::remove_var(ENV_LEXICON_PATH);
    let _ = std::fs::remove_file(path);
}

#[test]
#[serial]
fn env_path_to_missing_file_is_an_error() {
    env::set_var(ENV_LEXICON_PATH, "/definitely/not/here/lexicon.toml");
    assert!(LexiconConfig::from_env().is_err());
    env::remove_var(ENV_LEXICON_PATH);
}

#[test]
#[serial]
fn env_threshold_override() {
    env::remove_var(ENV_LEXICON_PATH);

    env::set_var(ENV_SARCASM_THRESHOLD, "5");
    let cfg = LexiconConfig::from_env().unwrap();
    assert_eq!(cfg.sarcasm.threshold, 5.0);
    let a = EmotionAnalyzer::from_config(cfg).unwrap();
    // co-occurrence (2) + exclamation (1) no longer reaches the threshold
    assert!(!a.analyze("Perfect! Another problem to deal with.").sarcasm_detected);

    env::set_var(ENV_SARCASM_THRESHOLD, "not-a-number");
    assert_eq!(LexiconConfig::from_env().unwrap().sarcasm.threshold, 3.0);

    env::remove_var(ENV_SARCASM_THRESHOLD);
}
