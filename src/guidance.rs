// src/guidance.rs
//! Static wellbeing guidance keyed by the dominant emotion: one recommendation,
//! one daily challenge, one daily tip. Exhaustive over `Emotion`, so adding a
//! variant without guidance fails to compile.

use serde::Serialize;

use crate::emotion::Emotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub emotion: Emotion,
    pub recommendation: &'static str,
    pub daily_challenge: &'static str,
    pub daily_tip: &'static str,
}

pub fn guidance_for(emotion: Emotion) -> Guidance {
    let (recommendation, daily_challenge, daily_tip) = match emotion {
        Emotion::Joy => (
            "Share the good mood with someone; it tends to spread.",
            "Give a sincere compliment to three different people today.",
            "Write down one good moment each evening so you can revisit it later.",
        ),
        Emotion::Sadness => (
            "Talk to a friend or put your thoughts on paper. Feeling low sometimes is normal.",
            "Do one small kind thing for yourself today, like a bath or a favourite book.",
            "A gentle walk outside often lifts the mood more than expected.",
        ),
        Emotion::Anger => (
            "Pause and take a few slow breaths before responding. A short walk helps too.",
            "Try 4-7-8 breathing: in for 4 seconds, hold for 7, out for 8.",
            "Tense and release each muscle group in turn to let the tension go.",
        ),
        Emotion::Fear => (
            "Ground yourself: name five things you see, four you can touch, three you hear.",
            "Pick one small, manageable fear and face it today.",
            "Split a big worry into small steps and deal with only the first one.",
        ),
        Emotion::Surprise => (
            "Lean into the unexpected; it is often where new opportunities start.",
            "Do one spontaneous thing you would normally skip.",
            "Stay curious when plans change and ask what the change makes possible.",
        ),
        Emotion::Love => (
            "Tell the people you care about what they mean to you.",
            "Reach out to someone important to you and say thank you.",
            "Small acts of kindness benefit both the giver and the receiver.",
        ),
        Emotion::Neutral => (
            "Check in with yourself for a moment. A five-minute breathing break helps you stay present.",
            "Notice three small moments of beauty today and jot them down.",
            "Regular short check-ins build emotional self-awareness over time.",
        ),
    };
    Guidance {
        emotion,
        recommendation,
        daily_challenge,
        daily_tip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_emotion_has_distinct_guidance() {
        let all: Vec<Guidance> = Emotion::ALL.into_iter().map(guidance_for).collect();
        for (i, g) in all.iter().enumerate() {
            assert_eq!(g.emotion, Emotion::ALL[i]);
            assert!(!g.recommendation.is_empty());
            assert!(!g.daily_challenge.is_empty());
            assert!(!g.daily_tip.is_empty());
            for other in &all[i + 1..] {
                assert_ne!(g.recommendation, other.recommendation);
            }
        }
    }

    #[test]
    fn serializes_with_lowercase_emotion() {
        let v = serde_json::to_value(guidance_for(Emotion::Fear)).unwrap();
        assert_eq!(v["emotion"], "fear");
        assert!(v["daily_tip"].is_string());
    }
}
