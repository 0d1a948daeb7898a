use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Fixed category a free-text symptom description is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SymptomTag {
    Cough,
    Headache,
    Fever,
    Stomachache,
    Tiredness,
    MuscleCramps,
    Cramps,
    MusclePain,
    BreathingDifficulty,
    Unknown,
}

impl SymptomTag {
    pub const ALL: [SymptomTag; 10] = [
        SymptomTag::Cough,
        SymptomTag::Headache,
        SymptomTag::Fever,
        SymptomTag::Stomachache,
        SymptomTag::Tiredness,
        SymptomTag::MuscleCramps,
        SymptomTag::Cramps,
        SymptomTag::MusclePain,
        SymptomTag::BreathingDifficulty,
        SymptomTag::Unknown,
    ];

    /// Human-readable label, e.g. "muscle cramps".
    pub fn label(self) -> &'static str {
        match self {
            SymptomTag::Cough => "cough",
            SymptomTag::Headache => "headache",
            SymptomTag::Fever => "fever",
            SymptomTag::Stomachache => "stomachache",
            SymptomTag::Tiredness => "tiredness",
            SymptomTag::MuscleCramps => "muscle cramps",
            SymptomTag::Cramps => "cramps",
            SymptomTag::MusclePain => "muscle pain",
            SymptomTag::BreathingDifficulty => "breathing difficulty",
            SymptomTag::Unknown => "unknown",
        }
    }

    /// Whether the page flow should send the user to the breathing exercises
    /// instead of showing advice text.
    pub fn needs_breathing_exercises(self) -> bool {
        self == SymptomTag::BreathingDifficulty
    }
}

impl fmt::Display for SymptomTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown symptom tag '{0}'")]
pub struct ParseSymptomTagError(pub String);

impl FromStr for SymptomTag {
    type Err = ParseSymptomTagError;

    /// Accepts the label ("muscle cramps") or the snake_case form
    /// ("muscle_cramps"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        SymptomTag::ALL
            .into_iter()
            .find(|tag| tag.label() == normalized)
            .ok_or_else(|| ParseSymptomTagError(s.to_string()))
    }
}

struct KeywordRule {
    keywords: &'static [&'static str],
    tag: SymptomTag,
}

// Evaluated top to bottom, first hit wins.
const RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["cough", "throat"],
        tag: SymptomTag::Cough,
    },
    KeywordRule {
        keywords: &["head", "migraine"],
        tag: SymptomTag::Headache,
    },
    KeywordRule {
        keywords: &["fever", "temperature"],
        tag: SymptomTag::Fever,
    },
    KeywordRule {
        keywords: &["stomach", "nausea", "vomit"],
        tag: SymptomTag::Stomachache,
    },
    KeywordRule {
        keywords: &["tired", "fatigue"],
        tag: SymptomTag::Tiredness,
    },
    KeywordRule {
        keywords: &["cramps"],
        tag: SymptomTag::Cramps,
    },
    KeywordRule {
        keywords: &["pain"],
        tag: SymptomTag::MusclePain,
    },
    KeywordRule {
        keywords: &["breath", "asthma"],
        tag: SymptomTag::BreathingDifficulty,
    },
];

/// Classify a free-text symptom description.
///
/// Matching is case-insensitive substring containment. Any input, including
/// the empty string, resolves to a tag; [`SymptomTag::Unknown`] when nothing
/// matches.
pub fn classify_symptom(text: &str) -> SymptomTag {
    let lowered = text.to_lowercase();

    let Some(rule) = RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
    else {
        return SymptomTag::Unknown;
    };

    match rule.tag {
        SymptomTag::Cramps if lowered.contains("muscle") => SymptomTag::MuscleCramps,
        tag => tag,
    }
}
