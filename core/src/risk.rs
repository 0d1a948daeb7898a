use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Highest reachable score: every question answered "yes".
pub const MAX_RISK_SCORE: u8 = 10;

/// The answer value that counts toward the score. Compared exactly.
pub const YES: &str = "yes";

/// Five independent yes/no answers. Anything other than exactly `"yes"`,
/// including a missing field, contributes nothing. Non-string values
/// (`true`, `1`, objects) deserialize as `None` rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskAnswers {
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q1: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q2: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q3: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q4: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q5: Option<String>,
}

fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    })
}

impl RiskAnswers {
    pub fn answer(&self, question: RiskQuestion) -> Option<&str> {
        let slot = match question {
            RiskQuestion::Q1 => &self.q1,
            RiskQuestion::Q2 => &self.q2,
            RiskQuestion::Q3 => &self.q3,
            RiskQuestion::Q4 => &self.q4,
            RiskQuestion::Q5 => &self.q5,
        };
        slot.as_deref()
    }

    pub fn is_yes(&self, question: RiskQuestion) -> bool {
        self.answer(question) == Some(YES)
    }
}

/// One of the five questionnaire items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskQuestion {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
}

impl RiskQuestion {
    pub const ALL: [RiskQuestion; 5] = [
        RiskQuestion::Q1,
        RiskQuestion::Q2,
        RiskQuestion::Q3,
        RiskQuestion::Q4,
        RiskQuestion::Q5,
    ];

    /// Form field name ("q1".."q5").
    pub fn field(self) -> &'static str {
        match self {
            RiskQuestion::Q1 => "q1",
            RiskQuestion::Q2 => "q2",
            RiskQuestion::Q3 => "q3",
            RiskQuestion::Q4 => "q4",
            RiskQuestion::Q5 => "q5",
        }
    }

    pub fn weight(self) -> u8 {
        match self {
            RiskQuestion::Q1 => 2,
            RiskQuestion::Q2 => 2,
            RiskQuestion::Q3 => 3,
            RiskQuestion::Q4 => 1,
            RiskQuestion::Q5 => 2,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            RiskQuestion::Q1 => "Have you had a fever in the last 48 hours?",
            RiskQuestion::Q2 => "Have your symptoms lasted more than three days?",
            RiskQuestion::Q3 => "Do you have shortness of breath or chest pain?",
            RiskQuestion::Q4 => "Have you been sleeping poorly?",
            RiskQuestion::Q5 => "Do you have a chronic condition such as diabetes or asthma?",
        }
    }
}

/// Coarse bucket derived from the questionnaire score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// `<= 2` low, `3..=5` moderate, `>= 6` high.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => RiskTier::Low,
            3..=5 => RiskTier::Moderate,
            _ => RiskTier::High,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RiskTier::Low => "🟢 Low risk. Keep taking care of yourself.",
            RiskTier::Moderate => "🟡 Moderate risk. Rest well and monitor your health.",
            RiskTier::High => "🔴 High risk. Please consider seeing a healthcare professional.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

/// Score plus the tier it falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RiskAssessment {
    pub score: u8,
    pub tier: RiskTier,
}

/// Sum of the weights of every question answered exactly "yes". Always in
/// `0..=MAX_RISK_SCORE`.
pub fn risk_score(answers: &RiskAnswers) -> u8 {
    RiskQuestion::ALL
        .into_iter()
        .filter(|q| answers.is_yes(*q))
        .map(RiskQuestion::weight)
        .sum()
}

pub fn score_risk(answers: &RiskAnswers) -> RiskTier {
    RiskTier::from_score(risk_score(answers))
}

pub fn assess_risk(answers: &RiskAnswers) -> RiskAssessment {
    let score = risk_score(answers);
    RiskAssessment {
        score,
        tier: RiskTier::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes() -> Option<String> {
        Some(YES.to_string())
    }

    #[test]
    fn no_answers_is_low() {
        let assessment = assess_risk(&RiskAnswers::default());
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.tier, RiskTier::Low);
    }

    #[test]
    fn q1_and_q3_is_moderate() {
        let answers = RiskAnswers {
            q1: yes(),
            q3: yes(),
            ..Default::default()
        };
        assert_eq!(risk_score(&answers), 5);
        assert_eq!(score_risk(&answers), RiskTier::Moderate);
    }

    #[test]
    fn all_yes_is_high_at_max_score() {
        let answers = RiskAnswers {
            q1: yes(),
            q2: yes(),
            q3: yes(),
            q4: yes(),
            q5: yes(),
        };
        assert_eq!(risk_score(&answers), MAX_RISK_SCORE);
        assert_eq!(score_risk(&answers), RiskTier::High);
    }

    #[test]
    fn only_exact_yes_counts() {
        let answers = RiskAnswers {
            q1: Some("YES".to_string()),
            q2: Some("no".to_string()),
            q3: Some(" yes".to_string()),
            q4: Some(String::new()),
            q5: Some("y".to_string()),
        };
        assert_eq!(risk_score(&answers), 0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(RiskTier::from_score(2), RiskTier::Low);
        assert_eq!(RiskTier::from_score(3), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(5), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(6), RiskTier::High);
    }

    #[test]
    fn every_answer_combination_stays_in_range() {
        for mask in 0u8..32 {
            let pick = |bit: u8| (mask & (1 << bit) != 0).then(yes).flatten();
            let answers = RiskAnswers {
                q1: pick(0),
                q2: pick(1),
                q3: pick(2),
                q4: pick(3),
                q5: pick(4),
            };
            let assessment = assess_risk(&answers);
            assert!(assessment.score <= MAX_RISK_SCORE);
            assert_eq!(assessment.tier, RiskTier::from_score(assessment.score));
        }
    }

    #[test]
    fn weights_sum_to_max_score() {
        let total: u8 = RiskQuestion::ALL.into_iter().map(RiskQuestion::weight).sum();
        assert_eq!(total, MAX_RISK_SCORE);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let answers: RiskAnswers = serde_json::from_str(r#"{"q2":"yes"}"#).unwrap();
        assert_eq!(answers.q1, None);
        assert_eq!(risk_score(&answers), 2);
    }

    #[test]
    fn non_string_answers_count_as_no() {
        let answers: RiskAnswers =
            serde_json::from_str(r#"{"q1":true,"q2":1,"q3":"yes","q4":null,"q5":{"a":"yes"}}"#)
                .unwrap();
        assert_eq!(answers.q1, None);
        assert_eq!(answers.q2, None);
        assert_eq!(answers.q4, None);
        assert_eq!(answers.q5, None);
        assert_eq!(risk_score(&answers), 3);
    }
}
