//! Decision logic for WellCheck: symptom classification, advice lookup,
//! risk scoring, and the time-of-day greeting.
//!
//! Everything here is a pure function of its input. The web and CLI layers
//! call into this crate; nothing in it holds state.

pub mod advice;
pub mod error;
pub mod greeting;
pub mod risk;
pub mod symptoms;

pub use advice::{NO_ADVICE_FOUND, lookup_advice, lookup_advice_by_name};
pub use greeting::{Clock, DayPeriod, FixedClock, SystemClock, greeting_for_hour};
pub use risk::{
    MAX_RISK_SCORE, RiskAnswers, RiskAssessment, RiskQuestion, RiskTier, assess_risk, risk_score,
    score_risk,
};
pub use symptoms::{ParseSymptomTagError, SymptomTag, classify_symptom};
