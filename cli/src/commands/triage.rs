use chrono_tz::Tz;
use serde::Serialize;
use serde_json::json;
use wellcheck_core::{
    Clock, DayPeriod, MAX_RISK_SCORE, RiskAnswers, RiskTier, SymptomTag, SystemClock, assess_risk,
    classify_symptom, lookup_advice, lookup_advice_by_name,
};

use crate::util::{api_request, exit_error, print_json};

/// Where a command runs: in-process, or against a server at the given URL.
pub enum Target<'a> {
    Local,
    Remote(&'a str),
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AdviceOutput {
    pub symptom: SymptomTag,
    pub label: &'static str,
    pub advice: &'static str,
}

impl AdviceOutput {
    fn new(tag: SymptomTag, advice: &'static str) -> Self {
        Self {
            symptom: tag,
            label: tag.label(),
            advice,
        }
    }
}

pub fn classify_local(text: &str) -> AdviceOutput {
    let tag = classify_symptom(text);
    AdviceOutput::new(tag, lookup_advice(tag))
}

pub async fn classify(target: Target<'_>, text: &str) -> i32 {
    match target {
        Target::Local => print_json(&classify_local(text)),
        Target::Remote(api_url) => {
            api_request(
                api_url,
                reqwest::Method::POST,
                &["v1", "symptoms", "classify"],
                Some(json!({ "text": text })),
            )
            .await
        }
    }
}

pub async fn advice(target: Target<'_>, tag: &str) -> i32 {
    match target {
        Target::Local => match lookup_advice_by_name(tag) {
            Some((parsed, text)) => print_json(&AdviceOutput::new(parsed, text)),
            None => {
                let known: Vec<&str> = SymptomTag::ALL.iter().map(|t| t.label()).collect();
                exit_error(
                    &format!("Unknown symptom tag '{tag}'"),
                    Some(&format!("Known tags: {}", known.join(", "))),
                )
            }
        },
        Target::Remote(api_url) => {
            // Labels may contain spaces; the server accepts snake_case too.
            let tag = tag.trim().replace(' ', "_");
            api_request(api_url, reqwest::Method::GET, &["v1", "advice", tag.as_str()], None).await
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RiskOutput {
    pub score: u8,
    pub max_score: u8,
    pub tier: RiskTier,
    pub message: &'static str,
}

pub fn risk_local(answers: &RiskAnswers) -> RiskOutput {
    let assessment = assess_risk(answers);
    RiskOutput {
        score: assessment.score,
        max_score: MAX_RISK_SCORE,
        tier: assessment.tier,
        message: assessment.tier.message(),
    }
}

pub async fn risk(target: Target<'_>, answers: RiskAnswers) -> i32 {
    match target {
        Target::Local => print_json(&risk_local(&answers)),
        Target::Remote(api_url) => {
            let body = match serde_json::to_value(&answers) {
                Ok(v) => v,
                Err(e) => exit_error(&format!("Could not encode answers: {e}"), None),
            };
            api_request(api_url, reqwest::Method::POST, &["v1", "risk", "score"], Some(body)).await
        }
    }
}

#[derive(Debug, Serialize)]
struct GreetingOutput {
    greeting: &'static str,
    period: DayPeriod,
    hour: u32,
    timezone: &'static str,
}

pub async fn greet(target: Target<'_>, timezone: &str) -> i32 {
    match target {
        Target::Local => {
            let tz: Tz = timezone.parse().unwrap_or_else(|_| {
                exit_error(
                    &format!("Unknown time zone '{timezone}'"),
                    Some("Use an IANA name such as Europe/Berlin or America/New_York."),
                )
            });
            let clock = SystemClock::new(tz);
            let hour = clock.hour();
            let period = DayPeriod::from_hour(hour);
            print_json(&GreetingOutput {
                greeting: period.greeting(),
                period,
                hour,
                timezone: tz.name(),
            })
        }
        Target::Remote(api_url) => {
            api_request(api_url, reqwest::Method::GET, &["v1", "greeting"], None).await
        }
    }
}
