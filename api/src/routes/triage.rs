use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use wellcheck_core::error::ApiError;
use wellcheck_core::{
    DayPeriod, MAX_RISK_SCORE, NO_ADVICE_FOUND, RiskAnswers, RiskQuestion, RiskTier, SymptomTag,
    assess_risk, classify_symptom, lookup_advice, lookup_advice_by_name,
};

use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/greeting", get(get_greeting))
        .route("/v1/symptoms/classify", post(classify))
        .route("/v1/advice/{tag}", get(get_advice))
        .route("/v1/risk/score", post(score))
        .route("/v1/risk/questions", get(list_risk_questions))
}

// ──────────────────────────────────────────────
// GET /v1/greeting
// ──────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GreetingResponse {
    pub greeting: String,
    pub period: DayPeriod,
    /// Hour of day (0-23) in `timezone`
    pub hour: u32,
    /// IANA zone name the server greets in
    pub timezone: String,
}

/// Time-of-day greeting for the server's configured zone
#[utoipa::path(
    get,
    path = "/v1/greeting",
    responses(
        (status = 200, description = "Greeting", body = GreetingResponse)
    ),
    tag = "triage"
)]
pub async fn get_greeting(State(state): State<AppState>) -> Json<GreetingResponse> {
    let hour = state.clock.hour();
    let period = DayPeriod::from_hour(hour);
    Json(GreetingResponse {
        greeting: period.greeting().to_string(),
        period,
        hour,
        timezone: state.clock.timezone().name().to_string(),
    })
}

// ──────────────────────────────────────────────
// POST /v1/symptoms/classify
// ──────────────────────────────────────────────

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClassifyRequest {
    /// Free-text description, e.g. "sore throat since yesterday"
    pub text: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdviceResponse {
    pub symptom: SymptomTag,
    /// Readable tag, e.g. "muscle cramps"
    pub label: String,
    pub advice: String,
}

impl AdviceResponse {
    fn new(tag: SymptomTag, advice: &str) -> Self {
        Self {
            symptom: tag,
            label: tag.label().to_string(),
            advice: advice.to_string(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ClassifyResponse {
    #[serde(flatten)]
    pub result: AdviceResponse,
    /// True when the page flow would send the user to breathing exercises
    pub breathing_exercises: bool,
}

/// Classify a symptom description and return the matching advice
///
/// Never fails on content: text that matches no keyword is classified as
/// `unknown` and gets the generic advice.
#[utoipa::path(
    post,
    path = "/v1/symptoms/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classification result", body = ClassifyResponse),
        (status = 400, description = "Malformed body", body = ApiError)
    ),
    tag = "triage"
)]
pub async fn classify(AppJson(req): AppJson<ClassifyRequest>) -> Json<ClassifyResponse> {
    let tag = classify_symptom(&req.text);
    tracing::info!(symptom = %tag, "Classified symptom description");

    Json(ClassifyResponse {
        result: AdviceResponse::new(tag, lookup_advice(tag)),
        breathing_exercises: tag.needs_breathing_exercises(),
    })
}

// ──────────────────────────────────────────────
// GET /v1/advice/{tag}
// ──────────────────────────────────────────────

/// Advice for a symptom tag
///
/// Accepts the readable label (`muscle cramps`) or snake_case (`muscle_cramps`).
#[utoipa::path(
    get,
    path = "/v1/advice/{tag}",
    params(("tag" = String, Path, description = "Symptom tag")),
    responses(
        (status = 200, description = "Advice text", body = AdviceResponse),
        (status = 404, description = "Unknown tag", body = ApiError)
    ),
    tag = "triage"
)]
pub async fn get_advice(Path(tag): Path<String>) -> Result<Json<AdviceResponse>, AppError> {
    let (parsed, advice) = lookup_advice_by_name(&tag).ok_or_else(|| AppError::NotFound {
        message: NO_ADVICE_FOUND.to_string(),
        received: Some(serde_json::Value::String(tag.clone())),
        docs_hint: Some(format!(
            "Known tags: {}",
            SymptomTag::ALL
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(", ")
        )),
    })?;

    Ok(Json(AdviceResponse::new(parsed, advice)))
}

// ──────────────────────────────────────────────
// POST /v1/risk/score
// ──────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RiskScoreResponse {
    pub score: u8,
    pub max_score: u8,
    pub tier: RiskTier,
    pub message: String,
}

/// Score the five-question risk check
///
/// Each field counts only when it is exactly `"yes"`. Missing, null or
/// non-string fields count as no.
#[utoipa::path(
    post,
    path = "/v1/risk/score",
    request_body = RiskAnswers,
    responses(
        (status = 200, description = "Score and tier", body = RiskScoreResponse),
        (status = 400, description = "Malformed body", body = ApiError)
    ),
    tag = "triage"
)]
pub async fn score(AppJson(answers): AppJson<RiskAnswers>) -> Json<RiskScoreResponse> {
    let assessment = assess_risk(&answers);
    tracing::info!(
        score = assessment.score,
        tier = assessment.tier.as_str(),
        "Scored risk questionnaire"
    );

    Json(RiskScoreResponse {
        score: assessment.score,
        max_score: MAX_RISK_SCORE,
        tier: assessment.tier,
        message: assessment.tier.message().to_string(),
    })
}

// ──────────────────────────────────────────────
// GET /v1/risk/questions
// ──────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RiskQuestionItem {
    pub id: RiskQuestion,
    pub weight: u8,
    pub prompt: String,
}

/// The questionnaire, in order
#[utoipa::path(
    get,
    path = "/v1/risk/questions",
    responses(
        (status = 200, description = "Questions with weights", body = Vec<RiskQuestionItem>)
    ),
    tag = "triage"
)]
pub async fn list_risk_questions() -> Json<Vec<RiskQuestionItem>> {
    Json(
        RiskQuestion::ALL
            .into_iter()
            .map(|q| RiskQuestionItem {
                id: q,
                weight: q.weight(),
                prompt: q.prompt().to_string(),
            })
            .collect(),
    )
}
