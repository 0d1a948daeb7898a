use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;
use wellcheck_core::{RiskAnswers, assess_risk, classify_symptom, greeting_for_hour, lookup_advice};

use crate::extract::{AppForm, LenientForm};
use crate::html;
use crate::state::AppState;

/// The linear form flow. Every page answers both GET and POST.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(index))
        .route("/choose", get(choose_form).post(choose_submit))
        .route("/symptom_input", get(symptom_form).post(symptom_submit))
        .route("/risk_input", get(risk_form).post(risk_submit))
        .route(
            "/breathing_exercises",
            get(breathing_exercises).post(breathing_exercises),
        )
        .route("/ask_again", get(ask_again_form).post(ask_again_submit))
        .route("/thank_you", get(thank_you).post(thank_you))
}

// ──────────────────────────────────────────────
// /
// ──────────────────────────────────────────────

async fn index(State(state): State<AppState>) -> Html<String> {
    let greeting = greeting_for_hour(state.clock.hour());
    Html(html::index_page(greeting))
}

// ──────────────────────────────────────────────
// /choose
// ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChooseSubmit {
    pub choice: String,
}

async fn choose_form() -> Html<String> {
    Html(html::choose_page())
}

async fn choose_submit(AppForm(form): AppForm<ChooseSubmit>) -> Response {
    match form.choice.as_str() {
        "advice" => Redirect::to("/symptom_input").into_response(),
        "risk" => Redirect::to("/risk_input").into_response(),
        other => {
            tracing::debug!(choice = %other, "Unrecognised choice, showing options again");
            Html(html::choose_page()).into_response()
        }
    }
}

// ──────────────────────────────────────────────
// /symptom_input
// ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SymptomSubmit {
    pub symptom: String,
}

async fn symptom_form() -> Html<String> {
    Html(html::symptom_input_page())
}

async fn symptom_submit(AppForm(form): AppForm<SymptomSubmit>) -> Response {
    let tag = classify_symptom(&form.symptom);
    tracing::info!(symptom = %tag, "Classified symptom description");

    if tag.needs_breathing_exercises() {
        return Redirect::to("/breathing_exercises").into_response();
    }

    Html(html::advice_page(tag.label(), lookup_advice(tag))).into_response()
}

// ──────────────────────────────────────────────
// /risk_input
// ──────────────────────────────────────────────

async fn risk_form() -> Html<String> {
    Html(html::risk_input_page())
}

async fn risk_submit(LenientForm(answers): LenientForm<RiskAnswers>) -> Html<String> {
    let assessment = assess_risk(&answers);
    tracing::info!(
        score = assessment.score,
        tier = assessment.tier.as_str(),
        "Scored risk questionnaire"
    );
    Html(html::risk_result_page(&assessment))
}

// ──────────────────────────────────────────────
// /breathing_exercises, /ask_again, /thank_you
// ──────────────────────────────────────────────

async fn breathing_exercises() -> Html<String> {
    Html(html::breathing_exercises_page())
}

#[derive(Debug, Default, Deserialize)]
pub struct AskAgainSubmit {
    #[serde(default)]
    pub continue_action: Option<String>,
}

async fn ask_again_form() -> Html<String> {
    Html(html::ask_again_page())
}

async fn ask_again_submit(LenientForm(form): LenientForm<AskAgainSubmit>) -> Redirect {
    match form.continue_action.as_deref() {
        Some("no") => Redirect::to("/thank_you"),
        _ => Redirect::to("/choose"),
    }
}

async fn thank_you() -> Html<String> {
    Html(html::thank_you_page())
}
