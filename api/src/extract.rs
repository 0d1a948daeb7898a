//! Extractors that turn axum's body rejections into structured `AppError`s.
//!
//! `AppJson<T>` and `AppForm<T>` are drop-in replacements for `axum::Json<T>`
//! and `axum::Form<T>`. A body that fails to deserialize yields a JSON 400
//! naming the offending field instead of axum's plain-text rejection.
//! `LenientForm<T>` is for forms whose fields are all optional: a submission
//! with no form content type reads as `T::default()`.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::{Form, Json};

use crate::error::AppError;

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(body_rejection(
                "JSON",
                &rejection.body_text(),
                "Send a JSON object matching the endpoint schema (see /api-doc/openapi.json).",
            )),
        }
    }
}

pub struct AppForm<T>(pub T);

impl<S, T> FromRequest<S> for AppForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(AppForm(value)),
            Err(rejection) => Err(body_rejection(
                "form",
                &rejection.body_text(),
                "Submit the form from the page that links here.",
            )),
        }
    }
}

pub struct LenientForm<T>(pub T);

impl<S, T> FromRequest<S> for LenientForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    T: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            return Ok(LenientForm(T::default()));
        }
        let AppForm(value) = AppForm::<T>::from_request(req, state).await?;
        Ok(LenientForm(value))
    }
}

fn body_rejection(kind: &str, body_text: &str, docs_hint: &str) -> AppError {
    AppError::Validation {
        message: format!("Invalid {kind} body: {body_text}"),
        field: Some(field_from_serde_message(body_text).unwrap_or_else(|| "body".to_string())),
        received: None,
        docs_hint: Some(docs_hint.to_string()),
    }
}

/// Pull the field name out of serde's "missing field `x`" / "unknown field `x`".
fn field_from_serde_message(msg: &str) -> Option<String> {
    ["missing field `", "unknown field `"]
        .iter()
        .find_map(|marker| {
            let start = msg.find(marker)? + marker.len();
            let rest = &msg[start..];
            rest.find('`').map(|end| rest[..end].to_string())
        })
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct SymptomForm {
        symptom: String,
    }

    #[derive(Default, Deserialize)]
    struct OptionalForm {
        #[serde(default)]
        note: Option<String>,
    }

    async fn echo(AppForm(form): AppForm<SymptomForm>) -> String {
        form.symptom
    }

    async fn echo_note(LenientForm(form): LenientForm<OptionalForm>) -> String {
        form.note.unwrap_or_else(|| "none".to_string())
    }

    async fn post_note(request: Request<Body>) -> (StatusCode, String) {
        let app = Router::new().route("/note", post(echo_note));
        let response = app.oneshot(request).await.expect("request should succeed");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn extracts_missing_field_name() {
        let msg = "Failed to deserialize form body: missing field `symptom`";
        assert_eq!(field_from_serde_message(msg), Some("symptom".to_string()));
    }

    #[test]
    fn extracts_unknown_field_name() {
        let msg = "unknown field `q9`, expected one of `q1`, `q2`";
        assert_eq!(field_from_serde_message(msg), Some("q9".to_string()));
    }

    #[test]
    fn returns_none_for_generic_error() {
        assert_eq!(field_from_serde_message("expected value at line 1 column 1"), None);
    }

    #[tokio::test]
    async fn missing_form_field_becomes_structured_400() {
        let app = Router::new().route("/echo", post(echo));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("other=1"))
                    .expect("request should build"),
            )
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "validation_failed");
        assert_eq!(value["field"], "symptom");
    }

    #[tokio::test]
    async fn lenient_form_defaults_without_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/note")
            .body(Body::empty())
            .expect("request should build");
        assert_eq!(post_note(request).await, (StatusCode::OK, "none".to_string()));
    }

    #[tokio::test]
    async fn lenient_form_still_reads_a_real_form() {
        let request = Request::builder()
            .method("POST")
            .uri("/note")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("note=hello"))
            .expect("request should build");
        assert_eq!(post_note(request).await, (StatusCode::OK, "hello".to_string()));
    }

    #[tokio::test]
    async fn lenient_form_rejects_a_foreign_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/note")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request should build");
        let (status, _) = post_note(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
