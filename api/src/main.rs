use std::net::SocketAddr;

use axum::Router;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod extract;
mod html;
mod middleware;
mod routes;
mod state;

use state::{AppConfig, AppState};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WellCheck API",
        version = "0.1.0",
        description = "Symptom classification, self-care advice, and a five-question risk check. General wellbeing tips, not medical advice."
    ),
    paths(
        routes::health::health_check,
        routes::triage::get_greeting,
        routes::triage::classify,
        routes::triage::get_advice,
        routes::triage::score,
        routes::triage::list_risk_questions,
    ),
    components(schemas(
        HealthResponse,
        wellcheck_core::error::ApiError,
        wellcheck_core::SymptomTag,
        wellcheck_core::DayPeriod,
        wellcheck_core::RiskAnswers,
        wellcheck_core::RiskQuestion,
        wellcheck_core::RiskTier,
        routes::triage::GreetingResponse,
        routes::triage::ClassifyRequest,
        routes::triage::ClassifyResponse,
        routes::triage::AdviceResponse,
        routes::triage::RiskScoreResponse,
        routes::triage::RiskQuestionItem,
    ))
)]
struct ApiDoc;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Full application router. Page flow and `/v1` get separate rate limits.
fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(routes::health::router())
        .merge(routes::pages::router().layer(middleware::rate_limit::pages_layer()))
        .merge(routes::triage::router().layer(middleware::rate_limit::api_layer()))
        .layer(middleware::access_log::AccessLogLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(error::panic_response))
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::security_headers::apply))
                .layer(middleware::cors::build_cors_layer(&config.cors_origins)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    // Structured JSON logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellcheck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();
    let app_state = AppState::new(&config);
    let router = app(app_state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(timezone = %config.timezone, "WellCheck listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::state::test_state;

    fn test_app() -> Router {
        let config = AppConfig {
            port: 0,
            timezone: chrono_tz::Tz::UTC,
            cors_origins: vec!["http://localhost:5001".to_string()],
        };
        app(test_state(10), &config)
    }

    // The rate limiter keys on client IP; oneshot requests have no socket.
    fn request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .expect("request should build")
    }

    #[tokio::test]
    async fn page_flow_is_wired_with_headers() {
        let response = test_app()
            .oneshot(request("/"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Good morning"));
    }

    #[tokio::test]
    async fn openapi_document_lists_triage_paths() {
        let response = test_app()
            .oneshot(request("/api-doc/openapi.json"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for path in ["/health", "/v1/symptoms/classify", "/v1/advice/{tag}", "/v1/risk/score"] {
            assert!(doc["paths"].get(path).is_some(), "{path}");
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = test_app()
            .oneshot(request("/nope"))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
