use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Build a CORS layer for the configured origins (`WELLCHECK_CORS_ORIGINS`).
///
/// Only GET/POST/OPTIONS with `Content-Type` are allowed; the service has no
/// credentials to share. Origins that are not valid header values are
/// dropped with a warning.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(parse_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("content-type")])
        .max_age(std::time::Duration::from_secs(3600))
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn invalid_origins_are_dropped() {
        let parsed = parse_origins(&[
            "https://ok.example".to_string(),
            "bad\norigin".to_string(),
        ]);
        assert_eq!(parsed, vec![HeaderValue::from_static("https://ok.example")]);
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed() {
        let app = Router::new()
            .route("/health", get(|| async { StatusCode::OK }))
            .layer(build_cors_layer(&["http://localhost:5001".to_string()]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5001")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should succeed");

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5001"
        );
    }
}
