use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service, ServiceExt};

/// Tower Layer emitting one structured `tracing` event per request.
///
/// Only method, path, status and latency are logged. Request bodies (which
/// may hold symptom descriptions) are never touched.
#[derive(Clone, Default)]
pub struct AccessLogLayer;

impl AccessLogLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService { inner }
    }
}

#[derive(Clone)]
pub struct AccessLogService<S> {
    inner: S,
}

impl<S> Service<Request> for AccessLogService<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let not_ready = self.inner.clone();
        let ready = std::mem::replace(&mut self.inner, not_ready);

        Box::pin(async move {
            let path = req.uri().path().to_owned();
            let group = route_group(&path);

            if group == RouteGroup::Docs {
                return Ok(ready.oneshot(req).await.into_response());
            }

            let start = Instant::now();
            let method = req.method().clone();
            let response = ready.oneshot(req).await.into_response();
            let latency_ms = start.elapsed().as_millis().min(u64::MAX as u128) as u64;

            tracing::info!(
                method = %method,
                path = %path,
                route_group = group.as_str(),
                status = response.status().as_u16(),
                latency_ms,
                "request handled"
            );

            Ok(response)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Api,
    Docs,
    System,
    Page,
}

impl RouteGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteGroup::Api => "api",
            RouteGroup::Docs => "docs",
            RouteGroup::System => "system",
            RouteGroup::Page => "page",
        }
    }
}

/// Coarse bucket for a request path, used to filter and aggregate logs.
pub fn route_group(path: &str) -> RouteGroup {
    if path.starts_with("/v1/") {
        RouteGroup::Api
    } else if path.starts_with("/swagger-ui") || path.starts_with("/api-doc") {
        RouteGroup::Docs
    } else if path == "/health" {
        RouteGroup::System
    } else {
        RouteGroup::Page
    }
}
