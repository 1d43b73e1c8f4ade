//! Request ID and request logging middleware
//!
//! Extracts or generates a unique request ID for each incoming request, runs
//! the request inside a span carrying that ID, and logs method, path, status
//! and latency once the response is ready.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Layer that adds request ID handling and request logging
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    /// Create a new request ID layer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that extracts or generates a request ID for each request
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        // Reuse a well-formed incoming ID, otherwise mint one
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::now_v7);

        request.extensions_mut().insert(RequestId(request_id));

        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        let mut inner = self.inner.clone();
        let started = Instant::now();

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    "{method} {path}"
                );

                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Request ID extracted from the request headers or generated
#[derive(Debug, Clone, Copy)]
pub struct RequestId(pub Uuid);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Router, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn echo_id(Extension(id): Extension<RequestId>) -> String {
        id.to_string()
    }

    fn router() -> Router {
        Router::new()
            .route("/", get(echo_id))
            .layer(RequestIdLayer::new())
    }

    #[test]
    fn request_id_display() {
        let id = RequestId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[tokio::test]
    async fn generated_id_is_echoed_in_header_and_extension() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&body), header);
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[tokio::test]
    async fn incoming_uuid_is_preserved() {
        let incoming = Uuid::new_v4().to_string();
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, &incoming)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            incoming.as_str()
        );
    }

    #[tokio::test]
    async fn malformed_incoming_id_is_replaced() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert_ne!(header, "not-a-uuid");
    }
}
