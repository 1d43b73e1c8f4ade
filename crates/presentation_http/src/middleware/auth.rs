//! API key authentication middleware
//!
//! Mutating requests must carry the shared secret in `x-api-key` (or, failing
//! that, `api-key`). Read-only methods pass through untouched. Keys are
//! compared in constant time.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Primary header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Alternate header accepted when the primary one is absent or empty
pub const ALT_API_KEY_HEADER: &str = "api-key";

/// Layer that applies API key authentication
#[derive(Clone, Debug)]
pub struct ApiKeyAuthLayer {
    api_key: Arc<SecretString>,
}

impl ApiKeyAuthLayer {
    /// Require `api_key` on every mutating request
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key: Arc::new(api_key),
        }
    }
}

impl<S> Layer<S> for ApiKeyAuthLayer {
    type Service = ApiKeyAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuth {
            inner,
            api_key: Arc::clone(&self.api_key),
        }
    }
}

/// Middleware service for API key authentication
#[derive(Clone, Debug)]
pub struct ApiKeyAuth<S> {
    inner: S,
    api_key: Arc<SecretString>,
}

impl<S> Service<Request> for ApiKeyAuth<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let api_key = Arc::clone(&self.api_key);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !requires_api_key(req.method()) {
                return inner.call(req).await;
            }

            match check_api_key(req.headers(), &api_key) {
                Ok(()) => {
                    debug!("API key accepted");
                    inner.call(req).await
                },
                Err(err) => {
                    warn!(
                        method = %req.method(),
                        path = %req.uri().path(),
                        "Rejected request: {err}"
                    );
                    Ok(err.into_response())
                },
            }
        })
    }
}

/// Whether requests with this method must present the API key
fn requires_api_key(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// First non-empty value of the accepted key headers
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    [API_KEY_HEADER, ALT_API_KEY_HEADER]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .find(|value| !value.is_empty())
}

fn check_api_key(headers: &HeaderMap, expected: &SecretString) -> Result<(), ApiError> {
    let provided = presented_key(headers).ok_or_else(|| {
        ApiError::Unauthorized(format!("API key required in {API_KEY_HEADER} header"))
    })?;

    let matches: bool = provided
        .as_bytes()
        .ct_eq(expected.expose_secret().as_bytes())
        .into();
    if matches {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Invalid API key".to_string()))
    }
}
