//! Request validation
//!
//! Provides a `ResourcePayload` extractor that checks a create/update body
//! against the resource's field rules before turning it into a typed draft,
//! and a `FirstValueQuery` extractor for lenient query strings.

use std::marker::PhantomData;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use domain::{Resource, validate_fields};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A JSON body that passed the field rules of `R`
///
/// An empty body counts as `{}` and so fails every rule; a body that is not
/// JSON at all is rejected before any rule runs.
#[derive(Debug)]
pub struct ResourcePayload<R: Resource>(pub R::Draft, PhantomData<R>);

impl<R: Resource> ResourcePayload<R> {
    /// The validated draft
    pub fn into_inner(self) -> R::Draft {
        self.0
    }
}

/// Parse and validate a raw body
pub fn parse_payload<R: Resource>(body: &[u8]) -> Result<R::Draft, ApiError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    validate_fields(R::RULES, &value).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

impl<R, S> FromRequest<S> for ResourcePayload<R>
where
    R: Resource,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;

        Ok(Self(parse_payload::<R>(&body)?, PhantomData))
    }
}

/// Query string where a repeated key keeps its first value
///
/// `?page=1&page=2` reads as `page=1`. Values reach `T` as strings; a query
/// that still cannot be read is a structured 400.
#[derive(Debug)]
pub struct FirstValueQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for FirstValueQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid query string: {e}")))?;

        let mut first = Map::new();
        for (key, value) in pairs {
            first.entry(key).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(first))
            .map(Self)
            .map_err(|e| ApiError::BadRequest(format!("Invalid query string: {e}")))
    }
}
