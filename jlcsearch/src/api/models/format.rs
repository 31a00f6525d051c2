//! Response format negotiation for endpoints that serve both browsers and API clients.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;

/// How a listing should be rendered, resolved once from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

impl ResponseFormat {
    /// A `.json` path suffix always selects JSON. Otherwise JSON is chosen when the `Accept`
    /// header names `application/json` without also naming `text/html`; everything else gets HTML.
    pub fn negotiate(path: &str, accept: Option<&str>) -> Self {
        if path.ends_with(".json") {
            return ResponseFormat::Json;
        }

        match accept {
            Some(accept) if prefers_json(accept) => ResponseFormat::Json,
            _ => ResponseFormat::Html,
        }
    }
}

fn prefers_json(accept: &str) -> bool {
    let media_types: Vec<&str> = accept
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .collect();

    let names = |wanted: &str| media_types.iter().any(|media_type| media_type.eq_ignore_ascii_case(wanted));

    names("application/json") && !names("text/html")
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts.headers.get(header::ACCEPT).and_then(|value| value.to_str().ok());
        Ok(Self::negotiate(parts.uri.path(), accept))
    }
}
