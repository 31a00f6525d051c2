//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Query parameters, response bodies and response-format negotiation
//!
//! Every listing is available at `/<component>/list`, negotiated between JSON and HTML, and at
//! `/<component>/list.json`, which always returns JSON. OpenAPI documentation is served at
//! `/docs`.

pub mod handlers;
pub mod models;
