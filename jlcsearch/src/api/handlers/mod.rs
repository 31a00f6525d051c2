//! HTTP request handlers.
//!
//! Handlers validate query parameters, run repository queries and render the result in the
//! negotiated [`crate::api::models::format::ResponseFormat`]. Errors are returned as
//! [`crate::errors::Error`], which converts into the matching HTTP status.
//!
//! - [`voltage_regulators`]: voltage regulator search

pub mod voltage_regulators;
