//! Request extractors that reject with the API error envelope.

use axum::extract::{FromRequestParts, Query};

use crate::errors::AppError;

/// `Query` whose rejection is an [`AppError::Validation`] instead of a
/// plain-text 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
