//! Request extractors with the API's JSON error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] whose rejections (malformed JSON,
/// wrong content type, mismatched field types) become `400` responses in the
/// standard `{ "error", "code" }` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
