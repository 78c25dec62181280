//! Response bodies shared by API handlers.
//!
//! Successful responses are bare JSON: lists serialize as arrays and
//! mutations as [`MutationResponse`]. Errors go through `AppError`.

use serde::Serialize;

/// Acknowledgement returned by create, update and delete endpoints.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub success: bool,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self { id: None, success: true }
    }

    pub fn created(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            success: true,
        }
    }
}
