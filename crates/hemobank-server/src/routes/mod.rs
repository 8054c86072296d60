//! Hemobank API Routes
//!
//! - /api/donors - Donor registry
//! - /api/inventory - Blood stock ledger
//! - /api/requests - Blood request workflow
//! - /api/dashboard - Aggregated statistics and health

pub mod dashboard;
pub mod donor;
pub mod inventory;
pub mod request;
pub mod swagger;

use axum::http::StatusCode;
use axum::Json;

use hemobank::{BloodGroup, DomainError};

use crate::models::ApiResponse;

/// Error shape shared by every handler
pub(crate) type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain outcome to its HTTP status. Repository failures are the only
/// server-side errors; everything else is the caller's problem.
pub(crate) fn error_response(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

pub(crate) fn not_found(message: impl Into<String>) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
}

/// Parse a path segment like "AB-" into a blood group
pub(crate) fn parse_blood_group(raw: &str) -> Result<BloodGroup, ApiError> {
    raw.parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e))))
}
