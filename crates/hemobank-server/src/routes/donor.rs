//! Donor Routes - Donor Registry Management
//!
//! HTTP handlers that delegate to DonorService for business logic.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::DonorUpdate;
use crate::models::{
    ApiResponse, CreateDonorRequest, DonationDateRequest, DonorGroupStatsResponse, DonorResponse,
    UpdateDonorRequest,
};
use crate::routes::{error_response, not_found, parse_blood_group, ApiError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// Register a new donor
#[utoipa::path(
    post,
    path = "/api/donors",
    request_body = CreateDonorRequest,
    responses(
        (status = 200, description = "Donor registered", body = DonorResponse),
        (status = 400, description = "Validation failure or duplicate contact details"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn create_donor(
    State(state): State<AppState>,
    Json(payload): Json<CreateDonorRequest>,
) -> Result<Json<ApiResponse<DonorResponse>>, ApiError> {
    let donor = state
        .donor_service
        .register(
            payload.name,
            payload.email,
            payload.phone,
            payload.blood_group,
            payload.last_donation_date,
            payload.age,
            payload.weight,
            payload.address,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Donor registered", donor.into())))
}

/// List all donors
#[utoipa::path(
    get,
    path = "/api/donors",
    responses(
        (status = 200, description = "List of all donors", body = Vec<DonorResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn list_donors(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let donors = state
        .donor_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// Get donor by ID
#[utoipa::path(
    get,
    path = "/api/donors/{id}",
    params(("id" = Uuid, Path, description = "Donor ID")),
    responses(
        (status = 200, description = "Donor found", body = DonorResponse),
        (status = 404, description = "Donor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn get_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DonorResponse>>, ApiError> {
    let donor = state
        .donor_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Donor not found"))?;

    Ok(Json(ApiResponse::ok("Donor retrieved", donor.into())))
}

/// Get donor by email
#[utoipa::path(
    get,
    path = "/api/donors/email/{email}",
    params(("email" = String, Path, description = "Donor email")),
    responses(
        (status = 200, description = "Donor found", body = DonorResponse),
        (status = 404, description = "Donor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn get_donor_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<DonorResponse>>, ApiError> {
    let donor = state
        .donor_service
        .get_by_email(&email)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Donor not found"))?;

    Ok(Json(ApiResponse::ok("Donor retrieved", donor.into())))
}

/// Update donor
#[utoipa::path(
    put,
    path = "/api/donors/{id}",
    params(("id" = Uuid, Path, description = "Donor ID")),
    request_body = UpdateDonorRequest,
    responses(
        (status = 200, description = "Donor updated", body = DonorResponse),
        (status = 404, description = "Donor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn update_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDonorRequest>,
) -> Result<Json<ApiResponse<DonorResponse>>, ApiError> {
    let donor = state
        .donor_service
        .update(
            id,
            DonorUpdate {
                name: payload.name,
                phone: payload.phone,
                blood_group: payload.blood_group,
                last_donation_date: payload.last_donation_date,
                age: payload.age,
                weight: payload.weight,
                address: payload.address,
                is_eligible: payload.is_eligible,
            },
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Donor updated", donor.into())))
}

/// Record a completed donation
#[utoipa::path(
    put,
    path = "/api/donors/{id}/donation-date",
    params(("id" = Uuid, Path, description = "Donor ID")),
    request_body = DonationDateRequest,
    responses(
        (status = 200, description = "Donation date recorded", body = DonorResponse),
        (status = 404, description = "Donor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn update_donation_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DonationDateRequest>,
) -> Result<Json<ApiResponse<DonorResponse>>, ApiError> {
    let donor = state
        .donor_service
        .update_last_donation_date(id, payload.donation_date)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Donation date recorded", donor.into())))
}

/// Delete donor
#[utoipa::path(
    delete,
    path = "/api/donors/{id}",
    params(("id" = Uuid, Path, description = "Donor ID")),
    responses(
        (status = 200, description = "Donor deleted"),
        (status = 404, description = "Donor not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .donor_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err(not_found("Donor not found"));
    }

    Ok(Json(ApiResponse::ok("Donor deleted", ())))
}

/// List donors by blood group
#[utoipa::path(
    get,
    path = "/api/donors/blood-group/{blood_group}",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    responses(
        (status = 200, description = "Donors of the blood group", body = Vec<DonorResponse>),
        (status = 400, description = "Unknown blood group"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn list_donors_by_blood_group(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let donors = state
        .donor_service
        .list_by_blood_group(blood_group)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// List eligible donors of a blood group (administrative flag only)
#[utoipa::path(
    get,
    path = "/api/donors/eligible/{blood_group}",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    responses(
        (status = 200, description = "Eligible donors", body = Vec<DonorResponse>),
        (status = 400, description = "Unknown blood group"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn list_eligible_donors(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let donors = state
        .donor_service
        .eligible_by_blood_group(blood_group)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Eligible donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// List donors who may donate today
#[utoipa::path(
    get,
    path = "/api/donors/available",
    responses(
        (status = 200, description = "Available donors", body = Vec<DonorResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn list_available_donors(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let donors = state
        .donor_service
        .available_donors()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Available donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// List donors of a blood group who may donate today
#[utoipa::path(
    get,
    path = "/api/donors/available/{blood_group}",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    responses(
        (status = 200, description = "Available donors", body = Vec<DonorResponse>),
        (status = 400, description = "Unknown blood group"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn list_available_donors_by_blood_group(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let donors = state
        .donor_service
        .available_donors_by_blood_group(blood_group)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Available donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// Search donors by name
#[utoipa::path(
    get,
    path = "/api/donors/search",
    params(("name" = String, Query, description = "Name fragment")),
    responses(
        (status = 200, description = "Matching donors", body = Vec<DonorResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn search_donors(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let donors = state
        .donor_service
        .search_by_name(&query.name)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// List donors who donated within the last 30 days
#[utoipa::path(
    get,
    path = "/api/donors/recent",
    responses(
        (status = 200, description = "Recent donors", body = Vec<DonorResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn list_recent_donors(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DonorResponse>>>, ApiError> {
    let donors = state
        .donor_service
        .recent_donors()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Recent donors retrieved",
        donors.into_iter().map(Into::into).collect(),
    )))
}

/// Per-blood-group donor statistics
#[utoipa::path(
    get,
    path = "/api/donors/statistics",
    responses(
        (status = 200, description = "Donor statistics", body = Vec<DonorGroupStatsResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Donors"
)]
pub async fn donor_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DonorGroupStatsResponse>>>, ApiError> {
    let stats = state
        .donor_service
        .statistics()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Donor statistics retrieved",
        stats.into_iter().map(Into::into).collect(),
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        // Donor CRUD
        .route("/api/donors", get(list_donors).post(create_donor))
        .route(
            "/api/donors/:id",
            get(get_donor).put(update_donor).delete(delete_donor),
        )
        .route("/api/donors/:id/donation-date", put(update_donation_date))
        // Lookups
        .route("/api/donors/email/:email", get(get_donor_by_email))
        .route(
            "/api/donors/blood-group/:blood_group",
            get(list_donors_by_blood_group),
        )
        .route("/api/donors/eligible/:blood_group", get(list_eligible_donors))
        .route("/api/donors/available", get(list_available_donors))
        .route(
            "/api/donors/available/:blood_group",
            get(list_available_donors_by_blood_group),
        )
        .route("/api/donors/search", get(search_donors))
        .route("/api/donors/recent", get(list_recent_donors))
        .route("/api/donors/statistics", get(donor_statistics))
}
