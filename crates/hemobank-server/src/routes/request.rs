//! Request Routes - Blood Request Workflow
//!
//! HTTP handlers that delegate to RequestService for business logic.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use hemobank::RequestStatus;

use crate::models::{
    ApiResponse, BloodRequestResponse, CancelRequest, CreateBloodRequest, FulfillRequest,
    GroupRequestStatsResponse, RequestStatsResponse, StatusUpdateRequest,
};
use crate::routes::{error_response, not_found, parse_blood_group, ApiError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

fn parse_status(raw: &str) -> Result<RequestStatus, ApiError> {
    raw.parse().map_err(|e: String| {
        (
            axum::http::StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e)),
        )
    })
}

/// Submit a blood request
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateBloodRequest,
    responses(
        (status = 200, description = "Request created", body = BloodRequestResponse),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateBloodRequest>,
) -> Result<Json<ApiResponse<BloodRequestResponse>>, ApiError> {
    let request = state
        .request_service
        .create(
            payload.requester_name,
            payload.contact_email,
            payload.contact_phone,
            payload.blood_group,
            payload.units_requested,
            payload.urgency_level,
            payload.hospital_name,
            payload.patient_name,
            payload.medical_reason,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Blood request created", request.into())))
}

/// List all blood requests
#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "All blood requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// Get blood request by ID
#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = BloodRequestResponse),
        (status = 404, description = "Request not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequestResponse>>, ApiError> {
    let request = state
        .request_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Blood request not found"))?;

    Ok(Json(ApiResponse::ok("Request retrieved", request.into())))
}

/// Delete a blood request
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted"),
        (status = 404, description = "Request not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .request_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err(not_found("Blood request not found"));
    }

    Ok(Json(ApiResponse::ok("Blood request deleted", ())))
}

/// List requests in a given status
#[utoipa::path(
    get,
    path = "/api/requests/status/{status}",
    params(("status" = String, Path, description = "Request status, e.g. PENDING")),
    responses(
        (status = 200, description = "Requests in the status", body = Vec<BloodRequestResponse>),
        (status = 400, description = "Unknown status"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_requests_by_status(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let status = parse_status(&raw)?;
    let requests = state
        .request_service
        .list_by_status(status)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// List pending requests, oldest first
#[utoipa::path(
    get,
    path = "/api/requests/pending",
    responses(
        (status = 200, description = "Pending requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_pending_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .pending()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Pending requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// List pending emergencies, oldest first
#[utoipa::path(
    get,
    path = "/api/requests/emergency",
    responses(
        (status = 200, description = "Pending emergency requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_emergency_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .emergency_pending()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Emergency requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// List requests for a blood group
#[utoipa::path(
    get,
    path = "/api/requests/blood-group/{blood_group}",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    responses(
        (status = 200, description = "Requests for the blood group", body = Vec<BloodRequestResponse>),
        (status = 400, description = "Unknown blood group"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_requests_by_blood_group(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let requests = state
        .request_service
        .list_by_blood_group(blood_group)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// List requests submitted from a contact email
#[utoipa::path(
    get,
    path = "/api/requests/email/{email}",
    params(("email" = String, Path, description = "Contact email")),
    responses(
        (status = 200, description = "Requests from the email", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_requests_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .list_by_contact_email(&email)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// Apply the one-shot status transition to a pending request
#[utoipa::path(
    put,
    path = "/api/requests/{id}/status",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Request processed", body = BloodRequestResponse),
        (status = 400, description = "Already processed or insufficient stock"),
        (status = 404, description = "Request not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<BloodRequestResponse>>, ApiError> {
    let request = state
        .request_service
        .update_status(id, payload.status, payload.admin_notes, &payload.processed_by)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Request processed", request.into())))
}

/// Approve a pending request and debit the inventory in one unit of work
#[utoipa::path(
    post,
    path = "/api/requests/{id}/approve-fulfill",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = FulfillRequest,
    responses(
        (status = 200, description = "Request fulfilled", body = BloodRequestResponse),
        (status = 400, description = "Already processed or insufficient stock"),
        (status = 404, description = "Request not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn approve_and_fulfill_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FulfillRequest>,
) -> Result<Json<ApiResponse<BloodRequestResponse>>, ApiError> {
    let request = state
        .request_service
        .approve_and_fulfill(id, payload.admin_notes, &payload.processed_by)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Request approved and fulfilled",
        request.into(),
    )))
}

/// Cancel a pending request
#[utoipa::path(
    post,
    path = "/api/requests/{id}/cancel",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = CancelRequest,
    responses(
        (status = 200, description = "Request cancelled", body = BloodRequestResponse),
        (status = 400, description = "Already processed"),
        (status = 404, description = "Request not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelRequest>,
) -> Result<Json<ApiResponse<BloodRequestResponse>>, ApiError> {
    let request = state
        .request_service
        .cancel(id, payload.reason)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Request cancelled", request.into())))
}

/// List requests created within the last 7 days
#[utoipa::path(
    get,
    path = "/api/requests/recent",
    responses(
        (status = 200, description = "Recent requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_recent_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .recent()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Recent requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// List pending requests older than 24 hours, most urgent first
#[utoipa::path(
    get,
    path = "/api/requests/overdue",
    responses(
        (status = 200, description = "Overdue pending requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn list_overdue_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .overdue_pending()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Overdue requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// Search requests by hospital name
#[utoipa::path(
    get,
    path = "/api/requests/search/hospital",
    params(("name" = String, Query, description = "Hospital name fragment")),
    responses(
        (status = 200, description = "Matching requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn search_requests_by_hospital(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .search_by_hospital(&query.name)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// Search requests by patient name
#[utoipa::path(
    get,
    path = "/api/requests/search/patient",
    params(("name" = String, Query, description = "Patient name fragment")),
    responses(
        (status = 200, description = "Matching requests", body = Vec<BloodRequestResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn search_requests_by_patient(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ApiResponse<Vec<BloodRequestResponse>>>, ApiError> {
    let requests = state
        .request_service
        .search_by_patient(&query.name)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Requests retrieved",
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// Workflow-wide request statistics
#[utoipa::path(
    get,
    path = "/api/requests/statistics",
    responses(
        (status = 200, description = "Request statistics", body = RequestStatsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn request_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RequestStatsResponse>>, ApiError> {
    let stats = state
        .request_service
        .statistics()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Request statistics retrieved",
        stats.into(),
    )))
}

/// Per-blood-group request statistics
#[utoipa::path(
    get,
    path = "/api/requests/statistics/blood-groups",
    responses(
        (status = 200, description = "Per-group request statistics", body = Vec<GroupRequestStatsResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Requests"
)]
pub async fn request_blood_group_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GroupRequestStatsResponse>>>, ApiError> {
    let stats = state
        .request_service
        .blood_group_statistics()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Per-group request statistics retrieved",
        stats.into_iter().map(Into::into).collect(),
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        // Request CRUD
        .route("/api/requests", get(list_requests).post(create_request))
        .route("/api/requests/:id", get(get_request).delete(delete_request))
        // Processing actions
        .route("/api/requests/:id/status", put(update_request_status))
        .route(
            "/api/requests/:id/approve-fulfill",
            post(approve_and_fulfill_request),
        )
        .route("/api/requests/:id/cancel", post(cancel_request))
        // Queues and lookups
        .route("/api/requests/status/:status", get(list_requests_by_status))
        .route("/api/requests/pending", get(list_pending_requests))
        .route("/api/requests/emergency", get(list_emergency_requests))
        .route(
            "/api/requests/blood-group/:blood_group",
            get(list_requests_by_blood_group),
        )
        .route("/api/requests/email/:email", get(list_requests_by_email))
        .route("/api/requests/recent", get(list_recent_requests))
        .route("/api/requests/overdue", get(list_overdue_requests))
        .route(
            "/api/requests/search/hospital",
            get(search_requests_by_hospital),
        )
        .route(
            "/api/requests/search/patient",
            get(search_requests_by_patient),
        )
        // Statistics
        .route("/api/requests/statistics", get(request_statistics))
        .route(
            "/api/requests/statistics/blood-groups",
            get(request_blood_group_statistics),
        )
}
