//! Inventory Routes - Blood Stock Ledger Management
//!
//! HTTP handlers that delegate to InventoryService for business logic.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::InventoryUpdate;
use crate::models::{
    ApiResponse, AvailabilityCheckResponse, AvailabilityResponse, CreateInventoryRequest,
    InventoryResponse, InventoryStatsResponse, UnitsUpdateRequest, UpdateInventoryRequest,
};
use crate::routes::{error_response, not_found, parse_blood_group, ApiError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UnitsQuery {
    pub units: i32,
}

/// Create an inventory record for a blood group
#[utoipa::path(
    post,
    path = "/api/inventory",
    request_body = CreateInventoryRequest,
    responses(
        (status = 200, description = "Inventory record created", body = InventoryResponse),
        (status = 400, description = "Validation failure or duplicate blood group"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(payload): Json<CreateInventoryRequest>,
) -> Result<Json<ApiResponse<InventoryResponse>>, ApiError> {
    let inventory = state
        .inventory_service
        .create(
            payload.blood_group,
            payload.units_available,
            payload.minimum_stock,
            payload.maximum_capacity,
            payload.expiry_date,
            payload.notes,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Inventory record created",
        inventory.into(),
    )))
}

/// List all inventory records
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "All inventory records", body = Vec<InventoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryResponse>>>, ApiError> {
    let inventories = state
        .inventory_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Inventory retrieved",
        inventories.into_iter().map(Into::into).collect(),
    )))
}

/// Get inventory record by ID
#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory record ID")),
    responses(
        (status = 200, description = "Inventory record found", body = InventoryResponse),
        (status = 404, description = "Inventory record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InventoryResponse>>, ApiError> {
    let inventory = state
        .inventory_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Inventory record not found"))?;

    Ok(Json(ApiResponse::ok("Inventory retrieved", inventory.into())))
}

/// Get inventory record by blood group
#[utoipa::path(
    get,
    path = "/api/inventory/blood-group/{blood_group}",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    responses(
        (status = 200, description = "Inventory record found", body = InventoryResponse),
        (status = 400, description = "Unknown blood group"),
        (status = 404, description = "Inventory record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn get_inventory_by_blood_group(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<InventoryResponse>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let inventory = state
        .inventory_service
        .get_by_blood_group(blood_group)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("Inventory record not found"))?;

    Ok(Json(ApiResponse::ok("Inventory retrieved", inventory.into())))
}

/// Update an inventory record
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory record ID")),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Inventory record updated", body = InventoryResponse),
        (status = 404, description = "Inventory record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryRequest>,
) -> Result<Json<ApiResponse<InventoryResponse>>, ApiError> {
    let inventory = state
        .inventory_service
        .update(
            id,
            InventoryUpdate {
                units_available: payload.units_available,
                minimum_stock: payload.minimum_stock,
                maximum_capacity: payload.maximum_capacity,
                expiry_date: payload.expiry_date,
                notes: payload.notes,
            },
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Inventory updated", inventory.into())))
}

/// Delete an inventory record
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory record ID")),
    responses(
        (status = 200, description = "Inventory record deleted"),
        (status = 404, description = "Inventory record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .inventory_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err(not_found("Inventory record not found"));
    }

    Ok(Json(ApiResponse::ok("Inventory record deleted", ())))
}

/// Add units to a blood group
#[utoipa::path(
    post,
    path = "/api/inventory/blood-group/{blood_group}/add-units",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    request_body = UnitsUpdateRequest,
    responses(
        (status = 200, description = "Units added", body = InventoryResponse),
        (status = 400, description = "Capacity exceeded or non-positive amount"),
        (status = 404, description = "Inventory record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn add_units(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(payload): Json<UnitsUpdateRequest>,
) -> Result<Json<ApiResponse<InventoryResponse>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let inventory = state
        .inventory_service
        .add_units(blood_group, payload.units, payload.notes.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Units added", inventory.into())))
}

/// Remove units from a blood group
#[utoipa::path(
    post,
    path = "/api/inventory/blood-group/{blood_group}/remove-units",
    params(("blood_group" = String, Path, description = "Blood group, e.g. A+")),
    request_body = UnitsUpdateRequest,
    responses(
        (status = 200, description = "Units removed", body = InventoryResponse),
        (status = 400, description = "Insufficient stock or non-positive amount"),
        (status = 404, description = "Inventory record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn remove_units(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(payload): Json<UnitsUpdateRequest>,
) -> Result<Json<ApiResponse<InventoryResponse>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let inventory = state
        .inventory_service
        .remove_units(blood_group, payload.units, payload.notes.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Units removed", inventory.into())))
}

/// Check whether a blood group holds enough units
#[utoipa::path(
    get,
    path = "/api/inventory/blood-group/{blood_group}/check-availability",
    params(
        ("blood_group" = String, Path, description = "Blood group, e.g. A+"),
        ("units" = i32, Query, description = "Units required")
    ),
    responses(
        (status = 200, description = "Availability check result", body = AvailabilityCheckResponse),
        (status = 400, description = "Unknown blood group"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn check_availability(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Query(query): Query<UnitsQuery>,
) -> Result<Json<ApiResponse<AvailabilityCheckResponse>>, ApiError> {
    let blood_group = parse_blood_group(&raw)?;
    let sufficient = state
        .inventory_service
        .has_sufficient_units(blood_group, query.units)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Availability checked",
        AvailabilityCheckResponse {
            blood_group,
            units_requested: query.units,
            sufficient,
        },
    )))
}

/// List blood groups at or below their minimum stock
#[utoipa::path(
    get,
    path = "/api/inventory/critical-shortages",
    responses(
        (status = 200, description = "Critical shortages", body = Vec<InventoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn list_critical_shortages(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryResponse>>>, ApiError> {
    let inventories = state
        .inventory_service
        .critical_shortages()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Critical shortages retrieved",
        inventories.into_iter().map(Into::into).collect(),
    )))
}

/// List blood groups in the low-stock band
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    responses(
        (status = 200, description = "Low stock records", body = Vec<InventoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn list_low_stock(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryResponse>>>, ApiError> {
    let inventories = state
        .inventory_service
        .low_stock()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Low stock retrieved",
        inventories.into_iter().map(Into::into).collect(),
    )))
}

/// List blood groups with no units at all
#[utoipa::path(
    get,
    path = "/api/inventory/out-of-stock",
    responses(
        (status = 200, description = "Out-of-stock records", body = Vec<InventoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn list_out_of_stock(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryResponse>>>, ApiError> {
    let inventories = state
        .inventory_service
        .out_of_stock()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Out-of-stock records retrieved",
        inventories.into_iter().map(Into::into).collect(),
    )))
}

/// List blood groups with adequate stock
#[utoipa::path(
    get,
    path = "/api/inventory/adequate-stock",
    responses(
        (status = 200, description = "Adequate stock records", body = Vec<InventoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn list_adequate_stock(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryResponse>>>, ApiError> {
    let inventories = state
        .inventory_service
        .adequate_stock()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Adequate stock retrieved",
        inventories.into_iter().map(Into::into).collect(),
    )))
}

/// Availability overview across all blood groups
#[utoipa::path(
    get,
    path = "/api/inventory/availability",
    responses(
        (status = 200, description = "Availability overview", body = Vec<AvailabilityResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn availability(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AvailabilityResponse>>>, ApiError> {
    let lines = state
        .inventory_service
        .availability()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Availability retrieved",
        lines.into_iter().map(Into::into).collect(),
    )))
}

/// Ledger-wide statistics
#[utoipa::path(
    get,
    path = "/api/inventory/statistics",
    responses(
        (status = 200, description = "Inventory statistics", body = InventoryStatsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn inventory_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InventoryStatsResponse>>, ApiError> {
    let stats = state
        .inventory_service
        .statistics()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok(
        "Inventory statistics retrieved",
        stats.into(),
    )))
}

/// Seed zero-stock records for all canonical blood groups
#[utoipa::path(
    post,
    path = "/api/inventory/initialize",
    responses(
        (status = 200, description = "Blood groups initialized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Inventory"
)]
pub async fn initialize_inventory(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .inventory_service
        .initialize_blood_groups()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::ok("Blood groups initialized", ())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        // Inventory CRUD
        .route("/api/inventory", get(list_inventory).post(create_inventory))
        .route(
            "/api/inventory/:id",
            get(get_inventory)
                .put(update_inventory)
                .delete(delete_inventory),
        )
        // Blood-group keyed operations
        .route(
            "/api/inventory/blood-group/:blood_group",
            get(get_inventory_by_blood_group),
        )
        .route(
            "/api/inventory/blood-group/:blood_group/add-units",
            post(add_units),
        )
        .route(
            "/api/inventory/blood-group/:blood_group/remove-units",
            post(remove_units),
        )
        .route(
            "/api/inventory/blood-group/:blood_group/check-availability",
            get(check_availability),
        )
        // Stock views
        .route("/api/inventory/critical-shortages", get(list_critical_shortages))
        .route("/api/inventory/low-stock", get(list_low_stock))
        .route("/api/inventory/out-of-stock", get(list_out_of_stock))
        .route("/api/inventory/adequate-stock", get(list_adequate_stock))
        .route("/api/inventory/availability", get(availability))
        .route("/api/inventory/statistics", get(inventory_statistics))
        .route("/api/inventory/initialize", post(initialize_inventory))
}
