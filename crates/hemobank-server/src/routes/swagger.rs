//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use hemobank::{BloodGroup, HealthStatus, RequestStatus, StockStatus, UrgencyLevel};

use crate::models::{
    AvailabilityCheckResponse,
    AvailabilityResponse,
    BloodRequestResponse,
    CancelRequest,
    CreateBloodRequest,
    // Donor models
    CreateDonorRequest,
    // Inventory models
    CreateInventoryRequest,
    DashboardStatsResponse,
    DonationDateRequest,
    DonorGroupStatsResponse,
    DonorResponse,
    FulfillRequest,
    GroupRequestStatsResponse,
    // Dashboard models
    HealthStatusResponse,
    InventoryResponse,
    InventoryStatsResponse,
    RequestStatsResponse,
    // Request models
    StatusUpdateRequest,
    UnitsUpdateRequest,
    UpdateDonorRequest,
    UpdateInventoryRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Donor endpoints
        super::donor::list_donors,
        super::donor::create_donor,
        super::donor::get_donor,
        super::donor::get_donor_by_email,
        super::donor::update_donor,
        super::donor::update_donation_date,
        super::donor::delete_donor,
        super::donor::list_donors_by_blood_group,
        super::donor::list_eligible_donors,
        super::donor::list_available_donors,
        super::donor::list_available_donors_by_blood_group,
        super::donor::search_donors,
        super::donor::list_recent_donors,
        super::donor::donor_statistics,
        // Inventory endpoints
        super::inventory::list_inventory,
        super::inventory::create_inventory,
        super::inventory::get_inventory,
        super::inventory::get_inventory_by_blood_group,
        super::inventory::update_inventory,
        super::inventory::delete_inventory,
        super::inventory::add_units,
        super::inventory::remove_units,
        super::inventory::check_availability,
        super::inventory::list_critical_shortages,
        super::inventory::list_low_stock,
        super::inventory::list_out_of_stock,
        super::inventory::list_adequate_stock,
        super::inventory::availability,
        super::inventory::inventory_statistics,
        super::inventory::initialize_inventory,
        // Request endpoints
        super::request::list_requests,
        super::request::create_request,
        super::request::get_request,
        super::request::delete_request,
        super::request::list_requests_by_status,
        super::request::list_pending_requests,
        super::request::list_emergency_requests,
        super::request::list_requests_by_blood_group,
        super::request::list_requests_by_email,
        super::request::update_request_status,
        super::request::approve_and_fulfill_request,
        super::request::cancel_request,
        super::request::list_recent_requests,
        super::request::list_overdue_requests,
        super::request::search_requests_by_hospital,
        super::request::search_requests_by_patient,
        super::request::request_statistics,
        super::request::request_blood_group_statistics,
        // Dashboard endpoints
        super::dashboard::dashboard_stats,
        super::dashboard::dashboard_health,
    ),
    info(
        title = "Hemobank API",
        version = "0.1.0",
        description = "Blood bank management backend: donor registry, stock ledger, request workflow and dashboard.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Donors", description = "Donor registry management"),
        (name = "Inventory", description = "Blood stock ledger"),
        (name = "Requests", description = "Blood request workflow"),
        (name = "Dashboard", description = "Aggregated statistics and system health"),
    ),
    components(
        schemas(
            // Value objects
            BloodGroup,
            StockStatus,
            RequestStatus,
            UrgencyLevel,
            HealthStatus,
            // Donor
            CreateDonorRequest,
            UpdateDonorRequest,
            DonationDateRequest,
            DonorResponse,
            DonorGroupStatsResponse,
            // Inventory
            CreateInventoryRequest,
            UpdateInventoryRequest,
            UnitsUpdateRequest,
            InventoryResponse,
            AvailabilityResponse,
            AvailabilityCheckResponse,
            InventoryStatsResponse,
            // Request
            CreateBloodRequest,
            StatusUpdateRequest,
            FulfillRequest,
            CancelRequest,
            BloodRequestResponse,
            RequestStatsResponse,
            GroupRequestStatsResponse,
            // Dashboard
            DashboardStatsResponse,
            HealthStatusResponse,
        )
    ),
)]
pub struct ApiDoc;
