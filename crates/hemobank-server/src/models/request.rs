//! Blood Request Request/Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use hemobank::{BloodGroup, BloodRequest, RequestStatus, UrgencyLevel};

use crate::application::{GroupRequestStatistics, RequestStatistics};

/// Create blood request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBloodRequest {
    pub requester_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub blood_group: BloodGroup,
    pub units_requested: i32,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    pub hospital_name: String,
    pub patient_name: String,
    pub medical_reason: Option<String>,
}

/// Processing action on a pending request
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
    pub processed_by: String,
}

/// Fulfillment action on a pending request
#[derive(Debug, Deserialize, ToSchema)]
pub struct FulfillRequest {
    pub admin_notes: Option<String>,
    pub processed_by: String,
}

/// Cancellation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Blood request response
#[derive(Debug, Serialize, ToSchema)]
pub struct BloodRequestResponse {
    pub id: Uuid,
    pub requester_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub blood_group: BloodGroup,
    pub units_requested: i32,
    pub urgency_level: UrgencyLevel,
    pub urgency_display: String,
    pub hospital_name: String,
    pub patient_name: String,
    pub medical_reason: Option<String>,
    pub status: RequestStatus,
    pub status_display: String,
    pub admin_notes: Option<String>,
    pub processed_by: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BloodRequest> for BloodRequestResponse {
    fn from(req: BloodRequest) -> Self {
        Self {
            id: req.id,
            requester_name: req.requester_name,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            blood_group: req.blood_group,
            units_requested: req.units_requested,
            urgency_level: req.urgency_level,
            urgency_display: req.urgency_level.display_name().to_string(),
            hospital_name: req.hospital_name,
            patient_name: req.patient_name,
            medical_reason: req.medical_reason,
            status: req.status,
            status_display: req.status.display_name().to_string(),
            admin_notes: req.admin_notes,
            processed_by: req.processed_by,
            processed_at: req.processed_at,
            created_at: req.created_at,
            updated_at: req.updated_at,
        }
    }
}

/// Workflow-wide request counters
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestStatsResponse {
    pub total_requests: i64,
    pub pending_requests: i64,
    pub approved_requests: i64,
    pub rejected_requests: i64,
    pub emergency_requests: i64,
    pub urgent_requests: i64,
}

impl From<RequestStatistics> for RequestStatsResponse {
    fn from(stats: RequestStatistics) -> Self {
        Self {
            total_requests: stats.total_requests,
            pending_requests: stats.pending_requests,
            approved_requests: stats.approved_requests,
            rejected_requests: stats.rejected_requests,
            emergency_requests: stats.emergency_requests,
            urgent_requests: stats.urgent_requests,
        }
    }
}

/// Per-blood-group request counters
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupRequestStatsResponse {
    pub blood_group: BloodGroup,
    pub total_requests: i64,
    pub total_units_requested: i64,
    pub pending_requests: i64,
    pub pending_units: i64,
}

impl From<GroupRequestStatistics> for GroupRequestStatsResponse {
    fn from(stats: GroupRequestStatistics) -> Self {
        Self {
            blood_group: stats.blood_group,
            total_requests: stats.total_requests,
            total_units_requested: stats.total_units_requested,
            pending_requests: stats.pending_requests,
            pending_units: stats.pending_units,
        }
    }
}
