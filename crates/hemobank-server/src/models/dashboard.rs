//! Dashboard Response DTOs

use serde::Serialize;
use utoipa::ToSchema;

use hemobank::HealthStatus;

use crate::application::DashboardSnapshot;

/// Point-in-time view over the whole system
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub total_donors: i64,
    pub eligible_donors: i64,
    pub total_blood_units: i64,
    pub critical_shortages: i64,
    pub pending_requests: i64,
    pub emergency_requests: i64,
    pub today_requests: i64,
    pub today_donations: i64,
}

impl From<DashboardSnapshot> for DashboardStatsResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        Self {
            total_donors: snapshot.total_donors,
            eligible_donors: snapshot.eligible_donors,
            total_blood_units: snapshot.total_blood_units,
            critical_shortages: snapshot.critical_shortages,
            pending_requests: snapshot.pending_requests,
            emergency_requests: snapshot.emergency_requests,
            today_requests: snapshot.today_requests,
            today_donations: snapshot.today_donations,
        }
    }
}

/// Coarse health signal
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatusResponse {
    pub status: HealthStatus,
}
