//! RequestStatus - Blood request lifecycle state

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a blood request.
///
/// A request starts `Pending`; every other state is terminal and reached by
/// exactly one processing action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    /// Human-readable label shown alongside the raw value
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending Review",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Fulfilled => "Fulfilled",
            RequestStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "PENDING"),
            RequestStatus::Approved => write!(f, "APPROVED"),
            RequestStatus::Rejected => write!(f, "REJECTED"),
            RequestStatus::Fulfilled => write!(f, "FULFILLED"),
            RequestStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(RequestStatus::Pending),
            "APPROVED" => Ok(RequestStatus::Approved),
            "REJECTED" => Ok(RequestStatus::Rejected),
            "FULFILLED" => Ok(RequestStatus::Fulfilled),
            "CANCELLED" => Ok(RequestStatus::Cancelled),
            _ => Err(format!("Unknown request status: {}", s)),
        }
    }
}
