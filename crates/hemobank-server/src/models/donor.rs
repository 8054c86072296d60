//! Donor Request/Response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use hemobank::{BloodGroup, Donor};

use crate::application::DonorGroupStatistics;

/// Register donor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDonorRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub last_donation_date: Option<NaiveDate>,
    pub age: i32,
    pub weight: f64,
    pub address: String,
}

/// Update donor request. Email is immutable after registration.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDonorRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub last_donation_date: Option<NaiveDate>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub address: Option<String>,
    pub is_eligible: Option<bool>,
}

/// Record a completed donation
#[derive(Debug, Deserialize, ToSchema)]
pub struct DonationDateRequest {
    pub donation_date: NaiveDate,
}

/// Donor response
#[derive(Debug, Serialize, ToSchema)]
pub struct DonorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub last_donation_date: Option<NaiveDate>,
    pub age: i32,
    pub weight: f64,
    pub address: String,
    pub is_eligible: bool,
    /// Evaluated against the local calendar date at response time
    pub can_donate: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Donor> for DonorResponse {
    fn from(donor: Donor) -> Self {
        let can_donate = donor.can_donate();
        Self {
            id: donor.id,
            name: donor.name,
            email: donor.email,
            phone: donor.phone,
            blood_group: donor.blood_group,
            last_donation_date: donor.last_donation_date,
            age: donor.age,
            weight: donor.weight,
            address: donor.address,
            is_eligible: donor.is_eligible,
            can_donate,
            created_at: donor.created_at,
            updated_at: donor.updated_at,
        }
    }
}

/// Per-blood-group donor counters
#[derive(Debug, Serialize, ToSchema)]
pub struct DonorGroupStatsResponse {
    pub blood_group: BloodGroup,
    pub total_donors: i64,
    pub eligible_donors: i64,
    pub available_donors: i64,
}

impl From<DonorGroupStatistics> for DonorGroupStatsResponse {
    fn from(stats: DonorGroupStatistics) -> Self {
        Self {
            blood_group: stats.blood_group,
            total_donors: stats.total_donors,
            eligible_donors: stats.eligible_donors,
            available_donors: stats.available_donors,
        }
    }
}
