//! BloodRequest - Request for blood units from a patient or hospital
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::validate::{valid_email, valid_phone};
use crate::domain::value_objects::{BloodGroup, RequestStatus, UrgencyLevel};

pub const MIN_UNITS_PER_REQUEST: i32 = 1;
pub const MAX_UNITS_PER_REQUEST: i32 = 10;

/// Sentinel recorded as the processor of system-initiated transitions
pub const SYSTEM_PROCESSOR: &str = "System";

/// A request for blood units.
///
/// Invariant: the transition away from `Pending` happens exactly once; a
/// request in any other state cannot be reprocessed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: Uuid,
    pub requester_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub blood_group: BloodGroup,
    pub units_requested: i32,
    pub urgency_level: UrgencyLevel,
    pub hospital_name: String,
    pub patient_name: String,
    pub medical_reason: Option<String>,
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
    pub processed_by: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BloodRequest {
    /// Create a new request with generated ID and timestamps. Requests are
    /// always created `Pending`; no inventory check happens at creation time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        requester_name: String,
        contact_email: String,
        contact_phone: String,
        blood_group: BloodGroup,
        units_requested: i32,
        urgency_level: UrgencyLevel,
        hospital_name: String,
        patient_name: String,
        medical_reason: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            requester_name,
            contact_email,
            contact_phone,
            blood_group,
            units_requested,
            urgency_level,
            hospital_name,
            patient_name,
            medical_reason,
            status: RequestStatus::Pending,
            admin_notes: None,
            processed_by: None,
            processed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check field-level invariants. Must hold before any persistence.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.requester_name.trim().len() < 2 || self.requester_name.len() > 100 {
            return Err(DomainError::Validation(
                "Requester name must be between 2 and 100 characters".to_string(),
            ));
        }
        if !valid_email(&self.contact_email) {
            return Err(DomainError::Validation("Invalid email format".to_string()));
        }
        if !valid_phone(&self.contact_phone) {
            return Err(DomainError::Validation(
                "Invalid phone number format".to_string(),
            ));
        }
        if !(MIN_UNITS_PER_REQUEST..=MAX_UNITS_PER_REQUEST).contains(&self.units_requested) {
            return Err(DomainError::Validation(format!(
                "Units requested must be between {} and {}",
                MIN_UNITS_PER_REQUEST, MAX_UNITS_PER_REQUEST
            )));
        }
        if self.hospital_name.trim().is_empty() || self.hospital_name.len() > 150 {
            return Err(DomainError::Validation(
                "Hospital name is required and must not exceed 150 characters".to_string(),
            ));
        }
        if self.patient_name.trim().is_empty() || self.patient_name.len() > 100 {
            return Err(DomainError::Validation(
                "Patient name is required and must not exceed 100 characters".to_string(),
            ));
        }
        if let Some(reason) = &self.medical_reason {
            if reason.len() > 500 {
                return Err(DomainError::Validation(
                    "Medical reason must not exceed 500 characters".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Apply the single processing action: record who processed the request,
    /// when, the terminal status and any notes. Fails with `AlreadyProcessed`
    /// if the request has left `Pending`.
    pub fn mark_processed(
        &mut self,
        processed_by: &str,
        new_status: RequestStatus,
        notes: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::AlreadyProcessed(self.id));
        }
        let now = Utc::now();
        self.processed_by = Some(processed_by.to_string());
        self.processed_at = Some(now);
        self.status = new_status;
        self.admin_notes = notes;
        self.updated_at = now;
        Ok(())
    }
}
