//! Donor - Registered blood donor
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::validate::{valid_email, valid_phone};
use crate::domain::value_objects::BloodGroup;

/// Donors must wait this many full days between donations.
pub const DONATION_INTERVAL_DAYS: u64 = 56;

/// A registered blood donor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: Uuid,
    pub name: String,
    /// Unique across all donors
    pub email: String,
    /// Unique across all donors
    pub phone: String,
    pub blood_group: BloodGroup,
    pub last_donation_date: Option<NaiveDate>,
    pub age: i32,
    pub weight: f64,
    pub address: String,
    /// Administrative flag, independent of the donation-interval rule
    pub is_eligible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donor {
    /// Create a new donor with generated ID and timestamps. New donors are
    /// eligible by default.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        email: String,
        phone: String,
        blood_group: BloodGroup,
        last_donation_date: Option<NaiveDate>,
        age: i32,
        weight: f64,
        address: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            blood_group,
            last_donation_date,
            age,
            weight,
            address,
            is_eligible: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check all field-level invariants. Must hold before any persistence.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().len() < 2 || self.name.len() > 100 {
            return Err(DomainError::Validation(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }
        if !valid_email(&self.email) {
            return Err(DomainError::Validation("Invalid email format".to_string()));
        }
        if !valid_phone(&self.phone) {
            return Err(DomainError::Validation(
                "Invalid phone number format".to_string(),
            ));
        }
        if !(18..=65).contains(&self.age) {
            return Err(DomainError::Validation(
                "Donor must be between 18 and 65 years old".to_string(),
            ));
        }
        if self.weight < 50.0 {
            return Err(DomainError::Validation(
                "Weight must be at least 50 kg".to_string(),
            ));
        }
        if self.address.trim().is_empty() || self.address.len() > 255 {
            return Err(DomainError::Validation(
                "Address is required and must not exceed 255 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the donor may donate on the given date: the eligibility flag
    /// must be set and the last donation, if any, must be strictly more than
    /// 56 days in the past.
    pub fn can_donate_on(&self, today: NaiveDate) -> bool {
        if !self.is_eligible {
            return false;
        }
        match self.last_donation_date {
            None => true,
            Some(last) => {
                let cutoff = today - Days::new(DONATION_INTERVAL_DAYS);
                last < cutoff
            }
        }
    }

    /// [`Donor::can_donate_on`] evaluated against the local calendar date
    pub fn can_donate(&self) -> bool {
        self.can_donate_on(Local::now().date_naive())
    }
}
