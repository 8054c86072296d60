//! Donor Repository Port
//!
//! Abstract interface for donor persistence operations.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{BloodGroup, DomainError, Donor};

/// Repository interface for Donor entities
#[async_trait]
pub trait DonorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Donor>, DomainError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Donor>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Donor>, DomainError>;

    async fn find_by_blood_group(&self, blood_group: BloodGroup)
        -> Result<Vec<Donor>, DomainError>;

    /// Case-insensitive substring match on the donor name
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Donor>, DomainError>;

    /// Donors whose last donation is on or after the cutoff, newest first
    async fn find_donated_since(&self, cutoff: NaiveDate) -> Result<Vec<Donor>, DomainError>;

    /// Insert-or-update by id
    async fn save(&self, donor: &Donor) -> Result<Donor, DomainError>;

    /// Returns false when no donor with the id existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;

    async fn count_eligible(&self) -> Result<i64, DomainError>;
}
