//! Request Repository Port
//!
//! Abstract interface for blood-request persistence. The one-shot status
//! transition is a first-class port operation (`process`) so implementations
//! can guard it with a compare-and-swap on the pending state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{BloodGroup, BloodRequest, DomainError, RequestStatus, UrgencyLevel};

/// Repository interface for BloodRequest entities
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BloodRequest>, DomainError>;

    async fn find_all(&self) -> Result<Vec<BloodRequest>, DomainError>;

    async fn find_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    /// Requests in the given status, oldest first
    async fn find_by_status_oldest_first(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    /// Requests matching both urgency and status, oldest first
    async fn find_by_urgency_and_status_oldest_first(
        &self,
        urgency: UrgencyLevel,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    async fn find_by_contact_email(&self, email: &str) -> Result<Vec<BloodRequest>, DomainError>;

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    /// Requests created on or after the cutoff, newest first
    async fn find_created_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    /// Pending requests created before the cutoff, most urgent first, then
    /// oldest first
    async fn find_overdue_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError>;

    /// Case-insensitive substring match on the hospital name
    async fn search_by_hospital(&self, fragment: &str) -> Result<Vec<BloodRequest>, DomainError>;

    /// Case-insensitive substring match on the patient name
    async fn search_by_patient(&self, fragment: &str) -> Result<Vec<BloodRequest>, DomainError>;

    /// Insert-or-update by id
    async fn save(&self, request: &BloodRequest) -> Result<BloodRequest, DomainError>;

    /// Returns false when no request with the id existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Atomically apply the one-shot transition out of `Pending`: set the
    /// terminal status, processor, notes and processed-at timestamp. Fails
    /// with `NotFound` when the id is unknown and `AlreadyProcessed` when the
    /// request has left `Pending` - two concurrent callers can never both
    /// observe the pending state and both transition it.
    async fn process(
        &self,
        id: Uuid,
        status: RequestStatus,
        processed_by: &str,
        notes: Option<&str>,
    ) -> Result<BloodRequest, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;

    async fn count_by_status(&self, status: RequestStatus) -> Result<i64, DomainError>;

    /// Pending requests flagged as emergencies
    async fn count_emergency_pending(&self) -> Result<i64, DomainError>;
}
