//! Inventory Repository Port
//!
//! Abstract interface for the blood-stock ledger. Credit and debit are
//! first-class port operations so implementations can make the
//! check-then-write sequence atomic with respect to concurrent callers on
//! the same blood group.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BloodGroup, BloodInventory, DomainError};

/// Repository interface for BloodInventory entities
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BloodInventory>, DomainError>;

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Option<BloodInventory>, DomainError>;

    async fn find_all(&self) -> Result<Vec<BloodInventory>, DomainError>;

    async fn exists_by_blood_group(&self, blood_group: BloodGroup) -> Result<bool, DomainError>;

    /// Insert-or-update by id
    async fn save(&self, inventory: &BloodInventory) -> Result<BloodInventory, DomainError>;

    /// Returns false when no record with the id existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Atomically increase units-available, recording the note alongside the
    /// movement when one is given. Fails with `NotFound` when the blood group
    /// has no record and `CapacityExceeded` when the credit would push the
    /// row past its maximum capacity; the row is left unchanged in both
    /// cases.
    async fn credit(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError>;

    /// Atomically decrease units-available. Fails with `NotFound` or
    /// `InsufficientStock`; the row is left unchanged in both cases.
    /// Concurrent debits on the same blood group serialize here, so two
    /// callers can never both succeed against a stale balance.
    async fn debit(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError>;

    /// Sum of units-available across all blood groups, 0 when empty
    async fn total_units(&self) -> Result<i64, DomainError>;
}
