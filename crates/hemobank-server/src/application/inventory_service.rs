//! Inventory Application Service
//!
//! Orchestrates the blood-stock ledger: creation, credit/debit, stock
//! classification and aggregate statistics.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use hemobank::{
    BloodGroup, BloodInventory, DomainError, InventoryRepository, StockStatus,
    DEFAULT_MAXIMUM_CAPACITY, DEFAULT_MINIMUM_STOCK,
};

/// Aggregate view over the whole ledger, recomputed on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStatistics {
    pub total_blood_groups: i64,
    pub total_units_available: i64,
    pub critical_shortage_count: i64,
    pub out_of_stock_count: i64,
    pub adequate_stock_count: i64,
}

/// Per-group availability line
#[derive(Debug, Clone)]
pub struct GroupAvailability {
    pub blood_group: BloodGroup,
    pub units_available: i32,
    pub status: StockStatus,
    pub available: bool,
}

/// Optional fields for a partial inventory update
#[derive(Debug, Default)]
pub struct InventoryUpdate {
    pub units_available: Option<i32>,
    pub minimum_stock: Option<i32>,
    pub maximum_capacity: Option<i32>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Application service for the Inventory Ledger
pub struct InventoryService<R: InventoryRepository> {
    repo: Arc<R>,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create the ledger record for a blood group. Each group may have at
    /// most one record.
    pub async fn create(
        &self,
        blood_group: BloodGroup,
        units_available: i32,
        minimum_stock: Option<i32>,
        maximum_capacity: Option<i32>,
        expiry_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Result<BloodInventory, DomainError> {
        if self.repo.exists_by_blood_group(blood_group).await? {
            return Err(DomainError::duplicate(
                "Blood inventory",
                "blood group",
                blood_group,
            ));
        }

        let inventory = BloodInventory::new(
            blood_group,
            units_available,
            minimum_stock.unwrap_or(DEFAULT_MINIMUM_STOCK),
            maximum_capacity.unwrap_or(DEFAULT_MAXIMUM_CAPACITY),
            expiry_date,
            notes,
        );
        inventory.validate()?;

        let saved = self.repo.save(&inventory).await?;
        tracing::info!(
            "Created blood inventory for {} with {} units ({})",
            saved.blood_group,
            saved.units_available,
            saved.id
        );
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodInventory>, DomainError> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Option<BloodInventory>, DomainError> {
        self.repo.find_by_blood_group(blood_group).await
    }

    pub async fn list_all(&self) -> Result<Vec<BloodInventory>, DomainError> {
        self.repo.find_all().await
    }

    /// Partial update: only supplied fields are applied. The capacity
    /// invariant is re-checked against the merged record before saving.
    pub async fn update(
        &self,
        id: Uuid,
        update: InventoryUpdate,
    ) -> Result<BloodInventory, DomainError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blood inventory", id))?;

        if let Some(units) = update.units_available {
            current.units_available = units;
        }
        if let Some(min) = update.minimum_stock {
            current.minimum_stock = min;
        }
        if let Some(max) = update.maximum_capacity {
            current.maximum_capacity = max;
        }
        if let Some(expiry) = update.expiry_date {
            current.expiry_date = Some(expiry);
        }
        if let Some(notes) = update.notes {
            current.notes = Some(notes);
        }
        current.updated_at = Utc::now();
        current.validate()?;

        self.repo.save(&current).await
    }

    /// Add units to a blood group, bounded by its maximum capacity
    pub async fn add_units(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError> {
        if units <= 0 {
            return Err(DomainError::Validation(
                "Units to add must be positive".to_string(),
            ));
        }
        let updated = self.repo.credit(blood_group, units, notes).await?;
        tracing::info!(
            "Added {} units to {} (now {})",
            units,
            blood_group,
            updated.units_available
        );
        Ok(updated)
    }

    /// Remove units from a blood group, bounded below by zero
    pub async fn remove_units(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError> {
        if units <= 0 {
            return Err(DomainError::Validation(
                "Units to remove must be positive".to_string(),
            ));
        }
        let updated = self.repo.debit(blood_group, units, notes).await?;
        tracing::info!(
            "Removed {} units from {} (now {})",
            units,
            blood_group,
            updated.units_available
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted blood inventory {}", id);
        }
        Ok(deleted)
    }

    /// Whether the blood group currently holds at least `required` units.
    /// An absent ledger record counts as insufficient, not as an error.
    pub async fn has_sufficient_units(
        &self,
        blood_group: BloodGroup,
        required: i32,
    ) -> Result<bool, DomainError> {
        let inventory = self.repo.find_by_blood_group(blood_group).await?;
        Ok(inventory.map_or(false, |inv| inv.units_available >= required))
    }

    /// Units currently held for a blood group, 0 when no record exists
    pub async fn units_available(&self, blood_group: BloodGroup) -> Result<i32, DomainError> {
        let inventory = self.repo.find_by_blood_group(blood_group).await?;
        Ok(inventory.map_or(0, |inv| inv.units_available))
    }

    pub async fn critical_shortages(&self) -> Result<Vec<BloodInventory>, DomainError> {
        self.list_with_status(|status| {
            matches!(status, StockStatus::Critical | StockStatus::OutOfStock)
        })
        .await
    }

    pub async fn low_stock(&self) -> Result<Vec<BloodInventory>, DomainError> {
        self.list_with_status(|status| status == StockStatus::Low)
            .await
    }

    pub async fn out_of_stock(&self) -> Result<Vec<BloodInventory>, DomainError> {
        self.list_with_status(|status| status == StockStatus::OutOfStock)
            .await
    }

    pub async fn adequate_stock(&self) -> Result<Vec<BloodInventory>, DomainError> {
        self.list_with_status(|status| status == StockStatus::Adequate)
            .await
    }

    /// Availability line per blood group, classification recomputed per call
    pub async fn availability(&self) -> Result<Vec<GroupAvailability>, DomainError> {
        let inventories = self.repo.find_all().await?;
        Ok(inventories
            .into_iter()
            .map(|inv| GroupAvailability {
                blood_group: inv.blood_group,
                units_available: inv.units_available,
                status: inv.stock_status(),
                available: inv.units_available > 0,
            })
            .collect())
    }

    pub async fn statistics(&self) -> Result<InventoryStatistics, DomainError> {
        let inventories = self.repo.find_all().await?;
        let total_units_available = self.repo.total_units().await?;

        let mut critical = 0;
        let mut out_of_stock = 0;
        let mut adequate = 0;
        for inv in &inventories {
            match inv.stock_status() {
                StockStatus::OutOfStock => {
                    out_of_stock += 1;
                    // An empty row is also below its minimum
                    critical += 1;
                }
                StockStatus::Critical => critical += 1,
                StockStatus::Adequate => adequate += 1,
                StockStatus::Low => {}
            }
        }

        Ok(InventoryStatistics {
            total_blood_groups: inventories.len() as i64,
            total_units_available,
            critical_shortage_count: critical,
            out_of_stock_count: out_of_stock,
            adequate_stock_count: adequate,
        })
    }

    /// Seed a zero-stock record for every canonical blood group. Idempotent:
    /// existing records are left untouched.
    pub async fn initialize_blood_groups(&self) -> Result<(), DomainError> {
        for blood_group in BloodGroup::ALL {
            if !self.repo.exists_by_blood_group(blood_group).await? {
                self.repo.save(&BloodInventory::empty(blood_group)).await?;
                tracing::info!("Initialized blood inventory for {}", blood_group);
            }
        }
        Ok(())
    }

    /// Number of ledger rows at or below their minimum stock
    pub async fn critical_shortage_count(&self) -> Result<i64, DomainError> {
        Ok(self.critical_shortages().await?.len() as i64)
    }

    async fn list_with_status<F>(&self, keep: F) -> Result<Vec<BloodInventory>, DomainError>
    where
        F: Fn(StockStatus) -> bool,
    {
        let inventories = self.repo.find_all().await?;
        Ok(inventories
            .into_iter()
            .filter(|inv| keep(inv.stock_status()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryInventoryRepository;

    fn service() -> InventoryService<InMemoryInventoryRepository> {
        InventoryService::new(Arc::new(InMemoryInventoryRepository::default()))
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_blood_group() {
        let svc = service();
        svc.create(BloodGroup::APositive, 10, None, None, None, None)
            .await
            .unwrap();
        let err = svc
            .create(BloodGroup::APositive, 5, None, None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn test_create_applies_default_thresholds() {
        let svc = service();
        let inv = svc
            .create(BloodGroup::BNegative, 0, None, None, None, None)
            .await
            .unwrap();
        assert_eq!(inv.minimum_stock, 5);
        assert_eq!(inv.maximum_capacity, 100);
    }

    #[tokio::test]
    async fn test_capacity_scenario() {
        // A+ with units=10, min=5, max=20
        let svc = service();
        svc.create(BloodGroup::APositive, 10, Some(5), Some(20), None, None)
            .await
            .unwrap();

        let inv = svc
            .add_units(BloodGroup::APositive, 8, None)
            .await
            .unwrap();
        assert_eq!(inv.units_available, 18);

        let err = svc
            .add_units(BloodGroup::APositive, 5, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));
        assert_eq!(svc.units_available(BloodGroup::APositive).await.unwrap(), 18);

        let inv = svc
            .remove_units(BloodGroup::APositive, 18, None)
            .await
            .unwrap();
        assert_eq!(inv.units_available, 0);
        assert_eq!(inv.stock_status(), StockStatus::OutOfStock);
    }

    #[tokio::test]
    async fn test_debit_then_credit_round_trips() {
        let svc = service();
        svc.create(BloodGroup::OPositive, 12, Some(5), Some(50), None, None)
            .await
            .unwrap();
        svc.remove_units(BloodGroup::OPositive, 7, None)
            .await
            .unwrap();
        svc.add_units(BloodGroup::OPositive, 7, None).await.unwrap();
        assert_eq!(svc.units_available(BloodGroup::OPositive).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_movements_on_unknown_group_fail_not_found() {
        let svc = service();
        let err = svc
            .add_units(BloodGroup::AbNegative, 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        let err = svc
            .remove_units(BloodGroup::AbNegative, 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_has_sufficient_units_is_false_for_absent_group() {
        let svc = service();
        assert!(!svc
            .has_sufficient_units(BloodGroup::ONegative, 1)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_initialize_blood_groups_is_idempotent() {
        let svc = service();
        svc.create(BloodGroup::APositive, 42, None, None, None, None)
            .await
            .unwrap();

        svc.initialize_blood_groups().await.unwrap();
        svc.initialize_blood_groups().await.unwrap();

        let all = svc.list_all().await.unwrap();
        assert_eq!(all.len(), 8);
        // The pre-existing record keeps its stock
        assert_eq!(svc.units_available(BloodGroup::APositive).await.unwrap(), 42);
        assert_eq!(svc.units_available(BloodGroup::ONegative).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_statistics_and_status_lists() {
        let svc = service();
        svc.create(BloodGroup::APositive, 0, Some(5), Some(100), None, None)
            .await
            .unwrap();
        svc.create(BloodGroup::BPositive, 3, Some(5), Some(100), None, None)
            .await
            .unwrap();
        svc.create(BloodGroup::OPositive, 8, Some(5), Some(100), None, None)
            .await
            .unwrap();
        svc.create(BloodGroup::AbPositive, 30, Some(5), Some(100), None, None)
            .await
            .unwrap();

        let stats = svc.statistics().await.unwrap();
        assert_eq!(stats.total_blood_groups, 4);
        assert_eq!(stats.total_units_available, 41);
        assert_eq!(stats.critical_shortage_count, 2);
        assert_eq!(stats.out_of_stock_count, 1);
        assert_eq!(stats.adequate_stock_count, 1);

        assert_eq!(svc.low_stock().await.unwrap().len(), 1);
        assert_eq!(svc.out_of_stock().await.unwrap().len(), 1);
        assert_eq!(svc.critical_shortages().await.unwrap().len(), 2);
    }
}
