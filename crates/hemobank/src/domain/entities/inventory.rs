//! BloodInventory - Stock ledger for one blood group
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{BloodGroup, StockStatus};

pub const DEFAULT_MINIMUM_STOCK: i32 = 5;
pub const DEFAULT_MAXIMUM_CAPACITY: i32 = 100;

/// Stock record for a single blood group.
///
/// Invariant: `0 <= units_available <= maximum_capacity` after every
/// mutation. Mutations that would break the bound are rejected, not clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodInventory {
    pub id: Uuid,
    /// Natural key: one record per blood group
    pub blood_group: BloodGroup,
    pub units_available: i32,
    pub minimum_stock: i32,
    pub maximum_capacity: i32,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BloodInventory {
    pub fn new(
        blood_group: BloodGroup,
        units_available: i32,
        minimum_stock: i32,
        maximum_capacity: i32,
        expiry_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            blood_group,
            units_available,
            minimum_stock,
            maximum_capacity,
            expiry_date,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Zero-stock record with default thresholds, used when seeding the ledger
    pub fn empty(blood_group: BloodGroup) -> Self {
        Self::new(
            blood_group,
            0,
            DEFAULT_MINIMUM_STOCK,
            DEFAULT_MAXIMUM_CAPACITY,
            None,
            Some("Initialized automatically".to_string()),
        )
    }

    /// Check field-level invariants. Must hold before any persistence.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.units_available < 0 {
            return Err(DomainError::Validation(
                "Units available cannot be negative".to_string(),
            ));
        }
        if self.minimum_stock < 0 {
            return Err(DomainError::Validation(
                "Minimum stock level cannot be negative".to_string(),
            ));
        }
        if self.maximum_capacity < 0 {
            return Err(DomainError::Validation(
                "Maximum capacity cannot be negative".to_string(),
            ));
        }
        if self.units_available > self.maximum_capacity {
            return Err(DomainError::Validation(format!(
                "Units available ({}) cannot exceed maximum capacity ({})",
                self.units_available, self.maximum_capacity
            )));
        }
        Ok(())
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.units_available, self.minimum_stock)
    }

    pub fn is_critical_shortage(&self) -> bool {
        self.units_available <= self.minimum_stock
    }

    pub fn is_at_max_capacity(&self) -> bool {
        self.units_available >= self.maximum_capacity
    }

    /// Increase stock, rejecting the mutation if it would exceed capacity
    pub fn credit(&mut self, units: i32) -> Result<(), DomainError> {
        if units <= 0 {
            return Err(DomainError::Validation(
                "Units to add must be positive".to_string(),
            ));
        }
        if self.units_available + units > self.maximum_capacity {
            return Err(DomainError::CapacityExceeded {
                blood_group: self.blood_group,
                units,
                capacity: self.maximum_capacity,
            });
        }
        self.units_available += units;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decrease stock, rejecting the mutation if not enough units are held
    pub fn debit(&mut self, units: i32) -> Result<(), DomainError> {
        if units <= 0 {
            return Err(DomainError::Validation(
                "Units to remove must be positive".to_string(),
            ));
        }
        if self.units_available < units {
            return Err(DomainError::InsufficientStock {
                blood_group: self.blood_group,
                available: self.units_available,
                requested: units,
            });
        }
        self.units_available -= units;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(units: i32, min: i32, max: i32) -> BloodInventory {
        BloodInventory::new(BloodGroup::APositive, units, min, max, None, None)
    }

    #[test]
    fn test_credit_within_capacity() {
        let mut inv = inventory(10, 5, 20);
        inv.credit(8).unwrap();
        assert_eq!(inv.units_available, 18);
    }

    #[test]
    fn test_credit_over_capacity_is_rejected_not_clamped() {
        let mut inv = inventory(18, 5, 20);
        let err = inv.credit(5).unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));
        assert_eq!(inv.units_available, 18);
    }

    #[test]
    fn test_debit_to_zero_reports_out_of_stock() {
        let mut inv = inventory(18, 5, 20);
        inv.debit(18).unwrap();
        assert_eq!(inv.units_available, 0);
        assert_eq!(inv.stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_debit_more_than_held_is_rejected() {
        let mut inv = inventory(3, 5, 20);
        let err = inv.debit(5).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
        assert_eq!(inv.units_available, 3);
    }

    #[test]
    fn test_debit_then_credit_round_trips() {
        let mut inv = inventory(12, 5, 20);
        inv.debit(7).unwrap();
        inv.credit(7).unwrap();
        assert_eq!(inv.units_available, 12);
    }

    #[test]
    fn test_bounds_hold_after_any_sequence() {
        let mut inv = inventory(10, 5, 20);
        for op in [8, -5, -13, 25, -2, 4] {
            let _ = if op >= 0 { inv.credit(op) } else { inv.debit(-op) };
            assert!(inv.units_available >= 0);
            assert!(inv.units_available <= inv.maximum_capacity);
        }
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let mut inv = inventory(10, 5, 20);
        assert!(inv.credit(0).is_err());
        assert!(inv.debit(-1).is_err());
        assert_eq!(inv.units_available, 10);
    }

    #[test]
    fn test_validate_rejects_units_above_capacity() {
        let inv = inventory(30, 5, 20);
        assert!(matches!(inv.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_shortage_and_capacity_flags() {
        assert!(inventory(5, 5, 20).is_critical_shortage());
        assert!(!inventory(6, 5, 20).is_critical_shortage());
        assert!(inventory(20, 5, 20).is_at_max_capacity());
    }
}
