//! StockStatus - Derived classification of an inventory record

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification of units-available relative to the minimum-stock threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    OutOfStock,
    Critical,
    Low,
    Adequate,
}

impl StockStatus {
    /// Classify a stock level. Pure function of (units_available, minimum_stock).
    pub fn classify(units_available: i32, minimum_stock: i32) -> Self {
        if units_available == 0 {
            StockStatus::OutOfStock
        } else if units_available <= minimum_stock {
            StockStatus::Critical
        } else if units_available <= minimum_stock * 2 {
            StockStatus::Low
        } else {
            StockStatus::Adequate
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
            StockStatus::Critical => write!(f, "CRITICAL"),
            StockStatus::Low => write!(f, "LOW"),
            StockStatus::Adequate => write!(f, "ADEQUATE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_units_is_out_of_stock() {
        assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
    }

    #[test]
    fn test_minimum_stock_boundary_is_critical() {
        assert_eq!(StockStatus::classify(5, 5), StockStatus::Critical);
        assert_eq!(StockStatus::classify(1, 5), StockStatus::Critical);
    }

    #[test]
    fn test_low_band_runs_up_to_twice_minimum() {
        assert_eq!(StockStatus::classify(6, 5), StockStatus::Low);
        assert_eq!(StockStatus::classify(10, 5), StockStatus::Low);
    }

    #[test]
    fn test_above_twice_minimum_is_adequate() {
        assert_eq!(StockStatus::classify(11, 5), StockStatus::Adequate);
    }

    #[test]
    fn test_classification_is_deterministic() {
        assert_eq!(StockStatus::classify(7, 3), StockStatus::classify(7, 3));
    }
}
