//! Inventory Request/Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use hemobank::{BloodGroup, BloodInventory, StockStatus};

use crate::application::{GroupAvailability, InventoryStatistics};

/// Create inventory record request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInventoryRequest {
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub units_available: i32,
    pub minimum_stock: Option<i32>,
    pub maximum_capacity: Option<i32>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Update inventory record request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInventoryRequest {
    pub units_available: Option<i32>,
    pub minimum_stock: Option<i32>,
    pub maximum_capacity: Option<i32>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Stock movement request for add-units / remove-units
#[derive(Debug, Deserialize, ToSchema)]
pub struct UnitsUpdateRequest {
    pub units: i32,
    pub notes: Option<String>,
}

/// Inventory response
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryResponse {
    pub id: Uuid,
    pub blood_group: BloodGroup,
    pub units_available: i32,
    pub minimum_stock: i32,
    pub maximum_capacity: i32,
    pub stock_status: StockStatus,
    pub is_critical_shortage: bool,
    pub expiry_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BloodInventory> for InventoryResponse {
    fn from(inv: BloodInventory) -> Self {
        let stock_status = inv.stock_status();
        let is_critical_shortage = inv.is_critical_shortage();
        Self {
            id: inv.id,
            blood_group: inv.blood_group,
            units_available: inv.units_available,
            minimum_stock: inv.minimum_stock,
            maximum_capacity: inv.maximum_capacity,
            stock_status,
            is_critical_shortage,
            expiry_date: inv.expiry_date,
            notes: inv.notes,
            created_at: inv.created_at,
            updated_at: inv.updated_at,
        }
    }
}

/// Per-group availability line
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub blood_group: BloodGroup,
    pub units_available: i32,
    pub status: StockStatus,
    pub available: bool,
}

impl From<GroupAvailability> for AvailabilityResponse {
    fn from(line: GroupAvailability) -> Self {
        Self {
            blood_group: line.blood_group,
            units_available: line.units_available,
            status: line.status,
            available: line.available,
        }
    }
}

/// Result of a point availability check
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityCheckResponse {
    pub blood_group: BloodGroup,
    pub units_requested: i32,
    pub sufficient: bool,
}

/// Ledger-wide statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryStatsResponse {
    pub total_blood_groups: i64,
    pub total_units_available: i64,
    pub critical_shortage_count: i64,
    pub out_of_stock_count: i64,
    pub adequate_stock_count: i64,
}

impl From<InventoryStatistics> for InventoryStatsResponse {
    fn from(stats: InventoryStatistics) -> Self {
        Self {
            total_blood_groups: stats.total_blood_groups,
            total_units_available: stats.total_units_available,
            critical_shortage_count: stats.critical_shortage_count,
            out_of_stock_count: stats.out_of_stock_count,
            adequate_stock_count: stats.adequate_stock_count,
        }
    }
}
