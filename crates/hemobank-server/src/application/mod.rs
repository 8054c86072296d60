//! Application Services
//!
//! Use-case orchestration over the domain ports. Services are generic over
//! their repository traits so tests can run them against in-memory
//! implementations.

pub mod dashboard_service;
pub mod donor_service;
pub mod inventory_service;
pub mod request_service;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard_service::{DashboardService, DashboardSnapshot};
pub use donor_service::{DonorGroupStatistics, DonorService, DonorUpdate};
pub use inventory_service::{
    GroupAvailability, InventoryService, InventoryStatistics, InventoryUpdate,
};
pub use request_service::{GroupRequestStatistics, RequestService, RequestStatistics};
