//! Domain Entities
//!
//! Core domain models: Donor, BloodInventory, BloodRequest.

mod donor;
mod inventory;
mod request;

pub use donor::*;
pub use inventory::*;
pub use request::*;
