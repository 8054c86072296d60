//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod donor_repository;
mod inventory_repository;
mod request_repository;

pub use donor_repository::*;
pub use inventory_repository::*;
pub use request_repository::*;
