//! Hemobank API Models
//!
//! Request/response DTOs for the HTTP layer, mapped explicitly from the
//! domain entities.

mod common;
mod dashboard;
mod donor;
mod inventory;
mod request;

pub use common::*;
pub use dashboard::*;
pub use donor::*;
pub use inventory::*;
pub use request::*;
