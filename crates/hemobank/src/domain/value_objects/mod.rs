//! Value Objects
//!
//! Immutable domain value types.

mod blood_group;
mod health_status;
mod request_status;
mod stock_status;
mod urgency_level;

pub use blood_group::*;
pub use health_status::*;
pub use request_status::*;
pub use stock_status::*;
pub use urgency_level::*;
