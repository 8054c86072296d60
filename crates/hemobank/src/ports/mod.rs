//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer interacts with the
//! persistence layer. Implementations of these traits live in the server
//! crate's adapters.

pub mod repositories;

// Re-exports
pub use repositories::*;
