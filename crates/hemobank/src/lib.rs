//! Hemobank Domain Library
//!
//! Core domain types and interfaces for the blood-bank management backend.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Donor, BloodInventory, BloodRequest)
//!   - `value_objects/`: Immutable value types (BloodGroup, StockStatus,
//!     RequestStatus, UrgencyLevel, HealthStatus)
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use hemobank::domain::{BloodGroup, BloodInventory, Donor};
//! use hemobank::ports::{DonorRepository, InventoryRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    BloodGroup, BloodInventory, BloodRequest, DomainError, Donor, HealthStatus, RequestStatus,
    StockStatus, UrgencyLevel, DEFAULT_MAXIMUM_CAPACITY, DEFAULT_MINIMUM_STOCK,
    DONATION_INTERVAL_DAYS, MAX_UNITS_PER_REQUEST, MIN_UNITS_PER_REQUEST, SYSTEM_PROCESSOR,
};
pub use ports::{DonorRepository, InventoryRepository, RequestRepository};
