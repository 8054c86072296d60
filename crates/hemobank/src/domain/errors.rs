//! Domain Errors
//!
//! Logical outcomes every operation can produce. All of these are local,
//! recoverable results returned to the caller; none are fatal.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::BloodGroup;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} with {field} {value} already exists")]
    DuplicateKey {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Adding {units} units to {blood_group} would exceed maximum capacity of {capacity}")]
    CapacityExceeded {
        blood_group: BloodGroup,
        units: i32,
        capacity: i32,
    },

    #[error(
        "Insufficient blood units available for {blood_group}. Current: {available}, Requested: {requested}"
    )]
    InsufficientStock {
        blood_group: BloodGroup,
        available: i32,
        requested: i32,
    },

    #[error("Blood request {0} has already been processed")]
    AlreadyProcessed(Uuid),

    #[error("Failed to fulfill blood request {id}: {reason}")]
    FulfillmentFailed { id: Uuid, reason: String },

    #[error("Repository error: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            entity,
            key: id.to_string(),
        }
    }

    pub fn not_found_key<K: ToString>(entity: &'static str, key: K) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate<V: ToString>(entity: &'static str, field: &'static str, value: V) -> Self {
        Self::DuplicateKey {
            entity,
            field,
            value: value.to_string(),
        }
    }
}
