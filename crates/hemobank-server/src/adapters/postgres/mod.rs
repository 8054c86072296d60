//! PostgreSQL adapters

pub mod donor_repository;
pub mod inventory_repository;
pub mod request_repository;

pub use donor_repository::PgDonorRepository;
pub use inventory_repository::PgInventoryRepository;
pub use request_repository::PgRequestRepository;
