//! Adapters - Infrastructure implementations of the domain ports

pub mod postgres;
