//! Civicmap Store - Storage ports and adapters
//!
//! This crate defines the record store ports consumed by proximity search and
//! the request layers, and provides in-memory and PostgreSQL adapters.

pub mod memory;
pub mod ports;
pub mod postgres;
