//! Civicmap Core - Domain models, error taxonomy, and configuration
//!
//! This crate contains the value types shared by the proximity search engine,
//! the storage adapters, and the request layers.

pub mod config;
pub mod error;
pub mod models;

pub use error::{CivicmapError, Result};
