//! Common types and utilities for Team Pulse

pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use config::{AppConfig, Config};
pub use error::{Error, Result};
pub use store::ResultStore;
