//! Google Sheets values client

pub mod client;

pub use client::{SheetsClient, SheetsError};
