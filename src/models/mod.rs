//! Core data models for the payroll document service.
//!
//! This module contains all the domain models used throughout the service.

mod document;
mod period;

pub use document::{DocumentKind, PayrollDocument};
pub use period::{Period, month_name};
