//! Payroll document aggregation for the STV employee self-service portal.
//!
//! This crate fetches an employee's payroll documents (monthly paychecks,
//! vacation paychecks, and the two 13º-salário installments) from the remote
//! STV payroll web service, keeps a durable local cache in sync, and exposes
//! the aggregated collection to a presentation layer over an HTTP API.

#![warn(missing_docs)]

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod remote;
