//! Remote payroll service client.
//!
//! This module defines the [`PayrollService`] trait consumed by the
//! aggregator, the [`HttpPayrollService`] implementation that talks to the
//! STV web service over HTTP, and the reply normalization that tolerates the
//! backend's diagnostic-prefixed JSON payloads.

mod http;
mod reply;
mod service;

pub use http::HttpPayrollService;
pub use reply::{DocumentReply, decode_document_reply, decode_vacation_reply};
pub use service::PayrollService;
