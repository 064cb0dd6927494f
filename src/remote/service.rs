//! The seam between the aggregator and the wire.

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{DocumentKind, Period};

use super::reply::DocumentReply;

/// A client for the remote payroll service.
///
/// The aggregator depends on this trait rather than on a concrete HTTP
/// client, so tests can script replies without a network. Every operation is
/// keyed on the employee's person code and a [`Period`].
#[async_trait]
pub trait PayrollService: Send + Sync {
    /// Fetches one payroll document of the given kind for the given period.
    ///
    /// Returns the decoded business reply: `ok == false` means the service
    /// explicitly reported that the document is not available (with a
    /// message in `msg`); `ok == true` means `msg` carries the document's
    /// HTML payload. Transport failures and unrecognizable payloads are
    /// returned as errors.
    async fn fetch_document(
        &self,
        person_id: &str,
        kind: DocumentKind,
        period: Period,
    ) -> ServiceResult<DocumentReply>;

    /// Checks whether a vacation paycheck exists for the given period.
    ///
    /// Returns `true` only when the service replied `ok` with a positive
    /// existence flag.
    async fn has_vacation(&self, person_id: &str, period: Period) -> ServiceResult<bool>;
}
