//! The document aggregator.
//!
//! Given a signed-in employee and a target year, the aggregator determines
//! which payroll documents should exist, fetches each one from the remote
//! payroll service in a strictly sequential pass, and keeps the local cache
//! in sync with the in-memory collection. Presentation layers observe the
//! collection through [`DocumentAggregator::documents`] and the
//! idle/loading signal through [`DocumentAggregator::subscribe`].

mod schedule;

pub use schedule::{bonus_installments_due, months_to_fetch};

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cache::{CacheStore, DOCUMENTS_KEY, SELECTED_YEAR_KEY};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{DocumentKind, PayrollDocument, Period};
use crate::remote::PayrollService;

/// The aggregator's observable loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No refresh is running.
    Idle,
    /// A refresh is in flight.
    Loading,
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading => write!(f, "loading"),
        }
    }
}

/// Aggregates an employee's payroll documents for a selected year.
///
/// The aggregator owns the document collection and fully replaces it on
/// every refresh. Fetches run one at a time in a deterministic order, so a
/// refresh against an unchanged backend always produces the same collection.
/// Overlapping refreshes are rejected rather than interleaved, and an
/// in-flight refresh can be stopped with
/// [`DocumentAggregator::cancel_refresh`].
pub struct DocumentAggregator {
    service: Arc<dyn PayrollService>,
    cache: CacheStore,
    person_id: String,
    documents: Mutex<Vec<PayrollDocument>>,
    state_tx: watch::Sender<LoadState>,
    state_rx: watch::Receiver<LoadState>,
    refresh_gate: tokio::sync::Mutex<()>,
    cancel: Mutex<CancellationToken>,
}

impl DocumentAggregator {
    /// Creates an aggregator for the given employee.
    pub fn new(
        service: Arc<dyn PayrollService>,
        cache: CacheStore,
        person_id: impl Into<String>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(LoadState::Idle);
        Self {
            service,
            cache,
            person_id: person_id.into(),
            documents: Mutex::new(Vec::new()),
            state_tx,
            state_rx,
            refresh_gate: tokio::sync::Mutex::new(()),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Returns a snapshot of the current document collection.
    pub fn documents(&self) -> Vec<PayrollDocument> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the current loading state.
    pub fn state(&self) -> LoadState {
        *self.state_rx.borrow()
    }

    /// Returns a receiver observing idle/loading transitions.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_rx.clone()
    }

    /// Cancels the in-flight refresh, if any.
    ///
    /// The refresh stops before its next remote call and returns
    /// [`ServiceError::RefreshCancelled`]; documents fetched up to that
    /// point remain in the collection and the cache.
    pub fn cancel_refresh(&self) {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    /// Refreshes the collection for the given year, using today's date to
    /// bound the month range and the installment eligibility.
    pub async fn refresh_for_year(&self, year: i32) -> ServiceResult<()> {
        self.refresh_for_year_on(year, Local::now().date_naive())
            .await
    }

    /// Clock-pinned variant of [`DocumentAggregator::refresh_for_year`] for
    /// callers that need a deterministic notion of "today".
    ///
    /// The collection and its cached copy are cleared up front, and the
    /// requested year is persisted as the last-viewed year before anything
    /// can fail, so a later [`DocumentAggregator::load_cached_selection`]
    /// defaults to it. Individual document failures are logged and skipped;
    /// the only errors surfaced to the caller are a year after the current
    /// calendar year, an overlapping refresh, and an explicit cancellation.
    pub async fn refresh_for_year_on(&self, year: i32, today: NaiveDate) -> ServiceResult<()> {
        let _gate = self
            .refresh_gate
            .try_lock()
            .map_err(|_| ServiceError::RefreshInFlight { year })?;

        let token = CancellationToken::new();
        *self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = token.clone();

        self.state_tx.send_replace(LoadState::Loading);
        info!(year, person = %self.person_id, "starting document refresh");

        // The collection for a year is fully replaced, never merged.
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        if let Err(e) = self.cache.remove(DOCUMENTS_KEY) {
            warn!(error = %e, "failed to clear cached documents");
        }

        // Persisted even when the year is rejected or every fetch fails.
        if let Err(e) = self.cache.put(SELECTED_YEAR_KEY, &year.to_string()) {
            warn!(error = %e, "failed to persist the selected year");
        }

        let months = match months_to_fetch(year, today) {
            Ok(months) => months,
            Err(e) => {
                warn!(year, error = %e, "refresh rejected");
                self.state_tx.send_replace(LoadState::Idle);
                return Err(e);
            }
        };

        for month in months {
            let period = Period::new(year, month);

            if token.is_cancelled() {
                return self.cancelled(year);
            }
            self.fetch_and_store(DocumentKind::Regular, period).await;

            if token.is_cancelled() {
                return self.cancelled(year);
            }
            match self.service.has_vacation(&self.person_id, period).await {
                Ok(true) => {
                    if token.is_cancelled() {
                        return self.cancelled(year);
                    }
                    self.fetch_and_store(DocumentKind::Vacation, period).await;
                }
                Ok(false) => {}
                Err(e) => {
                    // A failed existence-check only suppresses the vacation
                    // fetch for this month.
                    warn!(%period, error = %e, "vacation existence-check failed");
                }
            }
        }

        for kind in bonus_installments_due(year, today) {
            let Some(month) = kind.fixed_month() else {
                continue;
            };
            if token.is_cancelled() {
                return self.cancelled(year);
            }
            self.fetch_and_store(kind, Period::new(year, month)).await;
        }

        let count = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        info!(year, count, "document refresh complete");
        self.state_tx.send_replace(LoadState::Idle);
        Ok(())
    }

    /// Reads the last-viewed year from the cache (defaulting to the current
    /// year when absent or unreadable), refreshes for it, and returns the
    /// year that was used.
    pub async fn load_cached_selection(&self) -> ServiceResult<i32> {
        self.load_cached_selection_on(Local::now().date_naive())
            .await
    }

    /// Clock-pinned variant of
    /// [`DocumentAggregator::load_cached_selection`].
    pub async fn load_cached_selection_on(&self, today: NaiveDate) -> ServiceResult<i32> {
        let year = match self.cache.get::<String>(SELECTED_YEAR_KEY) {
            Ok(Some(stored)) => match stored.parse::<i32>() {
                Ok(year) => year,
                Err(_) => {
                    warn!(stored = %stored, "stored year is not a number, defaulting to current");
                    today.year()
                }
            },
            Ok(None) => today.year(),
            Err(e) => {
                warn!(error = %e, "failed to read the stored year, defaulting to current");
                today.year()
            }
        };

        self.refresh_for_year_on(year, today).await?;
        Ok(year)
    }

    /// Fetches one document and, on a usable reply, appends it to the
    /// collection and persists the updated collection. Failures are logged
    /// and skipped; they never abort the refresh.
    async fn fetch_and_store(&self, kind: DocumentKind, period: Period) {
        match self
            .service
            .fetch_document(&self.person_id, kind, period)
            .await
        {
            Ok(reply) if reply.ok && !reply.msg.is_empty() => {
                let document = PayrollDocument::new(kind, period, reply.msg);
                info!(id = %document.id, "document fetched");
                let snapshot = {
                    let mut documents = self
                        .documents
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    documents.push(document);
                    documents.clone()
                };
                if let Err(e) = self.cache.put(DOCUMENTS_KEY, &snapshot) {
                    warn!(error = %e, "failed to persist the document collection");
                }
            }
            Ok(reply) => {
                info!(kind = %kind, %period, msg = %reply.msg, "document not available, skipping");
            }
            Err(e) => {
                warn!(kind = %kind, %period, error = %e, "document fetch failed, skipping");
            }
        }
    }

    fn cancelled(&self, year: i32) -> ServiceResult<()> {
        warn!(year, "document refresh cancelled");
        self.state_tx.send_replace(LoadState::Idle);
        Err(ServiceError::RefreshCancelled { year })
    }
}
