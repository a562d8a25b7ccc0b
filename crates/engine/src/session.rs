//! One query session per active view.
//!
//! The session owns the filter, pagination and sorting state
//! (single-writer), numbers every fetch, and drops responses that a later
//! state change has superseded (last-request-wins). Transport stays with
//! the caller: `begin_fetch` hands out a ticket, the caller performs the
//! network hop, `apply_fetch` merges the result or reports it stale.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use api_types::transaction::{Transaction, TransactionQuery};

use crate::ResultEngine;
use crate::filters::FilterState;
use crate::merge::{PageView, merge_page};
use crate::query::{Pagination, build_query};
use crate::sort::{SortColumn, Sorting};

/// Session-wide settings supplied by the embedding console.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub page_size: u64,
    /// Reporting timezone for date-preset day boundaries.
    pub timezone: Tz,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            timezone: chrono_tz::Africa::Kigali,
        }
    }
}

/// Normalized result of one ledger fetch.
///
/// The transport layer folds `success == false` and missing page content
/// into [`FetchOutcome::Empty`]; errors travel separately as
/// [`crate::EngineError`]. Every caller therefore handles all three
/// cases explicitly.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    Page {
        content: Vec<Transaction>,
        total_elements: u64,
    },
    Empty,
}

/// Read access to the paginated transaction ledger.
pub trait TransactionStore {
    fn fetch_page(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = ResultEngine<FetchOutcome>> + Send;
}

/// Handle for one numbered fetch.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: TransactionQuery,
}

#[derive(Debug)]
pub struct QuerySession {
    config: SessionConfig,
    filters: FilterState,
    pagination: Pagination,
    sorting: Sorting,
    seq: u64,
    page: Option<PageView>,
}

impl QuerySession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            pagination: Pagination {
                page: 1,
                page_size: config.page_size,
            },
            config,
            filters: FilterState::default(),
            sorting: Sorting::default(),
            seq: 0,
            page: None,
        }
    }

    pub fn with_filters(config: SessionConfig, filters: FilterState) -> Self {
        let mut session = Self::new(config);
        session.filters = filters;
        session
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn sorting(&self) -> &Sorting {
        &self.sorting
    }

    /// The current merged page, if any fetch has been applied.
    pub fn page(&self) -> Option<&PageView> {
        self.page.as_ref()
    }

    /// Marks the current state dirty, superseding any in-flight fetch.
    ///
    /// Callers invoke this explicitly after any action that changes what
    /// the view should show (e.g. a completed reversal), then refetch.
    pub fn invalidate(&mut self) {
        self.seq += 1;
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.pagination.page = 1;
        self.invalidate();
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(FilterState::default());
    }

    pub fn set_page(&mut self, page: u64) {
        self.pagination.page = page.max(1);
        self.invalidate();
    }

    pub fn set_page_size(&mut self, page_size: u64) {
        self.pagination.page_size = page_size.max(1);
        self.pagination.page = 1;
        self.invalidate();
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sorting.toggle(column);
        self.invalidate();
    }

    /// The outgoing ledger query for the current state.
    ///
    /// With a residual predicate active the server page is pinned to the
    /// first one: the fetched page is the whole addressable set and the
    /// session paginates it client-side (see [`crate::merge`]).
    pub fn query(&self, now: DateTime<Utc>) -> TransactionQuery {
        let mut query = build_query(
            &self.filters,
            &self.pagination,
            &self.sorting,
            now,
            self.config.timezone,
        );
        if self.filters.has_residual_filter() {
            query.page = 0;
        }
        query
    }

    /// Starts a numbered fetch for the current state.
    pub fn begin_fetch(&mut self, now: DateTime<Utc>) -> FetchTicket {
        self.seq += 1;
        FetchTicket {
            seq: self.seq,
            query: self.query(now),
        }
    }

    /// Merges a fetch result. Returns `false` when the ticket has been
    /// superseded; the response is dropped, not merged.
    pub fn apply_fetch(&mut self, ticket_seq: u64, outcome: FetchOutcome) -> bool {
        if ticket_seq != self.seq {
            tracing::debug!(ticket_seq, latest = self.seq, "dropping stale fetch result");
            return false;
        }
        let (content, total_elements) = match outcome {
            FetchOutcome::Page {
                content,
                total_elements,
            } => (content, total_elements),
            FetchOutcome::Empty => (Vec::new(), 0),
        };
        self.page = Some(merge_page(
            content,
            total_elements,
            &self.filters,
            &self.pagination,
            &self.sorting,
        ));
        true
    }

    /// Fetches and merges in one step against a [`TransactionStore`].
    pub async fn refetch<S: TransactionStore>(
        &mut self,
        store: &S,
        now: DateTime<Utc>,
    ) -> ResultEngine<bool> {
        let ticket = self.begin_fetch(now);
        let outcome = store.fetch_page(&ticket.query).await?;
        Ok(self.apply_fetch(ticket.seq, outcome))
    }
}
