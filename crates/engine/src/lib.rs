pub use classify::{FailureInfo, FailureRule, FailureTaxonomy, RelatedWindow};
pub use classify::{channel_name, related_failures};
pub use error::EngineError;
pub use filters::{DateRangePreset, FilterState, parse_amount};
pub use merge::{PageView, merge_page, wallet_matches};
pub use query::{Pagination, build_query};
pub use reversal::{
    DraftState, IdempotencyKeyGen, ReversalApi, ReversalDraft, ReversalKind, ReversalWorkflow,
    UuidKeyGen, is_reversal_artifact,
};
pub use session::{
    FetchOutcome, FetchTicket, QuerySession, SessionConfig, TransactionStore,
};
pub use sort::{SortColumn, SortDirection, Sorting, sort_transactions};

mod classify;
mod error;
pub mod export;
mod filters;
mod merge;
mod query;
mod reversal;
mod session;
mod sort;

pub type ResultEngine<T> = Result<T, EngineError>;
