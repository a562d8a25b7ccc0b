//! Two-tier reversal workflow: standard reversal and force reversal with
//! conditional debt creation.
//!
//! Per transaction the lifecycle is `Drafting -> InFlight -> Reversed`,
//! with failures returning to `Drafting` and preserving the draft
//! (reason, notes, idempotency key) so the operator can retry without
//! re-typing. The idempotency key is assigned exactly once per draft and
//! reused on a same-draft retry; only a fresh draft gets a fresh key.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use api_types::reversal::{ReversalRequest, ReversalResponse};
use api_types::transaction::{Transaction, TransactionStatus};

use crate::{EngineError, ResultEngine};

const REVERSAL_OUT_SUFFIX: &str = "_REVERSAL_OUT";
const REVERSAL_IN_SUFFIX: &str = "_REVERSAL_IN";

/// A description carrying a reversal marker identifies the artifact of a
/// prior reversal; such transactions must not be reversed again.
pub fn is_reversal_artifact(description: &str) -> bool {
    description.ends_with(REVERSAL_OUT_SUFFIX) || description.ends_with(REVERSAL_IN_SUFFIX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReversalKind {
    Standard,
    /// May create a debt obligation against the receiver, due
    /// immediately, when their balance cannot cover the reversal.
    Force,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftState {
    Drafting,
    InFlight,
    Reversed,
}

/// Operator-editable reversal draft for one transaction.
#[derive(Clone, Debug)]
pub struct ReversalDraft {
    pub kind: ReversalKind,
    pub reason: String,
    pub admin_notes: String,
    reference: String,
    idempotency_key: Option<String>,
    state: DraftState,
}

impl ReversalDraft {
    /// The ledger reference the reversal is addressed to.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    /// Assigned on the first submit; stable across retries of this draft.
    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }
}

/// Idempotency-key capability, injected so tests can supply a
/// deterministic generator. Production uses [`UuidKeyGen`]
/// unconditionally.
pub trait IdempotencyKeyGen {
    fn generate(&self) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UuidKeyGen;

impl IdempotencyKeyGen for UuidKeyGen {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Write access to the ledger's reversal endpoints.
pub trait ReversalApi {
    fn reverse(
        &self,
        kind: ReversalKind,
        reference: &str,
        request: &ReversalRequest,
    ) -> impl Future<Output = ResultEngine<ReversalResponse>> + Send;
}

/// Removes the reference from the in-flight set when the submission
/// future completes or is dropped mid-flight.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    reference: String,
}

impl InFlightGuard {
    fn try_acquire(set: &Arc<Mutex<HashSet<String>>>, reference: &str) -> Option<Self> {
        let mut in_flight = set.lock().expect("in-flight set poisoned");
        if !in_flight.insert(reference.to_string()) {
            return None;
        }
        Some(Self {
            set: Arc::clone(set),
            reference: reference.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.set.lock().expect("in-flight set poisoned");
        in_flight.remove(&self.reference);
    }
}

/// Drives reversal drafts and enforces per-reference mutual exclusion.
#[derive(Debug)]
pub struct ReversalWorkflow<G = UuidKeyGen> {
    keygen: G,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl ReversalWorkflow<UuidKeyGen> {
    pub fn new() -> Self {
        Self::with_keygen(UuidKeyGen)
    }
}

impl Default for ReversalWorkflow<UuidKeyGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdempotencyKeyGen> ReversalWorkflow<G> {
    pub fn with_keygen(keygen: G) -> Self {
        Self {
            keygen,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Opens a fresh draft for `transaction`.
    ///
    /// Fails fast with [`EngineError::Validation`] when the transaction
    /// is not `SUCCESSFUL` or is itself a reversal artifact; no network
    /// call is made in either case.
    pub fn draft(&self, kind: ReversalKind, transaction: &Transaction) -> ResultEngine<ReversalDraft> {
        if transaction.status != TransactionStatus::Successful {
            return Err(EngineError::Validation(format!(
                "only successful transactions can be reversed (status is {})",
                transaction.status.as_str()
            )));
        }
        if is_reversal_artifact(&transaction.description) {
            return Err(EngineError::Validation(format!(
                "transaction {} is itself a reversal and cannot be reversed again",
                transaction.internal_reference
            )));
        }
        Ok(ReversalDraft {
            kind,
            reason: String::new(),
            admin_notes: String::new(),
            reference: transaction.internal_reference.clone(),
            idempotency_key: None,
            state: DraftState::Drafting,
        })
    }

    pub fn is_in_flight(&self, reference: &str) -> bool {
        self.in_flight
            .lock()
            .expect("in-flight set poisoned")
            .contains(reference)
    }

    /// Submits the draft to the ledger.
    ///
    /// A second submission for the same reference while one is in flight
    /// is rejected before it reaches the network. On success the draft
    /// becomes `Reversed` and the caller must invalidate + refetch its
    /// query session; on failure the draft returns to `Drafting` with
    /// all fields preserved.
    pub async fn submit<L: ReversalApi>(
        &self,
        draft: &mut ReversalDraft,
        ledger: &L,
    ) -> ResultEngine<ReversalResponse> {
        if draft.state == DraftState::Reversed {
            return Err(EngineError::Validation(format!(
                "transaction {} is already reversed",
                draft.reference
            )));
        }
        if draft.reason.trim().is_empty() {
            return Err(EngineError::Validation(
                "a reason for the reversal is required".to_string(),
            ));
        }
        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight, &draft.reference) else {
            return Err(EngineError::Validation(format!(
                "a reversal for {} is already in flight",
                draft.reference
            )));
        };

        let key = draft
            .idempotency_key
            .get_or_insert_with(|| self.keygen.generate())
            .clone();
        let reason = draft.reason.trim().to_string();
        let request = match draft.kind {
            ReversalKind::Standard => {
                ReversalRequest::standard(reason, draft.admin_notes.clone(), key)
            }
            ReversalKind::Force => ReversalRequest::force(reason, draft.admin_notes.clone(), key),
        };

        draft.state = DraftState::InFlight;
        let result = ledger.reverse(draft.kind, &draft.reference, &request).await;
        match result {
            Ok(response) if response.is_success() => {
                draft.state = DraftState::Reversed;
                Ok(response)
            }
            Ok(response) => {
                draft.state = DraftState::Drafting;
                Err(EngineError::Server(
                    response
                        .message
                        .unwrap_or_else(|| "reversal rejected by the ledger".to_string()),
                ))
            }
            Err(err) => {
                draft.state = DraftState::Drafting;
                Err(err)
            }
        }
    }
}
