//! Failure triage: category mapping, retry eligibility and correlation
//! of related failed transactions.
//!
//! The taxonomy is configuration, not code: categories evolve with the
//! ledger, so callers can swap the rule table without touching the
//! engine. The shipped default mirrors the console's current mapping.
//! Correlation output is operator triage context only; it never feeds
//! the reversal decision.

use chrono::Duration;

use api_types::transaction::{Transaction, TransactionStatus};

/// Classification verdict for one failed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureInfo {
    pub category: String,
    pub retry_eligible: bool,
}

/// One ordered rule: first rule whose keyword appears in the (lowercased)
/// description wins.
#[derive(Clone, Debug)]
pub struct FailureRule {
    pub category: String,
    pub retry_eligible: bool,
    pub keywords: Vec<String>,
}

impl FailureRule {
    fn new(category: &str, retry_eligible: bool, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            retry_eligible,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Versioned keyword table mapping failure descriptions to categories.
#[derive(Clone, Debug)]
pub struct FailureTaxonomy {
    rules: Vec<FailureRule>,
    fallback: FailureInfo,
}

impl Default for FailureTaxonomy {
    fn default() -> Self {
        Self::new(
            vec![
                FailureRule::new("Insufficient Funds", false, &["insufficient", "balance"]),
                FailureRule::new("Network Error", true, &["timeout", "network"]),
                FailureRule::new("Validation Error", false, &["invalid", "validation"]),
                FailureRule::new("Provider Error", true, &["provider", "gateway"]),
            ],
            FailureInfo {
                category: "Unknown Error".to_string(),
                retry_eligible: true,
            },
        )
    }
}

impl FailureTaxonomy {
    pub fn new(rules: Vec<FailureRule>, fallback: FailureInfo) -> Self {
        Self { rules, fallback }
    }

    /// Pure mapping from status + description to a triage verdict.
    ///
    /// Anything that is not `FAILED` classifies as not applicable and
    /// never retry-eligible.
    pub fn classify(&self, status: TransactionStatus, description: &str) -> FailureInfo {
        if status != TransactionStatus::Failed {
            return FailureInfo {
                category: "N/A".to_string(),
                retry_eligible: false,
            };
        }
        let description = description.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| description.contains(k.as_str())) {
                return FailureInfo {
                    category: rule.category.clone(),
                    retry_eligible: rule.retry_eligible,
                };
            }
        }
        self.fallback.clone()
    }
}

/// Bounds for [`related_failures`].
#[derive(Clone, Copy, Debug)]
pub struct RelatedWindow {
    pub max_age: Duration,
    /// Relative amount tolerance (0.10 = ±10% of the anchor amount).
    pub amount_tolerance: f64,
    pub limit: usize,
}

impl Default for RelatedWindow {
    fn default() -> Self {
        Self {
            max_age: Duration::days(7),
            amount_tolerance: 0.10,
            limit: 5,
        }
    }
}

/// Other `FAILED` transactions of the same user within the window,
/// newest first as supplied.
pub fn related_failures<'a>(
    transaction: &Transaction,
    all: &'a [Transaction],
    window: &RelatedWindow,
) -> Vec<&'a Transaction> {
    if transaction.status != TransactionStatus::Failed {
        return Vec::new();
    }
    let tolerance = transaction.amount.abs() * window.amount_tolerance;
    all.iter()
        .filter(|candidate| {
            candidate.id != transaction.id
                && candidate.status == TransactionStatus::Failed
                && candidate.user_id == transaction.user_id
                && (candidate.created_at - transaction.created_at).abs() <= window.max_age
                && (candidate.amount - transaction.amount).abs() <= tolerance
        })
        .take(window.limit)
        .collect()
}

/// Payment channel label derived from the description tag.
pub fn channel_name(description: &str) -> &'static str {
    let description = description.to_uppercase();
    if description.contains("ESCROW") {
        "Escrow"
    } else if description.contains("MOBILE") {
        "Mobile Money"
    } else if description.contains("BANK") {
        "Bank Transfer"
    } else {
        "Wallet"
    }
}
