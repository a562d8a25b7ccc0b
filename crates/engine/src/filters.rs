//! Canonical filter model for the transaction search surface.
//!
//! A [`FilterState`] holds every predicate the console can express,
//! including the ones the ledger cannot evaluate server-side. Translation
//! into the ledger's predicate subset happens in [`crate::query`]; the
//! leftovers are applied after the fetch in [`crate::merge`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use api_types::transaction::{
    TransactionStatus, TransactionType, WALLET_TRANSFER, WALLET_TRANSFER_REVERSAL_IN,
    WALLET_TRANSFER_REVERSAL_OUT,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePreset {
    Today,
    #[default]
    Last7Days,
    Last30Days,
    Custom,
    All,
}

/// All supported query predicates for one view session.
///
/// String predicates keep the raw operator input; trimming and omission of
/// empty values happen at query-build time. `min_amount`/`max_amount` stay
/// strings on purpose: invalid or negative input degrades to "no filter"
/// instead of an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub transaction_reference: String,
    /// Substring match on the transaction id. Not supported by the
    /// ledger; evaluated client-side.
    pub transaction_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_phone_number: String,
    pub user_national_id: String,
    /// Substring match on counterparty account numbers. Not supported by
    /// the ledger; evaluated client-side.
    pub wallet_id: String,
    pub date_range: DateRangePreset,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    /// `None` means "all statuses".
    pub status: Option<TransactionStatus>,
    /// `None` means "all types".
    pub transaction_type: Option<TransactionType>,
    pub description: String,
    /// Multi-select description allow-list; takes precedence as a
    /// set-membership filter when non-empty.
    pub descriptions: Vec<String>,
    pub min_amount: String,
    pub max_amount: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            transaction_reference: String::new(),
            transaction_id: String::new(),
            user_id: String::new(),
            user_name: String::new(),
            user_phone_number: String::new(),
            user_national_id: String::new(),
            wallet_id: String::new(),
            date_range: DateRangePreset::Last7Days,
            custom_start: None,
            custom_end: None,
            status: None,
            transaction_type: None,
            description: String::new(),
            descriptions: Vec::new(),
            min_amount: String::new(),
            max_amount: String::new(),
        }
    }
}

impl FilterState {
    /// Preset used by the refund-disputes screen: wallet transfers and
    /// their reversal artifacts over the last 30 days.
    pub fn wallet_transfers() -> Self {
        Self {
            date_range: DateRangePreset::Last30Days,
            descriptions: vec![
                WALLET_TRANSFER.to_string(),
                WALLET_TRANSFER_REVERSAL_OUT.to_string(),
                WALLET_TRANSFER_REVERSAL_IN.to_string(),
            ],
            ..Self::default()
        }
    }

    /// Returns `true` when a predicate the ledger cannot evaluate is set,
    /// switching the merge layer to client-side pagination.
    pub fn has_residual_filter(&self) -> bool {
        !self.wallet_id.trim().is_empty() || !self.transaction_id.trim().is_empty()
    }

    /// Resolves the date predicate to an inclusive `[start, end]` pair in
    /// UTC, with day boundaries taken in the reporting timezone.
    ///
    /// `Custom` requires both bounds; with only one set the predicate is
    /// dropped silently. `All` never produces a predicate.
    pub fn resolve_date_range(
        &self,
        now: DateTime<Utc>,
        tz: Tz,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.with_timezone(&tz).date_naive();
        match self.date_range {
            DateRangePreset::Today => Some((start_of_day(today, tz)?, end_of_day(today, tz)?)),
            DateRangePreset::Last7Days => {
                let start = today - chrono::Duration::days(7);
                Some((start_of_day(start, tz)?, end_of_day(today, tz)?))
            }
            DateRangePreset::Last30Days => {
                let start = today - chrono::Duration::days(30);
                Some((start_of_day(start, tz)?, end_of_day(today, tz)?))
            }
            DateRangePreset::Custom => {
                let (start, end) = (self.custom_start?, self.custom_end?);
                Some((start_of_day(start, tz)?, end_of_day(end, tz)?))
            }
            DateRangePreset::All => None,
        }
    }
}

fn start_of_day(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let local = tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()?;
    Some(local.with_timezone(&Utc))
}

fn end_of_day(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let local = tz
        .from_local_datetime(&date.and_hms_milli_opt(23, 59, 59, 999)?)
        .latest()?;
    Some(local.with_timezone(&Utc))
}

/// Permissive amount parsing: trims the input and returns `None` for
/// anything that is not a finite, non-negative number.
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
