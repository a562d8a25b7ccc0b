//! Translation of the filter model into the ledger's predicate subset.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use api_types::transaction::TransactionQuery;

use crate::filters::{FilterState, parse_amount};
use crate::sort::Sorting;

/// View-session pagination. `page` is 1-based and clamped to `>= 1`; the
/// outgoing [`TransactionQuery`] carries the 0-based equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl Pagination {
    /// Page count for `count` items at the current page size.
    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.page_size.max(1))
    }
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Builds the outgoing ledger query from the current session state.
///
/// Every string predicate is trimmed and omitted when empty; amount
/// bounds degrade silently on unparsable or negative input; the date
/// predicate follows [`FilterState::resolve_date_range`]. Predicates the
/// ledger does not support (wallet id, transaction id) are never
/// included here.
pub fn build_query(
    filters: &FilterState,
    pagination: &Pagination,
    sorting: &Sorting,
    now: DateTime<Utc>,
    tz: Tz,
) -> TransactionQuery {
    let date_range = filters.resolve_date_range(now, tz);
    TransactionQuery {
        page: pagination.page.saturating_sub(1),
        limit: pagination.page_size,
        sort_by: sorting.column.as_str().to_string(),
        order: sorting.direction.into(),
        start_date: date_range.map(|(start, _)| start),
        end_date: date_range.map(|(_, end)| end),
        status: filters.status,
        transaction_type: filters.transaction_type,
        description: non_empty(&filters.description),
        descriptions: filters
            .descriptions
            .iter()
            .filter_map(|d| non_empty(d))
            .collect(),
        transaction_reference: non_empty(&filters.transaction_reference),
        user_id: non_empty(&filters.user_id),
        user_name: non_empty(&filters.user_name),
        user_phone_number: non_empty(&filters.user_phone_number),
        user_national_id: non_empty(&filters.user_national_id),
        min_amount: parse_amount(&filters.min_amount),
        max_amount: parse_amount(&filters.max_amount),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Africa::Kigali;

    use api_types::transaction::{SortOrder, TransactionStatus};

    use crate::filters::DateRangePreset;
    use crate::sort::{SortColumn, SortDirection};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 8, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_emit_created_at_descending_and_zero_based_page() {
        let query = build_query(
            &FilterState::default(),
            &Pagination::default(),
            &Sorting::default(),
            now(),
            Kigali,
        );
        assert_eq!(query.page, 0);
        assert_eq!(query.limit, 50);
        assert_eq!(query.sort_by, "createdAt");
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn one_sided_custom_range_emits_no_date_predicate() {
        let filters = FilterState {
            date_range: DateRangePreset::Custom,
            custom_start: Some(chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            ..FilterState::default()
        };
        let query = build_query(
            &filters,
            &Pagination::default(),
            &Sorting::default(),
            now(),
            Kigali,
        );
        assert!(query.start_date.is_none());
        assert!(query.end_date.is_none());
    }

    #[test]
    fn invalid_amount_bounds_are_absent() {
        for bad in ["-1", "NaN", "lots", "inf"] {
            let filters = FilterState {
                min_amount: bad.to_string(),
                max_amount: bad.to_string(),
                ..FilterState::default()
            };
            let query = build_query(
                &filters,
                &Pagination::default(),
                &Sorting::default(),
                now(),
                Kigali,
            );
            assert!(query.min_amount.is_none(), "min for {bad:?}");
            assert!(query.max_amount.is_none(), "max for {bad:?}");
        }
    }

    #[test]
    fn blank_predicates_are_omitted_not_sent_empty() {
        let filters = FilterState {
            transaction_reference: "   ".to_string(),
            user_name: " Mukamana ".to_string(),
            wallet_id: "ACC-42".to_string(),
            ..FilterState::default()
        };
        let query = build_query(
            &filters,
            &Pagination::default(),
            &Sorting::default(),
            now(),
            Kigali,
        );
        assert!(query.transaction_reference.is_none());
        assert_eq!(query.user_name.as_deref(), Some("Mukamana"));
        // Wallet id is ledger-unsupported and must never leave the client.
        let params = query.to_params();
        assert!(params.iter().all(|(key, _)| *key != "walletId"));
    }

    #[test]
    fn status_and_sorting_carry_through() {
        let filters = FilterState {
            status: Some(TransactionStatus::Failed),
            ..FilterState::default()
        };
        let mut sorting = Sorting::default();
        sorting.toggle(SortColumn::Amount);
        sorting.toggle(SortColumn::Amount);
        let query = build_query(
            &filters,
            &Pagination {
                page: 3,
                page_size: 25,
            },
            &sorting,
            now(),
            Kigali,
        );
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 25);
        assert_eq!(query.status, Some(TransactionStatus::Failed));
        assert_eq!(query.sort_by, "amount");
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(sorting.direction, SortDirection::Asc);
    }
}
