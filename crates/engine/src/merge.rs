//! Residual filtering and reconciliation of server-side pagination with
//! client-side predicates.
//!
//! Two regimes:
//!
//! 1. No residual predicate: the server page and its `totalElements` are
//!    authoritative.
//! 2. A residual predicate is active (wallet id / transaction id): the
//!    fetched page is filtered locally and the filtered list becomes the
//!    entire addressable set, re-paginated client-side. Rows on other
//!    server pages stay invisible until the ledger supports the
//!    predicate. This limitation is part of the contract; do not paper
//!    over it with server totals.

use api_types::transaction::{AccountDetails, Transaction};

use crate::filters::FilterState;
use crate::query::Pagination;
use crate::sort::{Sorting, sort_transactions};

/// One merged, sorted, display-ready page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageView {
    pub items: Vec<Transaction>,
    /// Effective element count: server `totalElements` in regime 1, the
    /// filtered length in regime 2.
    pub total_count: u64,
    pub total_pages: u64,
    /// `true` when regime 2 produced this view, so the UI can label the
    /// result set as filtered-view-only.
    pub residual: bool,
}

fn account_matches(details: Option<&AccountDetails>, needle: &str) -> bool {
    details
        .and_then(|d| d.account_number.as_deref())
        .is_some_and(|number| number.to_lowercase().contains(needle))
}

/// Case-insensitive substring match of the wallet-id predicate against
/// either counterparty account number.
pub fn wallet_matches(tx: &Transaction, wallet_id: &str) -> bool {
    let needle = wallet_id.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    account_matches(tx.from_details.as_ref(), &needle)
        || account_matches(tx.to_details.as_ref(), &needle)
}

fn transaction_id_matches(tx: &Transaction, transaction_id: &str) -> bool {
    let needle = transaction_id.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    tx.id.to_lowercase().contains(&needle)
}

/// Merges one fetched server page into a [`PageView`].
///
/// `total_elements` is the server-reported count for the query; it is
/// only trusted when no residual predicate is active. When a
/// `descriptions` allow-list is set, rows outside it are dropped in both
/// regimes (the ledger has returned over-broad pages before).
pub fn merge_page(
    content: Vec<Transaction>,
    total_elements: u64,
    filters: &FilterState,
    pagination: &Pagination,
    sorting: &Sorting,
) -> PageView {
    let mut rows = content;

    if !filters.descriptions.is_empty() {
        rows.retain(|tx| filters.descriptions.iter().any(|d| *d == tx.description));
    }

    if !filters.has_residual_filter() {
        sort_transactions(&mut rows, sorting);
        return PageView {
            total_count: total_elements,
            total_pages: pagination.total_pages(total_elements),
            residual: false,
            items: rows,
        };
    }

    rows.retain(|tx| {
        wallet_matches(tx, &filters.wallet_id)
            && transaction_id_matches(tx, &filters.transaction_id)
    });
    sort_transactions(&mut rows, sorting);

    let total_count = rows.len() as u64;
    let total_pages = pagination.total_pages(total_count);
    let page_size = pagination.page_size.max(1) as usize;
    let start = (pagination.page.saturating_sub(1) as usize).saturating_mul(page_size);
    let items = if start >= rows.len() {
        Vec::new()
    } else {
        rows[start..(start + page_size).min(rows.len())].to_vec()
    };

    PageView {
        items,
        total_count,
        total_pages,
        residual: true,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use api_types::transaction::{TransactionStatus, TransactionType};

    use super::*;

    fn tx(id: &str, to_account: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            internal_reference: format!("TRX-{id}"),
            user_id: "user-1".to_string(),
            counterparty_user_id: None,
            user_name: None,
            user_phone_number: None,
            user_national_id: None,
            amount: 1000.0,
            currency: "RWF".to_string(),
            status: TransactionStatus::Successful,
            transaction_type: TransactionType::CashOut,
            description: "WALLET_TRANSFER".to_string(),
            from_details: None,
            to_details: Some(AccountDetails {
                account_name: None,
                account_source: None,
                account_number: Some(to_account.to_string()),
                currency: None,
            }),
            commission_amount: None,
            commission_percentage: None,
            vendor_amount: None,
            initiator_confirmed: true,
            receiver_confirmed: true,
            created_at: Utc.with_ymd_and_hms(2026, 2, 4, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 2, 4, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn server_totals_are_authoritative_without_residual_filter() {
        let view = merge_page(
            vec![tx("a", "ACC-1"), tx("b", "ACC-2")],
            240,
            &FilterState::default(),
            &Pagination::default(),
            &Sorting::default(),
        );
        assert!(!view.residual);
        assert_eq!(view.total_count, 240);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.items.len(), 2);
    }

    #[test]
    fn wallet_filter_switches_to_client_side_totals() {
        let filters = FilterState {
            wallet_id: "acc-1".to_string(),
            ..FilterState::default()
        };
        let view = merge_page(
            vec![tx("a", "ACC-10"), tx("b", "ACC-2"), tx("c", "acc-11")],
            9000,
            &filters,
            &Pagination::default(),
            &Sorting::default(),
        );
        assert!(view.residual);
        // Server count must be ignored; only the filtered page counts.
        assert_eq!(view.total_count, 2);
        assert_eq!(view.total_pages, 1);
        let ids: Vec<&str> = view.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn residual_pages_are_sliced_client_side() {
        let filters = FilterState {
            wallet_id: "acc".to_string(),
            ..FilterState::default()
        };
        let content = (0..5).map(|i| tx(&format!("t{i}"), "ACC-9")).collect();
        let view = merge_page(
            content,
            5000,
            &filters,
            &Pagination {
                page: 2,
                page_size: 2,
            },
            &Sorting::default(),
        );
        assert_eq!(view.total_count, 5);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items.len(), 2);

        let content: Vec<Transaction> = (0..5).map(|i| tx(&format!("t{i}"), "ACC-9")).collect();
        let past_the_end = merge_page(
            content,
            5000,
            &filters,
            &Pagination {
                page: 9,
                page_size: 2,
            },
            &Sorting::default(),
        );
        assert!(past_the_end.items.is_empty());
        assert_eq!(past_the_end.total_pages, 3);
    }

    #[test]
    fn description_allow_list_drops_foreign_rows() {
        let mut escrow = tx("e", "ACC-1");
        escrow.description = "ESCROW_PAYMENT".to_string();
        let filters = FilterState {
            descriptions: vec!["WALLET_TRANSFER".to_string()],
            ..FilterState::default()
        };
        let view = merge_page(
            vec![tx("a", "ACC-1"), escrow],
            2,
            &filters,
            &Pagination::default(),
            &Sorting::default(),
        );
        let ids: Vec<&str> = view.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn transaction_id_filter_is_residual_too() {
        let filters = FilterState {
            transaction_id: "T1".to_string(),
            ..FilterState::default()
        };
        let view = merge_page(
            vec![tx("t1-abc", "ACC-1"), tx("t2-def", "ACC-2")],
            77,
            &filters,
            &Pagination::default(),
            &Sorting::default(),
        );
        assert!(view.residual);
        assert_eq!(view.total_count, 1);
        assert_eq!(view.items[0].id, "t1-abc");
    }
}
