//! Deterministic client-side ordering over the sortable columns.
//!
//! Used as a fallback when the ledger's ordering is insufficient and to
//! keep residually-filtered pages internally consistent. The sort is
//! stable in both directions because the comparator, not the slice, is
//! reversed.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use api_types::transaction::{SortOrder, Transaction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Id,
    #[default]
    CreatedAt,
    Amount,
    Status,
    TransactionType,
    UserId,
}

impl SortColumn {
    /// Returns the ledger's `sortBy` name for the column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "createdAt",
            Self::Amount => "amount",
            Self::Status => "status",
            Self::TransactionType => "transactionType",
            Self::UserId => "userId",
        }
    }
}

impl TryFrom<&str> for SortColumn {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "id" => Ok(Self::Id),
            "createdAt" => Ok(Self::CreatedAt),
            "amount" => Ok(Self::Amount),
            "status" => Ok(Self::Status),
            "transactionType" => Ok(Self::TransactionType),
            "userId" => Ok(Self::UserId),
            other => Err(format!("invalid sort column: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => SortOrder::Asc,
            SortDirection::Desc => SortOrder::Desc,
        }
    }
}

/// Current sort selection of a view session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Sorting {
    /// Toggling the current column flips direction; selecting a new
    /// column resets to descending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            *self = Self {
                column,
                direction: SortDirection::Desc,
            };
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::CreatedAt => a
            .created_at
            .timestamp_millis()
            .cmp(&b.created_at.timestamp_millis()),
        SortColumn::Amount => a.amount.total_cmp(&b.amount),
        SortColumn::Status => a.status.as_str().cmp(b.status.as_str()),
        SortColumn::TransactionType => a.transaction_type.as_str().cmp(b.transaction_type.as_str()),
        SortColumn::UserId => a.user_id.cmp(&b.user_id),
    }
}

/// Stable in-place sort; ties preserve input order.
pub fn sort_transactions(items: &mut [Transaction], sorting: &Sorting) {
    items.sort_by(|a, b| {
        let ordering = compare(a, b, sorting.column);
        match sorting.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use api_types::transaction::{TransactionStatus, TransactionType};

    use super::*;

    fn tx(id: &str, amount: f64, hour: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            internal_reference: format!("TRX-{id}"),
            user_id: "user-1".to_string(),
            counterparty_user_id: None,
            user_name: None,
            user_phone_number: None,
            user_national_id: None,
            amount,
            currency: "RWF".to_string(),
            status: TransactionStatus::Successful,
            transaction_type: TransactionType::CashOut,
            description: "WALLET_TRANSFER".to_string(),
            from_details: None,
            to_details: None,
            commission_amount: None,
            commission_percentage: None,
            vendor_amount: None,
            initiator_confirmed: true,
            receiver_confirmed: true,
            created_at: Utc.with_ymd_and_hms(2026, 2, 4, hour, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 2, 4, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn equal_amounts_preserve_input_order_in_both_directions() {
        let input = vec![tx("a", 100.0, 1), tx("b", 100.0, 2), tx("c", 50.0, 3)];

        let mut ascending = input.clone();
        sort_transactions(
            &mut ascending,
            &Sorting {
                column: SortColumn::Amount,
                direction: SortDirection::Asc,
            },
        );
        let ids: Vec<&str> = ascending.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let mut descending = input;
        sort_transactions(
            &mut descending,
            &Sorting {
                column: SortColumn::Amount,
                direction: SortDirection::Desc,
            },
        );
        let ids: Vec<&str> = descending.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn created_at_compares_as_epoch_millis() {
        let mut items = vec![tx("late", 1.0, 9), tx("early", 1.0, 3)];
        sort_transactions(
            &mut items,
            &Sorting {
                column: SortColumn::CreatedAt,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(items[0].id, "early");
    }

    #[test]
    fn toggle_flips_then_resets() {
        let mut sorting = Sorting::default();
        assert_eq!(sorting.column, SortColumn::CreatedAt);
        assert_eq!(sorting.direction, SortDirection::Desc);

        sorting.toggle(SortColumn::CreatedAt);
        assert_eq!(sorting.direction, SortDirection::Asc);

        sorting.toggle(SortColumn::Amount);
        assert_eq!(sorting.column, SortColumn::Amount);
        assert_eq!(sorting.direction, SortDirection::Desc);
    }
}
