use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum TransactionStatus {
        Pending,
        Successful,
        Failed,
        RolledBack,
        Cancelled,
    }

    impl TransactionStatus {
        /// Returns the canonical status string used by the ledger.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Pending => "PENDING",
                Self::Successful => "SUCCESSFUL",
                Self::Failed => "FAILED",
                Self::RolledBack => "ROLLED_BACK",
                Self::Cancelled => "CANCELLED",
            }
        }
    }

    impl TryFrom<&str> for TransactionStatus {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "PENDING" => Ok(Self::Pending),
                "SUCCESSFUL" => Ok(Self::Successful),
                "FAILED" => Ok(Self::Failed),
                "ROLLED_BACK" => Ok(Self::RolledBack),
                "CANCELLED" => Ok(Self::Cancelled),
                other => Err(format!("invalid transaction status: {other}")),
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum TransactionType {
        CashIn,
        CashOut,
    }

    impl TransactionType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::CashIn => "CASH_IN",
                Self::CashOut => "CASH_OUT",
            }
        }
    }

    impl TryFrom<&str> for TransactionType {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "CASH_IN" => Ok(Self::CashIn),
                "CASH_OUT" => Ok(Self::CashOut),
                other => Err(format!("invalid transaction type: {other}")),
            }
        }
    }

    /// Well-known description tags the console filters on.
    ///
    /// The ledger treats `description` as free-form, so these are plain
    /// constants rather than a closed enum.
    pub const WALLET_TRANSFER: &str = "WALLET_TRANSFER";
    pub const WALLET_TRANSFER_REVERSAL_OUT: &str = "WALLET_TRANSFER_REVERSAL_OUT";
    pub const WALLET_TRANSFER_REVERSAL_IN: &str = "WALLET_TRANSFER_REVERSAL_IN";

    /// Counterparty account block attached to a transaction.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountDetails {
        #[serde(default)]
        pub account_name: Option<String>,
        #[serde(default)]
        pub account_source: Option<String>,
        #[serde(default)]
        pub account_number: Option<String>,
        #[serde(default)]
        pub currency: Option<String>,
    }

    /// A ledger transaction as returned by the retrieval API.
    ///
    /// Immutable once fetched; a refetch replaces the whole value. The
    /// `internal_reference` is the ledger-unique key reversal endpoints
    /// are addressed by (never `id`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        pub internal_reference: String,
        pub user_id: String,
        #[serde(default)]
        pub counterparty_user_id: Option<String>,
        #[serde(default)]
        pub user_name: Option<String>,
        #[serde(default)]
        pub user_phone_number: Option<String>,
        #[serde(default)]
        pub user_national_id: Option<String>,
        /// Ledger-reported amount. Compared and sorted, never summed.
        pub amount: f64,
        #[serde(default = "default_currency")]
        pub currency: String,
        pub status: TransactionStatus,
        pub transaction_type: TransactionType,
        /// Free-form, but doubles as a coarse classification tag
        /// (e.g. `WALLET_TRANSFER_REVERSAL_OUT`).
        pub description: String,
        #[serde(default)]
        pub from_details: Option<AccountDetails>,
        #[serde(default)]
        pub to_details: Option<AccountDetails>,
        #[serde(default)]
        pub commission_amount: Option<f64>,
        #[serde(default)]
        pub commission_percentage: Option<f64>,
        #[serde(default)]
        pub vendor_amount: Option<f64>,
        #[serde(default)]
        pub initiator_confirmed: bool,
        #[serde(default)]
        pub receiver_confirmed: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    fn default_currency() -> String {
        "RWF".to_string()
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub enum SortOrder {
        #[serde(rename = "ASC")]
        Asc,
        #[default]
        #[serde(rename = "DESC")]
        Desc,
    }

    impl SortOrder {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Asc => "ASC",
                Self::Desc => "DESC",
            }
        }
    }

    /// The predicate subset the ledger understands.
    ///
    /// Unsupported console predicates (wallet id, transaction id) never
    /// appear here; they are evaluated client-side after the fetch.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionQuery {
        /// 0-based server page.
        pub page: u64,
        pub limit: u64,
        pub sort_by: String,
        pub order: SortOrder,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub start_date: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub end_date: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub status: Option<TransactionStatus>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub transaction_type: Option<TransactionType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub descriptions: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub transaction_reference: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user_phone_number: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user_national_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub min_amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub max_amount: Option<f64>,
    }

    impl TransactionQuery {
        /// Emits the GET query-parameter list for this query.
        ///
        /// `descriptions` is repeated once per element; absent predicates
        /// are omitted entirely (never sent as empty strings).
        pub fn to_params(&self) -> Vec<(&'static str, String)> {
            let mut params = vec![
                ("page", self.page.to_string()),
                ("limit", self.limit.to_string()),
                ("sortBy", self.sort_by.clone()),
                ("order", self.order.as_str().to_string()),
            ];
            if let Some(start) = self.start_date {
                params.push(("startDate", start.to_rfc3339()));
            }
            if let Some(end) = self.end_date {
                params.push(("endDate", end.to_rfc3339()));
            }
            if let Some(status) = self.status {
                params.push(("status", status.as_str().to_string()));
            }
            if let Some(kind) = self.transaction_type {
                params.push(("transactionType", kind.as_str().to_string()));
            }
            if let Some(description) = &self.description {
                params.push(("description", description.clone()));
            }
            for description in &self.descriptions {
                params.push(("descriptions", description.clone()));
            }
            if let Some(reference) = &self.transaction_reference {
                params.push(("transactionReference", reference.clone()));
            }
            if let Some(user_id) = &self.user_id {
                params.push(("userId", user_id.clone()));
            }
            if let Some(user_name) = &self.user_name {
                params.push(("userName", user_name.clone()));
            }
            if let Some(phone) = &self.user_phone_number {
                params.push(("userPhoneNumber", phone.clone()));
            }
            if let Some(national_id) = &self.user_national_id {
                params.push(("userNationalId", national_id.clone()));
            }
            if let Some(min) = self.min_amount {
                params.push(("minAmount", min.to_string()));
            }
            if let Some(max) = self.max_amount {
                params.push(("maxAmount", max.to_string()));
            }
            params
        }
    }

    /// One page of the paginated retrieval envelope.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionPage {
        #[serde(default)]
        pub content: Vec<Transaction>,
        #[serde(default)]
        pub total_elements: Option<u64>,
        #[serde(default)]
        pub total_pages: Option<u64>,
        #[serde(default)]
        pub size: Option<u64>,
        #[serde(default)]
        pub number: Option<u64>,
    }

    /// Retrieval response envelope.
    ///
    /// `success == false` or a missing `data`/`content` means "empty
    /// page" to callers, not an error.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct TransactionPageResponse {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub data: Option<TransactionPage>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct TransactionDetailResponse {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub data: Option<Transaction>,
    }
}

pub mod reversal {
    use super::*;

    /// Request body for the reversal endpoints, keyed by
    /// `internal_reference` in the URL.
    ///
    /// The debt fields are only present on force reversals; a standard
    /// reversal body carries reason, notes and idempotency key alone.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReversalRequest {
        pub reason: String,
        pub admin_notes: String,
        pub idempotency_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub create_debt_if_insufficient_funds: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub debt_due_days: Option<u32>,
    }

    impl ReversalRequest {
        pub fn standard(reason: String, admin_notes: String, idempotency_key: String) -> Self {
            Self {
                reason,
                admin_notes,
                idempotency_key,
                create_debt_if_insufficient_funds: None,
                debt_due_days: None,
            }
        }

        /// Force variant: debt may be created against the receiver, due
        /// immediately.
        pub fn force(reason: String, admin_notes: String, idempotency_key: String) -> Self {
            Self {
                reason,
                admin_notes,
                idempotency_key,
                create_debt_if_insufficient_funds: Some(true),
                debt_due_days: Some(0),
            }
        }
    }

    /// Response envelope of both reversal endpoints.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ReversalResponse {
        #[serde(default)]
        pub status: String,
        #[serde(default)]
        pub message: Option<String>,
    }

    impl ReversalResponse {
        pub fn is_success(&self) -> bool {
            self.status == "success"
        }
    }
}
