//! CSV export of the current page for the console's export action.

use std::io::Write;

use serde::Serialize;

use api_types::transaction::Transaction;

use crate::ResultEngine;

#[derive(Serialize)]
struct ExportRow<'a> {
    reference: &'a str,
    user_id: &'a str,
    user_name: &'a str,
    created_at: String,
    amount: f64,
    currency: &'a str,
    transaction_type: &'a str,
    description: &'a str,
    status: &'a str,
    from_account: &'a str,
    to_account: &'a str,
}

fn account_number(details: Option<&api_types::transaction::AccountDetails>) -> &str {
    details
        .and_then(|d| d.account_number.as_deref())
        .unwrap_or("")
}

/// Writes the given transactions as CSV, header row included.
pub fn write_csv<W: Write>(writer: W, items: &[Transaction]) -> ResultEngine<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for tx in items {
        csv_writer.serialize(ExportRow {
            reference: &tx.internal_reference,
            user_id: &tx.user_id,
            user_name: tx.user_name.as_deref().unwrap_or(""),
            created_at: tx.created_at.to_rfc3339(),
            amount: tx.amount,
            currency: &tx.currency,
            transaction_type: tx.transaction_type.as_str(),
            description: &tx.description,
            status: tx.status.as_str(),
            from_account: account_number(tx.from_details.as_ref()),
            to_account: account_number(tx.to_details.as_ref()),
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
