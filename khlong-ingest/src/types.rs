use khlong_core::parse_amount;
use serde::{Deserialize, Serialize};

/// One transaction line recovered from statement text.
///
/// Field names are the column names of the exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub time: String,
    pub transaction_type: String,
    /// Parenthesized means money out, e.g. `(51.43)`. Empty when no amount was found.
    pub amount_display: String,
    pub balance: String,
    pub description: String,
}

impl TransactionRecord {
    /// Signed amount: parenthesized => negative. `None` when absent or unparsable.
    pub fn signed_amount(&self) -> Option<f64> {
        parse_amount(&self.amount_display)
    }
}

/// Header block of a statement, extracted independently of the transaction lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_number: String,
    pub account_name: String,
    pub branch: String,
    pub period_start: String,
    pub period_end: String,
    pub opening_balance: String,
}
