//! Roll-up of parsed records for quick sanity checks against the printed statement.

use chrono::NaiveDate;
use khlong_core::to_naive_date;
use serde::{Deserialize, Serialize};

use crate::types::TransactionRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub rows: usize,
    pub credits: usize,
    pub debits: usize,
    /// Dated rows with no parsable amount
    pub missing_amount: usize,
    pub total_credits: f64,
    /// Sum of withdrawals as a positive number
    pub total_debits: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl StatementSummary {
    pub fn net(&self) -> f64 {
        self.total_credits - self.total_debits
    }
}

pub fn summarize(records: &[TransactionRecord]) -> StatementSummary {
    let mut summary = StatementSummary {
        rows: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.signed_amount() {
            Some(v) if v < 0.0 => {
                summary.debits += 1;
                summary.total_debits += -v;
            }
            Some(v) => {
                summary.credits += 1;
                summary.total_credits += v;
            }
            None => summary.missing_amount += 1,
        }

        if let Some(d) = to_naive_date(&record.date) {
            summary.first_date = Some(summary.first_date.map_or(d, |f| f.min(d)));
            summary.last_date = Some(summary.last_date.map_or(d, |l| l.max(d)));
        }
    }

    summary
}
