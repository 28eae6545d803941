//! Statement header fields: account number, name, branch, period and opening balance.

use khlong_core::{normalize_date, scan_labeled_values};
use regex::Regex;
use std::sync::OnceLock;

use crate::types::AccountInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderField {
    AccountNumber,
    AccountName,
    Branch,
    Period,
    OpeningBalance,
}

const HEADER_LABELS: &[(HeaderField, &[&str])] = &[
    (HeaderField::AccountNumber, &["เลขที่บัญชี", "Account Number", "Account No.", "Account No"]),
    (HeaderField::AccountName, &["ชื่อบัญชี", "Account Name"]),
    (HeaderField::Branch, &["สาขา", "Branch"]),
    (
        HeaderField::Period,
        &["รอบระหว่างวันที่", "ระหว่างวันที่", "Statement Period", "Period"],
    ),
    (
        HeaderField::OpeningBalance,
        &["ยอดยกมา", "Opening Balance", "Balance Brought Forward"],
    ),
];

fn period_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,4}[-/]\d{1,2}[-/]\d{2,4}").expect("period date regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d[\d,]*\.\d{2}").expect("amount regex"))
}

/// Extract header fields from the same text the transaction parser reads.
///
/// The first value seen for a field wins; fields never found stay empty.
pub fn extract_account_info(text: &str) -> AccountInfo {
    let mut info = AccountInfo::default();

    for (field, value) in scan_labeled_values(text, HEADER_LABELS) {
        match field {
            HeaderField::AccountNumber if info.account_number.is_empty() => {
                info.account_number = value;
            }
            HeaderField::AccountName if info.account_name.is_empty() => {
                info.account_name = value;
            }
            HeaderField::Branch if info.branch.is_empty() => {
                info.branch = value;
            }
            HeaderField::Period if info.period_start.is_empty() => {
                let mut dates = period_date_re()
                    .find_iter(&value)
                    .map(|m| normalize_date(m.as_str()));
                if let Some(start) = dates.next() {
                    info.period_start = start;
                    info.period_end = dates.next().unwrap_or_default();
                }
            }
            HeaderField::OpeningBalance if info.opening_balance.is_empty() => {
                if let Some(m) = amount_re().find(&value) {
                    info.opening_balance = m.as_str().to_string();
                }
            }
            _ => {}
        }
    }

    info
}
