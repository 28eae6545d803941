//! Thai bank statement parser (text)
//!
//! Expected rows after PDF-to-text:
//!   DATE      TIME   TYPE           AMOUNT   BALANCE          DESCRIPTION
//!   01-10-25  11:17  ค่าธรรมเนียม     51.43    22,127,753.64    โอนเข้า/หักบัญชี
//!
//! The printed sign of an amount is not trusted. A withdrawal is inferred from
//! the running balance going down, and fee-like transaction types are always
//! withdrawals.

use khlong_core::parse_amount;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::types::TransactionRecord;

/// Transaction types that always take money out (matched case-insensitively).
pub const FEE_KEYWORDS: &[&str] = &["fee", "ค่าธรรมเนียม", "charge", "commission"];

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{2}[-/]\d{2}[-/]\d{2,4}\b").expect("date regex"))
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{2}:\d{2}\b").expect("time regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d[\d,]*\.\d{2}").expect("amount regex"))
}

fn is_fee(transaction_type: &str) -> bool {
    let lowered = transaction_type.to_lowercase();
    FEE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// An amount-like substring and the whitespace token it was found in.
struct NumericToken<'a> {
    token_idx: usize,
    text: &'a str,
}

/// Parse one line. Returns the record and the balance parsed from it, if any.
/// Lines without a date are not transactions and yield `None`.
fn parse_line(
    line: &str,
    previous_balance: Option<f64>,
) -> Option<(TransactionRecord, Option<f64>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let (date_idx, date) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| date_re().find(*t).map(|m| (i, m.as_str())))?;

    let after_date = &tokens[date_idx + 1..];

    let time = after_date
        .iter()
        .find_map(|t| time_re().find(*t))
        .map(|m| m.as_str())
        .unwrap_or("");

    let numerics: Vec<NumericToken> = after_date
        .iter()
        .enumerate()
        .flat_map(|(i, t)| {
            amount_re().find_iter(*t).map(move |m| NumericToken {
                token_idx: date_idx + 1 + i,
                text: m.as_str(),
            })
        })
        .collect();

    let amount_tok = numerics.first();
    let balance_tok = numerics.get(1);

    let type_end = amount_tok.map(|n| n.token_idx).unwrap_or(tokens.len());
    let transaction_type = tokens[date_idx + 1..type_end.max(date_idx + 1)]
        .iter()
        .map(|t| time_re().replace_all(*t, "").trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let description = match balance_tok {
        Some(b) => tokens[b.token_idx + 1..].join(" "),
        None => String::new(),
    };

    // An unparsable numeric token counts as absent for this line only.
    let amount = amount_tok.filter(|n| parse_amount(n.text).is_some()).map(|n| n.text);
    let balance_now = balance_tok.and_then(|n| parse_amount(n.text).map(|v| (n.text, v)));

    let decreased = matches!(
        (previous_balance, balance_now),
        (Some(prev), Some((_, now))) if now < prev
    );

    let amount_display = match amount {
        None => String::new(),
        Some(a) if decreased || is_fee(&transaction_type) => format!("({a})"),
        Some(a) => a.to_string(),
    };

    let record = TransactionRecord {
        date: date.to_string(),
        time: time.to_string(),
        transaction_type,
        amount_display,
        balance: balance_now.map(|(s, _)| s.to_string()).unwrap_or_default(),
        description,
    };

    Some((record, balance_now.map(|(_, v)| v)))
}

/// Parse extracted statement text into transaction records, in line order.
///
/// The running balance is threaded through a fold, so each call starts from
/// scratch. Never fails; lines that are not transactions are dropped.
pub fn parse_statement_text(text: &str) -> Vec<TransactionRecord> {
    let (_, records) = text.lines().enumerate().fold(
        (None::<f64>, Vec::new()),
        |(previous_balance, mut records), (line_no, line)| {
            let line = line.trim();
            if line.is_empty() {
                return (previous_balance, records);
            }

            match parse_line(line, previous_balance) {
                Some((record, balance)) => {
                    records.push(record);
                    (balance.or(previous_balance), records)
                }
                None => {
                    debug!(line = line_no + 1, "no date pattern; not a transaction line");
                    (previous_balance, records)
                }
            }
        },
    );

    info!(records = records.len(), "parsed statement text");
    records
}
