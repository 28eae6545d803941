//! Amount parsing shared by the statement parser and the task builder.

/// Currency markers tolerated around an amount.
const CURRENCY_MARKERS: &[&str] = &["฿", "THB", "บาท"];

/// Parse a money string into a signed `f64`.
///
/// Accepts thousands separators, a leading `+` or `-`, and accounting-style
/// parentheses for negatives: `"(1,250.00)"` => `-1250.0`. A sign inside
/// parentheses is rejected. Empty or non-numeric input yields `None`, and
/// zero is never negative.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut s = raw.trim().to_string();
    for marker in CURRENCY_MARKERS {
        s = s.replace(marker, "");
    }
    let mut s = s.trim().replace(',', "");

    let parenthesized = s.len() >= 2 && s.starts_with('(') && s.ends_with(')');
    let mut negative = parenthesized;
    if parenthesized {
        s = s[1..s.len() - 1].trim().to_string();
    } else if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest.trim_start().to_string();
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest.trim_start().to_string();
    }

    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value: f64 = s.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negative && value != 0.0 { -value } else { value })
}

/// True for cells a spreadsheet export leaves "empty": whitespace, `nan`, `null`, `none`.
pub fn is_blank(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty()
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("none")
}
