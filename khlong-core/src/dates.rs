//! Date utilities: canonicalize statement/registry dates to `DD/MM/YYYY`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Field order of the captured groups for one accepted layout.
#[derive(Debug, Clone, Copy)]
enum Layout {
    DayMonthYear,
    YearMonthDay,
}

/// Accepted layouts in priority order. First match wins.
fn layouts() -> &'static [(Regex, Layout)] {
    static LAYOUTS: OnceLock<Vec<(Regex, Layout)>> = OnceLock::new();
    LAYOUTS.get_or_init(|| {
        [
            (r"^(\d{1,2})-(\d{1,2})-(\d{2})$", Layout::DayMonthYear),
            (r"^(\d{1,2})/(\d{1,2})/(\d{4})$", Layout::DayMonthYear),
            (r"^(\d{1,2})-(\d{1,2})-(\d{4})$", Layout::DayMonthYear),
            (r"^(\d{4})-(\d{1,2})-(\d{1,2})$", Layout::YearMonthDay),
        ]
        .into_iter()
        .map(|(pattern, layout)| (Regex::new(pattern).expect("date layout regex"), layout))
        .collect()
    })
}

/// Expand a two-digit year with a fixed window: `00-30` => 2000s, `31-99` => 1900s.
pub fn expand_two_digit_year(yy: u32) -> i32 {
    if yy <= 30 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

/// Normalize a date string to `DD/MM/YYYY`.
///
/// Returns the input unchanged when no layout matches. Calendar validity is
/// not checked; `31-02-25` becomes `31/02/2025`.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return raw.to_string();
    }

    for (re, layout) in layouts() {
        let Some(caps) = re.captures(s) else {
            continue;
        };

        let (day, month, year) = match layout {
            Layout::DayMonthYear => (&caps[1], &caps[2], &caps[3]),
            Layout::YearMonthDay => (&caps[3], &caps[2], &caps[1]),
        };

        // Captures are ASCII digits of bounded length, so these parses hold.
        let (Ok(d), Ok(m), Ok(y)) = (day.parse::<u32>(), month.parse::<u32>(), year.parse::<u32>())
        else {
            continue;
        };

        let year = if year.len() == 2 {
            expand_two_digit_year(y)
        } else {
            y as i32
        };

        return format!("{:02}/{:02}/{:04}", d, m, year);
    }

    raw.to_string()
}

/// Normalize and then interpret as a calendar date, if it is one.
pub fn to_naive_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_date(raw), "%d/%m/%Y").ok()
}
