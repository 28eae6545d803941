//! Thai postal-address decomposition.
//!
//! Components are pulled out one at a time and each match is deleted from the
//! working text before the next step, so later patterns never see consumed
//! spans. The step order matters: moo is taken before village, otherwise a
//! number inside a village name can be read as a moo.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const BANGKOK: &str = "กรุงเทพมหานคร";

/// Keywords that end a village name.
const VILLAGE_STOP_WORDS: &str = concat!(
    "บ้านเลขที่|เลขที่|ซอย|ซ\\.|ถนน|ถ\\.|หมู่|",
    "ตำบล|ต\\.|แขวง|อำเภอ|อ\\.|เขต|จังหวัด|จ\\.|กรุงเทพมหานคร",
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub house_no: String,
    pub village: String,
    pub moo: String,
    pub subdistrict: String,
    pub district: String,
    pub province: String,
    pub postal_code: String,
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digits regex"))
}

fn province_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[\s,])(?:จังหวัด|จ\.)\s*([^\s,]+)").expect("province regex")
    })
}

fn district_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[\s,])(?:อำเภอ|อ\.|เขต)\s*([^\s,]+)").expect("district regex")
    })
}

fn subdistrict_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[\s,])(?:ตำบล|ต\.|แขวง)\s*([^\s,]+)").expect("subdistrict regex")
    })
}

fn moo_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[\s,])(?:หมู่ที่|หมู่)\s*([0-9]+)").expect("moo regex"))
}

fn village_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[\s,])(?:หมู่บ้าน|บ้าน)").expect("village prefix regex"))
}

fn village_stop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"[\s,](?:{})|,", VILLAGE_STOP_WORDS)).expect("village stop regex")
    })
}

fn labeled_house_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[\s,])(?:บ้านเลขที่|เลขที่)\s*([^\s,]+)").expect("house number regex")
    })
}

fn leading_house_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9][0-9/\-]*)").expect("leading number regex"))
}

/// Collapse whitespace and drop separators left dangling at either end.
fn tidy(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Working text that shrinks as components are taken out of it.
struct Remaining(String);

impl Remaining {
    fn new(raw: &str) -> Self {
        Remaining(tidy(raw))
    }

    fn cut(&mut self, start: usize, end: usize) {
        let joined = format!("{} {}", &self.0[..start], &self.0[end..]);
        self.0 = tidy(&joined);
    }

    /// Take capture group 1 of the first match, deleting the whole match.
    fn take(&mut self, re: &Regex) -> Option<String> {
        let (start, end, value) = {
            let caps = re.captures(&self.0)?;
            let whole = caps.get(0)?;
            (whole.start(), whole.end(), caps.get(1)?.as_str().to_string())
        };
        self.cut(start, end);
        Some(value)
    }

    fn take_postal_code(&mut self) -> Option<String> {
        let m = digits_re()
            .find_iter(&self.0)
            .filter(|m| m.as_str().len() == 5)
            .last()?;
        let value = m.as_str().to_string();
        let (start, end) = (m.start(), m.end());
        self.cut(start, end);
        Some(value)
    }

    fn take_literal(&mut self, literal: &str) -> Option<String> {
        let start = self.0.find(literal)?;
        self.cut(start, start + literal.len());
        Some(literal.to_string())
    }

    /// Village runs from its prefix to the next known label, a comma, or the end.
    fn take_village(&mut self) -> Option<String> {
        let mut found = None;
        for prefix in village_prefix_re().find_iter(&self.0) {
            let tail = self.0[prefix.end()..].trim_start();
            if tail.starts_with("เลขที่") {
                continue;
            }
            let tail_start = self.0.len() - tail.len();
            let value_end = village_stop_re()
                .find(tail)
                .map(|stop| tail_start + stop.start())
                .unwrap_or(self.0.len());
            let value = self.0[tail_start..value_end].trim();
            if !value.is_empty() {
                found = Some((prefix.start(), value_end, value.to_string()));
                break;
            }
        }

        let (start, end, value) = found?;
        self.cut(start, end);
        Some(value)
    }
}

/// Split a free-text Thai address into its components.
///
/// Never fails: anything that does not match stays empty.
pub fn decompose_address(raw: &str) -> AddressComponents {
    let mut out = AddressComponents::default();
    let mut rest = Remaining::new(raw);

    if let Some(v) = rest.take_postal_code() {
        out.postal_code = v;
    }

    if let Some(v) = rest.take(province_re()).or_else(|| rest.take_literal(BANGKOK)) {
        out.province = v;
    }

    if let Some(v) = rest.take(district_re()) {
        out.district = v;
    }

    if let Some(v) = rest.take(subdistrict_re()) {
        out.subdistrict = v;
    }

    if let Some(v) = rest.take(moo_re()) {
        out.moo = v;
    }

    if let Some(v) = rest.take_village() {
        out.village = v;
    }

    if let Some(v) = rest.take(labeled_house_re()).or_else(|| rest.take(leading_house_re())) {
        out.house_no = v;
    }

    if out.province.is_empty() && raw.contains(BANGKOK) {
        out.province = BANGKOK.to_string();
    }

    out
}
