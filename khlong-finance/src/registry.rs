//! Business-registry lookup text: `key: value | key: value | ...`

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Registry keys that hold the juristic person's name.
const NAME_KEYS: &[&str] = &["ชื่อนิติบุคคล", "ชื่อ", "name", "company name"];

fn labeled_registration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"เลขทะเบียน(?:นิติบุคคล)?\s*[:：]?\s*([0-9][0-9\s\-]*)")
            .expect("registration regex")
    })
}

fn digit_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digit run regex"))
}

/// Split registry text on `|`, then each segment on its first `:`.
///
/// Segments without a colon or with an empty key are ignored. The first
/// value seen for a key is kept.
pub fn parse_registry_fields(raw: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for segment in raw.split('|') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields
            .entry(key.to_string())
            .or_insert_with(|| value.trim().to_string());
    }
    fields
}

/// 13-digit juristic registration number.
///
/// Prefers the digits after a `เลขทะเบียน` label (separators allowed), then
/// the first digit run of at least 13. Either way the first 13 digits are kept.
pub fn extract_registration_number(raw: &str) -> Option<String> {
    if let Some(caps) = labeled_registration_re().captures(raw) {
        let digits: String = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() >= 13 {
            return Some(digits[..13].to_string());
        }
    }

    digit_run_re()
        .find_iter(raw)
        .find(|m| m.as_str().len() >= 13)
        .map(|m| m.as_str()[..13].to_string())
}

/// Registered name, if the lookup text carries one.
pub fn registry_name(fields: &BTreeMap<String, String>) -> Option<&str> {
    fields
        .iter()
        .find(|(k, v)| !v.is_empty() && NAME_KEYS.iter().any(|n| k.eq_ignore_ascii_case(n)))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "เลขทะเบียน: 0105561234567 | ชื่อนิติบุคคล: บริษัท ทดสอบ จำกัด | ที่อยู่: 123 ถนนสีลม แขวงสีลม เขตบางรัก กรุงเทพมหานคร 10500 | สถานะ: ยังดำเนินกิจการอยู่";

    #[test]
    fn test_parse_fields() {
        let fields = parse_registry_fields(SAMPLE);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields["เลขทะเบียน"], "0105561234567");
        assert_eq!(fields["ชื่อนิติบุคคล"], "บริษัท ทดสอบ จำกัด");
        assert_eq!(fields["สถานะ"], "ยังดำเนินกิจการอยู่");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let raw = "updated: 2025-10-01 10:30 | junk | : nokey | a: 1 | a: 2";
        let fields = parse_registry_fields(raw);
        assert_eq!(fields["updated"], "2025-10-01 10:30");
        assert_eq!(fields["a"], "1");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_registry_fields("").is_empty());
    }

    #[test]
    fn test_registration_labeled() {
        assert_eq!(extract_registration_number(SAMPLE), Some("0105561234567".to_string()));
        assert_eq!(
            extract_registration_number("เลขทะเบียนนิติบุคคล 0-1055-61234-56-7"),
            Some("0105561234567".to_string())
        );
    }

    #[test]
    fn test_registration_unlabeled_run() {
        assert_eq!(
            extract_registration_number("tax id 0105561234567 tel 021234567"),
            Some("0105561234567".to_string())
        );
        assert_eq!(
            extract_registration_number("ref 01055612345678"),
            Some("0105561234567".to_string())
        );
        assert_eq!(extract_registration_number("tel 021234567 ext 12"), None);
        assert_eq!(extract_registration_number(""), None);
    }

    #[test]
    fn test_registry_name() {
        let fields = parse_registry_fields(SAMPLE);
        assert_eq!(registry_name(&fields), Some("บริษัท ทดสอบ จำกัด"));
        assert_eq!(registry_name(&parse_registry_fields("Name: ACME")), Some("ACME"));
        assert_eq!(registry_name(&BTreeMap::new()), None);
    }
}
