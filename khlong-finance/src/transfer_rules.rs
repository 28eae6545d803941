//! Deterministic sender classification and entity-name extraction for
//! free-text transfer descriptions.
//!
//! Both cascades are ordered tables evaluated top to bottom; the first rule
//! that fires decides.

use khlong_core::{TargetCategory, TransferType};
use regex::Regex;
use std::sync::OnceLock;

const COMPANY_KEYWORDS: &[&str] = &[
    "บริษัท",
    "บจก",
    "บมจ",
    "co.,ltd",
    "co., ltd",
    "co.ltd",
    "co ltd",
    "company limited",
    "public company",
    "corporation",
    "corp.",
    " inc.",
];

const PARTNERSHIP_KEYWORDS: &[&str] = &[
    "ห้างหุ้นส่วน",
    "หจก",
    "หสน",
    "partnership",
    "ltd., part",
    "ltd. part",
];

const THAI_TITLES: &[&str] = &["นางสาว", "น.ส.", "นาง", "นาย", "ด.ช.", "ด.ญ.", "คุณ"];

const ENGLISH_TITLES: &[&str] = &["mr", "mrs", "ms", "miss"];

/// Longest Thai or English entity name accepted, in characters.
const MAX_ENTITY_CHARS: usize = 100;

fn has_company_keyword(description: &str) -> bool {
    let lowered = description.to_lowercase();
    COMPANY_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

fn has_partnership_keyword(description: &str) -> bool {
    let lowered = description.to_lowercase();
    PARTNERSHIP_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Titles only count at the start of a token; `ขอบคุณ` is not `คุณ`.
fn has_person_title(description: &str) -> bool {
    description.split_whitespace().any(|token| {
        if THAI_TITLES.iter().any(|t| token.starts_with(t)) {
            return true;
        }
        let token = token.trim_end_matches('.').to_lowercase();
        ENGLISH_TITLES.contains(&token.as_str())
    })
}

fn is_thai_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| ('\u{0E00}'..='\u{0E7F}').contains(&c))
}

/// Short descriptions made of a Thai first and last name, e.g. `สมชาย ใจดี`.
fn looks_like_thai_name(description: &str) -> bool {
    let tokens: Vec<&str> = description.split(' ').filter(|t| !t.is_empty()).collect();
    tokens.len() <= 3 && tokens.windows(2).any(|w| is_thai_token(w[0]) && is_thai_token(w[1]))
}

type ClassifyRule = (fn(&str) -> bool, TransferType);

const CLASSIFY_RULES: &[ClassifyRule] = &[
    (has_company_keyword, TransferType::Company),
    (has_partnership_keyword, TransferType::Partnership),
    (has_person_title, TransferType::Person),
    (looks_like_thai_name, TransferType::Person),
];

/// Classify a description into one of the four sender categories.
/// Anything no rule recognises is `Other`.
pub fn classify(description: &str) -> TransferType {
    CLASSIFY_RULES
        .iter()
        .find(|(matches, _)| matches(description))
        .map(|(_, transfer_type)| *transfer_type)
        .unwrap_or(TransferType::Other)
}

/// Accept an explicit category label as-is, otherwise classify the free text.
pub fn resolve_transfer_type(text: &str) -> TransferType {
    TransferType::from_label(text).unwrap_or_else(|| classify(text))
}

/// Which automation target a sender category goes to.
///
/// Juristic senders need a receipt only when registry data exists to fill it.
pub fn route(transfer_type: TransferType, has_registration_data: bool) -> Option<TargetCategory> {
    match transfer_type {
        TransferType::Company | TransferType::Partnership if has_registration_data => {
            Some(TargetCategory::Receipt)
        }
        TransferType::Company | TransferType::Partnership => Some(TargetCategory::Deposit),
        TransferType::Person => Some(TargetCategory::Deposit),
        TransferType::Other => None,
    }
}

/// Capture patterns in priority order. Group 1 is the name; the trailing
/// group is that pattern's stop-set.
fn entity_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Thai company
            r"(?:บริษัท|บจก\.?|บมจ\.?)\s*(.+?)\s*(?:จำกัด|\(มหาชน\)|มหาชน|สาขา|\(|$)",
            // Thai partnership
            r"(?:ห้างหุ้นส่วนจำกัด|ห้างหุ้นส่วนสามัญ|ห้างหุ้นส่วน|หจก\.?|หสน\.?)\s*(.+?)\s*(?:สาขา|\(|$)",
            // Thai personal title
            r"(?:^|\s)(?:นางสาว|น\.ส\.|นาง|นาย|ด\.ช\.|ด\.ญ\.|คุณ)\s*([\x{0E00}-\x{0E7F}]+(?:\s+[\x{0E00}-\x{0E7F}]+)?)",
            // English company suffix, optionally after "from"/"to"
            r"(?i)^(?:.*?\b(?:from|to)\s+)?(.+?)\s*,?\s*(?:co\.?\s*,?\s*ltd\.?|company\s+limited|public\s+company|corporation|corp\.|inc\.)",
            // English partnership suffix
            r"(?i)^(?:.*?\b(?:from|to)\s+)?(.+?)\s*,?\s*(?:ltd\.?\s*,?\s*part\.?|limited\s+partnership)",
            // English personal title
            r"(?i)\b(?:mr|mrs|ms|miss)\.?\s+([a-z]+(?:\s+[a-z]+)?)",
        ]
        .into_iter()
        .map(|p| Regex::new(p).expect("entity pattern regex"))
        .collect()
    })
}

fn legal_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\(มหาชน\)|มหาชน|จำกัด|\bco\.?\s*,?\s*ltd\.?|\bcompany\s+limited\b|\blimited\b|\bltd\.?|\bcorporation\b|\bcorp\.|\binc\.",
        )
        .expect("legal suffix regex")
    })
}

fn leading_noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\W_]+").expect("leading noise regex"))
}

fn clean_entity_name(raw: &str) -> String {
    let s = legal_suffix_re().replace_all(raw, " ");
    let s = s.replace("ฯลฯ", " ").replace('+', " ");
    let s = s.trim();
    let s = leading_noise_re().replace(s, "");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Best-effort entity name from a transfer description.
///
/// Returns an empty string when no pattern matches or the cleaned name is
/// empty or implausibly long.
pub fn extract_entity_name(description: &str) -> String {
    let Some(captured) = entity_patterns()
        .iter()
        .find_map(|re| re.captures(description).and_then(|c| c.get(1)))
    else {
        return String::new();
    };

    let name = clean_entity_name(captured.as_str());
    let len = name.chars().count();
    if len == 0 || len > MAX_ENTITY_CHARS {
        return String::new();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_company() {
        assert_eq!(classify("โอนจาก บริษัท ทดสอบ จำกัด"), TransferType::Company);
        assert_eq!(classify("TRANSFER FROM SIAM TRADING CO.,LTD"), TransferType::Company);
        assert_eq!(classify("บมจ.ธนาคารตัวอย่าง"), TransferType::Company);
    }

    #[test]
    fn test_classify_partnership() {
        assert_eq!(classify("รับโอนจาก ห้างหุ้นส่วนจำกัด รุ่งเรือง"), TransferType::Partnership);
        assert_eq!(classify("หจก.สมบูรณ์การช่าง"), TransferType::Partnership);
    }

    #[test]
    fn test_company_checked_before_partnership() {
        assert_eq!(classify("บริษัท ห้างหุ้นส่วน จำกัด"), TransferType::Company);
    }

    #[test]
    fn test_classify_person() {
        assert_eq!(classify("โอนจาก นายสมชาย ใจดี"), TransferType::Person);
        assert_eq!(classify("PAYMENT FROM MR. JOHN SMITH"), TransferType::Person);
        assert_eq!(classify("สมหญิง รักดี"), TransferType::Person);
    }

    #[test]
    fn test_title_inside_a_word_is_not_a_person() {
        let thanks = "ขอบคุณ สำหรับ การ สั่งซื้อ";
        assert_eq!(classify(thanks), TransferType::Other);
        assert_eq!(extract_entity_name(thanks), "");
        assert_eq!(classify("ชำระค่าสินค้า โดย คุณสมชาย"), TransferType::Person);
        assert_eq!(extract_entity_name("ชำระค่าสินค้า โดย คุณสมชาย"), "สมชาย");
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify("ATM WITHDRAWAL 1234"), TransferType::Other);
        assert_eq!(classify(""), TransferType::Other);
        // Too many tokens for the bare-name heuristic
        assert_eq!(classify("ถอนเงิน สด ที่ สาขา"), TransferType::Other);
        // Only one Thai token
        assert_eq!(classify("ดอกเบี้ย 12"), TransferType::Other);
    }

    #[test]
    fn test_classify_is_total() {
        for d in ["", "x", "บริษัท", "MR", "ก ข", "12 34", "ฯลฯ ++"] {
            assert!(TransferType::ALL.contains(&classify(d)));
        }
    }

    #[test]
    fn test_resolve_label_or_text() {
        assert_eq!(resolve_transfer_type("บุคคล"), TransferType::Person);
        assert_eq!(resolve_transfer_type("company"), TransferType::Company);
        assert_eq!(resolve_transfer_type("โอนจาก หจก.สมบูรณ์"), TransferType::Partnership);
        assert_eq!(resolve_transfer_type("ค่าธรรมเนียม ATM"), TransferType::Other);
    }

    #[test]
    fn test_route_table() {
        assert_eq!(route(TransferType::Company, true), Some(TargetCategory::Receipt));
        assert_eq!(route(TransferType::Company, false), Some(TargetCategory::Deposit));
        assert_eq!(route(TransferType::Partnership, true), Some(TargetCategory::Receipt));
        assert_eq!(route(TransferType::Partnership, false), Some(TargetCategory::Deposit));
        assert_eq!(route(TransferType::Person, true), Some(TargetCategory::Deposit));
        assert_eq!(route(TransferType::Person, false), Some(TargetCategory::Deposit));
        assert_eq!(route(TransferType::Other, true), None);
        assert_eq!(route(TransferType::Other, false), None);
    }

    #[test]
    fn test_extract_thai_company() {
        assert_eq!(extract_entity_name("โอนจาก บริษัท ทดสอบ จำกัด"), "ทดสอบ");
        assert_eq!(extract_entity_name("บจก.สยามพาณิชย์"), "สยามพาณิชย์");
        assert_eq!(extract_entity_name("บริษัท ไทยรุ่งเรือง จำกัด (มหาชน)"), "ไทยรุ่งเรือง");
    }

    #[test]
    fn test_extract_partnership_and_person() {
        assert_eq!(extract_entity_name("รับโอน หจก. สมบูรณ์การช่าง"), "สมบูรณ์การช่าง");
        assert_eq!(extract_entity_name("โอนไป นายสมชาย ใจดี"), "สมชาย ใจดี");
        assert_eq!(extract_entity_name("นางสาวสมหญิง รักดี"), "สมหญิง รักดี");
    }

    #[test]
    fn test_extract_english() {
        assert_eq!(extract_entity_name("TRANSFER FROM SIAM TRADING CO.,LTD"), "SIAM TRADING");
        assert_eq!(extract_entity_name("PAYMENT FROM MR. JOHN SMITH"), "JOHN SMITH");
    }

    #[test]
    fn test_extract_cleanup() {
        assert_eq!(extract_entity_name("บริษัท ++ทดสอบ+ ฯลฯ"), "ทดสอบ");
        assert_eq!(extract_entity_name("บริษัท 123-ทดสอบ"), "ทดสอบ");
    }

    #[test]
    fn test_extract_rejects() {
        assert_eq!(extract_entity_name("ATM WITHDRAWAL"), "");
        assert_eq!(extract_entity_name("บริษัท ++ จำกัด"), "");
        let long = format!("บริษัท {} จำกัด", "ก".repeat(101));
        assert_eq!(extract_entity_name(&long), "");
    }
}
