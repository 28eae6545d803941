//! Sender categories and the automation targets they route to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse sender category derived from a transaction description
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    Company,
    Partnership,
    Person,
    Other,
}

impl TransferType {
    pub const ALL: [TransferType; 4] = [
        TransferType::Company,
        TransferType::Partnership,
        TransferType::Person,
        TransferType::Other,
    ];

    /// Thai label as written in spreadsheets handed to the automation layer
    pub fn thai_label(&self) -> &'static str {
        match self {
            TransferType::Company => "บริษัท",
            TransferType::Partnership => "ห้างหุ้นส่วน",
            TransferType::Person => "บุคคล",
            TransferType::Other => "อื่นๆ",
        }
    }

    /// Accepted spellings when a column already holds a category label.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            TransferType::Company => &["company", "บริษัท", "นิติบุคคล"],
            TransferType::Partnership => &["partnership", "ห้างหุ้นส่วน", "หจก", "หจก."],
            TransferType::Person => &["person", "บุคคล", "บุคคลธรรมดา"],
            TransferType::Other => &["other", "อื่นๆ", "อื่น ๆ"],
        }
    }

    /// Exact (case-insensitive) label lookup; free text returns `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.aliases().iter().any(|a| *a == label))
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferType::Company => "company",
            TransferType::Partnership => "partnership",
            TransferType::Person => "person",
            TransferType::Other => "other",
        };
        f.write_str(s)
    }
}

/// Which form the automation layer fills for an accepted transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TargetCategory {
    Receipt,
    Deposit,
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetCategory::Receipt => f.write_str("receipt"),
            TargetCategory::Deposit => f.write_str("deposit"),
        }
    }
}
