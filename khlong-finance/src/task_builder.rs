//! Task builder: turns table rows into automation tasks, or into skip records
//! that say why a row was left out.
//!
//! Every input row lands in exactly one of the two outputs, in input order.

use khlong_core::{is_blank, normalize_date, parse_amount, TargetCategory, TransferType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

use crate::registry::{extract_registration_number, parse_registry_fields, registry_name};
use crate::table::{ColumnBindings, Row};
use crate::transfer_rules::{extract_entity_name, resolve_transfer_type, route};

/// Why a row did not become a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AmountInvalid,
    AmountNegative,
    MissingTransferType,
    UnknownTransferType,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AmountInvalid => "amount_invalid",
            SkipReason::AmountNegative => "amount_negative",
            SkipReason::MissingTransferType => "missing_transfer_type",
            SkipReason::UnknownTransferType => "unknown_transfer_type",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub row_number: usize,
    pub reason: SkipReason,
    pub details: String,
}

impl SkipRecord {
    fn new(row_number: usize, reason: SkipReason, details: impl Into<String>) -> Self {
        Self {
            row_number,
            reason,
            details: details.into(),
        }
    }
}

/// A row accepted for automation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTask {
    pub row_number: usize,
    /// Never negative; negative rows are skipped instead.
    pub amount: f64,
    pub transfer_type: TransferType,
    /// Registry lookup returned something for this row
    pub dbd_has_data: bool,
    /// 13-digit juristic registration number
    pub registration: Option<String>,
    pub target_category: TargetCategory,
    /// `DD/MM/YYYY` when a date column is bound and filled
    pub document_date: Option<String>,
    pub registry_raw: String,
    pub registry_fields: BTreeMap<String, String>,
    pub company_name: String,
}

/// Output of one build: accepted tasks and reasoned skips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskBatch {
    pub tasks: Vec<TransactionTask>,
    pub skips: Vec<SkipRecord>,
}

impl TaskBatch {
    /// Rows accounted for across both lists
    pub fn row_count(&self) -> usize {
        self.tasks.len() + self.skips.len()
    }

    pub fn skips_by_reason(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for skip in &self.skips {
            *counts.entry(skip.reason.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Builds tasks from rows using a fixed set of column bindings
#[derive(Debug, Clone, Default)]
pub struct TaskBuilder {
    bindings: ColumnBindings,
}

impl TaskBuilder {
    pub fn new(bindings: ColumnBindings) -> Self {
        Self { bindings }
    }

    /// Partition rows into tasks and skips, preserving row order in both.
    pub fn build(&self, rows: &[Row]) -> TaskBatch {
        if let Some(col) = &self.bindings.date {
            if !rows.is_empty() && rows.iter().all(|r| r.get(col).is_none()) {
                warn!(column = %col, "date column is bound but absent; document dates left empty");
            }
        }

        let mut batch = TaskBatch::default();
        for row in rows {
            match self.build_row(row) {
                Ok(task) => batch.tasks.push(task),
                Err(skip) => {
                    debug!(
                        row = skip.row_number,
                        reason = %skip.reason,
                        details = %skip.details,
                        "row skipped"
                    );
                    batch.skips.push(skip);
                }
            }
        }

        info!(
            rows = rows.len(),
            tasks = batch.tasks.len(),
            skipped = batch.skips.len(),
            "built transaction tasks"
        );
        batch
    }

    fn cell<'r>(&self, row: &'r Row, column: &str) -> &'r str {
        row.get(column).unwrap_or("")
    }

    /// Checks run in a fixed order; the first failure is the row's skip reason.
    fn build_row(&self, row: &Row) -> Result<TransactionTask, SkipRecord> {
        let n = row.row_number;

        let raw_amount = self.cell(row, &self.bindings.amount);
        let amount = parse_amount(raw_amount).ok_or_else(|| {
            SkipRecord::new(
                n,
                SkipReason::AmountInvalid,
                format!("could not parse amount '{}'", raw_amount.trim()),
            )
        })?;

        if amount < 0.0 {
            return Err(SkipRecord::new(
                n,
                SkipReason::AmountNegative,
                format!("amount {amount:.2} is negative"),
            ));
        }

        let transfer_text = self.cell(row, &self.bindings.transfer_type).trim();
        if is_blank(transfer_text) {
            return Err(SkipRecord::new(
                n,
                SkipReason::MissingTransferType,
                format!("column '{}' is empty", self.bindings.transfer_type),
            ));
        }

        let registry_raw = self.cell(row, &self.bindings.registry_info).trim();
        let dbd_has_data = !is_blank(registry_raw);

        let transfer_type = resolve_transfer_type(transfer_text);
        let target_category = route(transfer_type, dbd_has_data).ok_or_else(|| {
            SkipRecord::new(
                n,
                SkipReason::UnknownTransferType,
                format!("transfer type '{transfer_text}' resolved to {transfer_type}"),
            )
        })?;

        let registry_raw = if dbd_has_data { registry_raw } else { "" };
        let registration = extract_registration_number(registry_raw);

        let document_date = self
            .bindings
            .date
            .as_deref()
            .and_then(|col| row.get(col))
            .filter(|v| !is_blank(v))
            .map(|v| normalize_date(v.trim()));

        let registry_fields = parse_registry_fields(registry_raw);
        let company_name = self.company_name(row, transfer_text, &registry_fields);

        Ok(TransactionTask {
            row_number: n,
            amount,
            transfer_type,
            dbd_has_data,
            registration,
            target_category,
            document_date,
            registry_raw: registry_raw.to_string(),
            registry_fields,
            company_name,
        })
    }

    /// Bound company-name column, else a name pulled from the transfer text,
    /// else the registered name.
    fn company_name(
        &self,
        row: &Row,
        transfer_text: &str,
        fields: &BTreeMap<String, String>,
    ) -> String {
        if let Some(name) = self
            .bindings
            .company_name
            .as_deref()
            .and_then(|col| row.get(col))
            .map(str::trim)
            .filter(|v| !is_blank(v))
        {
            return name.to_string();
        }

        let extracted = extract_entity_name(transfer_text);
        if !extracted.is_empty() {
            return extracted;
        }

        registry_name(fields).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row(n: usize, amount: &str, transfer_type: &str, dbd: &str) -> Row {
        Row::new(n)
            .with("amount", amount)
            .with("transfer_type", transfer_type)
            .with("dbd_info", dbd)
    }

    fn builder() -> TaskBuilder {
        TaskBuilder::new(ColumnBindings::default())
    }

    #[test]
    fn test_negative_amount_skipped() {
        let batch = builder().build(&[row(1, "-50", "บุคคล", "")]);
        assert!(batch.tasks.is_empty());
        assert_eq!(batch.skips.len(), 1);
        assert_eq!(batch.skips[0].reason, SkipReason::AmountNegative);
        assert_eq!(batch.skips[0].row_number, 1);
    }

    #[test]
    fn test_parenthesized_amount_is_negative() {
        let batch = builder().build(&[row(1, "(1,000.00)", "บุคคล", "")]);
        assert_eq!(batch.skips[0].reason, SkipReason::AmountNegative);
    }

    #[test]
    fn test_signed_parenthesized_amount_never_accepted() {
        let batch = builder().build(&[row(1, "(-50)", "บุคคล", ""), row(2, "(+50)", "บุคคล", "")]);
        assert!(batch.tasks.is_empty());
        assert_eq!(batch.skips[0].reason, SkipReason::AmountInvalid);
        assert_eq!(batch.skips[1].reason, SkipReason::AmountInvalid);
    }

    #[test]
    fn test_negative_zero_accepted_as_zero() {
        let batch = builder().build(&[row(1, "-0", "บุคคล", "")]);
        let task = &batch.tasks[0];
        assert!(task.amount.is_sign_positive());
        let json = serde_json::to_value(task).unwrap();
        assert_eq!(json["amount"].to_string(), "0.0");
    }

    #[test]
    fn test_company_without_registry_goes_to_deposit() {
        let batch = builder().build(&[row(1, "1000", "company", "")]);
        assert_eq!(batch.tasks.len(), 1);
        let task = &batch.tasks[0];
        assert_eq!(task.target_category, TargetCategory::Deposit);
        assert!(!task.dbd_has_data);
        assert_eq!(task.registration, None);
        assert!(task.registry_fields.is_empty());
    }

    #[test]
    fn test_company_with_registry_goes_to_receipt() {
        let dbd = "เลขทะเบียน: 0105561234567 | ชื่อนิติบุคคล: บริษัท ทดสอบ จำกัด";
        let batch = builder().build(&[row(4, "+12,500.00", "โอนจาก บริษัท ทดสอบ จำกัด", dbd)]);
        let task = &batch.tasks[0];
        assert_eq!(task.row_number, 4);
        assert_eq!(task.amount, 12_500.0);
        assert_eq!(task.transfer_type, TransferType::Company);
        assert_eq!(task.target_category, TargetCategory::Receipt);
        assert_eq!(task.registration.as_deref(), Some("0105561234567"));
        assert_eq!(task.registry_fields["ชื่อนิติบุคคล"], "บริษัท ทดสอบ จำกัด");
        assert_eq!(task.company_name, "ทดสอบ");
        assert_eq!(task.registry_raw, dbd);
    }

    #[test]
    fn test_skip_reasons_in_check_order() {
        let batch = builder().build(&[
            row(1, "abc", "", ""),
            row(2, "-1", "", ""),
            row(3, "10", "  ", ""),
            row(4, "10", "ATM WITHDRAWAL", ""),
            row(5, "nan", "บุคคล", ""),
        ]);
        let reasons: Vec<_> = batch.skips.iter().map(|s| (s.row_number, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (1, SkipReason::AmountInvalid),
                (2, SkipReason::AmountNegative),
                (3, SkipReason::MissingTransferType),
                (4, SkipReason::UnknownTransferType),
                (5, SkipReason::AmountInvalid),
            ]
        );
        assert!(batch.skips[0].details.contains("'abc'"));
    }

    #[test]
    fn test_missing_amount_cell_is_invalid() {
        let r = Row::new(1).with("transfer_type", "บุคคล");
        let batch = builder().build(&[r]);
        assert_eq!(batch.skips[0].reason, SkipReason::AmountInvalid);
    }

    #[test]
    fn test_partition_is_total_and_ordered() {
        let rows: Vec<Row> = (1..=20)
            .map(|i| match i % 4 {
                0 => row(i, "-5", "บุคคล", ""),
                1 => row(i, "100", "บุคคล", ""),
                2 => row(i, "x", "บุคคล", ""),
                _ => row(i, "100", "หจก.สมบูรณ์", "เลขทะเบียน: 0103555012345"),
            })
            .collect();
        let batch = builder().build(&rows);
        assert_eq!(batch.row_count(), rows.len());

        let mut seen = HashSet::new();
        let task_rows = batch.tasks.iter().map(|t| t.row_number);
        let skip_rows = batch.skips.iter().map(|s| s.row_number);
        for n in task_rows.chain(skip_rows) {
            assert!(seen.insert(n), "row {n} appears twice");
        }
        assert_eq!(seen.len(), 20);

        assert!(batch.tasks.windows(2).all(|w| w[0].row_number < w[1].row_number));
        assert!(batch.skips.windows(2).all(|w| w[0].row_number < w[1].row_number));
        assert!(batch.tasks.iter().all(|t| t.amount >= 0.0));
        assert_eq!(batch.skips_by_reason()["amount_negative"], 5);
    }

    #[test]
    fn test_date_and_company_columns() {
        let bindings = ColumnBindings {
            date: Some("date".to_string()),
            company_name: Some("name".to_string()),
            ..Default::default()
        };
        let rows = vec![
            row(1, "10", "บุคคล", "").with("date", "01-10-25").with("name", "สมชาย ใจดี"),
            row(2, "10", "นายสมศักดิ์ มั่นคง", "").with("date", "").with("name", ""),
        ];
        let batch = TaskBuilder::new(bindings).build(&rows);
        assert_eq!(batch.tasks[0].document_date.as_deref(), Some("01/10/2025"));
        assert_eq!(batch.tasks[0].company_name, "สมชาย ใจดี");
        assert_eq!(batch.tasks[1].document_date, None);
        assert_eq!(batch.tasks[1].company_name, "สมศักดิ์ มั่นคง");
    }

    #[test]
    fn test_company_name_from_registry_when_type_is_label() {
        let dbd = "ชื่อนิติบุคคล: บริษัท เอบีซี จำกัด";
        let batch = builder().build(&[row(1, "10", "บริษัท", dbd)]);
        assert_eq!(batch.tasks[0].company_name, "บริษัท เอบีซี จำกัด");
    }

    #[test]
    fn test_serialized_reason_names() {
        let skip = SkipRecord::new(3, SkipReason::MissingTransferType, "x");
        let json = serde_json::to_value(&skip).unwrap();
        assert_eq!(json["reason"], "missing_transfer_type");
    }
}
