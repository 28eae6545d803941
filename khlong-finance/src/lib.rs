//! khlong-finance: transfer classification, registry parsing, and the task builder

pub mod error;
pub mod registry;
pub mod table;
pub mod task_builder;
pub mod transfer_rules;

pub use error::TableError;
pub use registry::{extract_registration_number, parse_registry_fields};
pub use table::{ColumnBindings, Row, RowTable};
pub use task_builder::{SkipReason, SkipRecord, TaskBatch, TaskBuilder, TransactionTask};
pub use transfer_rules::{classify, extract_entity_name, resolve_transfer_type, route};
