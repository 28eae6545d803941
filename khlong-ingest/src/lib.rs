//! khlong-ingest: statement text ingestion into ordered transaction records.

pub mod types;
pub mod parsers;
pub mod summary;
pub mod export;

pub use types::{AccountInfo, TransactionRecord};
pub use parsers::account_info::extract_account_info;
pub use parsers::statement_text::{parse_statement_text, FEE_KEYWORDS};
pub use summary::{summarize, StatementSummary};
pub use export::{write_records_csv, write_records_json};
