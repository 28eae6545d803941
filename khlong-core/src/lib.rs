//! khlong-core: shared normalizers and types for the statement-to-task pipeline

pub mod address;
pub mod amount;
pub mod dates;
pub mod labels;
pub mod transfer;

pub use address::{decompose_address, AddressComponents};
pub use amount::{is_blank, parse_amount};
pub use dates::{expand_two_digit_year, normalize_date, to_naive_date};
pub use labels::{scan_labeled_values, LabelState};
pub use transfer::{TargetCategory, TransferType};
