pub mod account_info;
pub mod statement_text;
