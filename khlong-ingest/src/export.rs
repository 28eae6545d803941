//! Write parsed records as the flat table downstream tools consume.

use anyhow::{Context, Result};
use std::io::Write;

use crate::types::TransactionRecord;

/// CSV with header `date,time,transaction_type,amount_display,balance,description`.
pub fn write_records_csv<W: Write>(records: &[TransactionRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record).context("writing transaction row")?;
    }
    wtr.flush().context("flushing transaction csv")?;
    Ok(())
}

/// Pretty JSON array of records.
pub fn write_records_json<W: Write>(records: &[TransactionRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).context("serializing records")?;
    writeln!(writer)?;
    Ok(())
}
