use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use khlong_core::{decompose_address, normalize_date};
use khlong_finance::{classify, extract_entity_name, RowTable, TaskBuilder};
use khlong_ingest::{
    extract_account_info, parse_statement_text, summarize, write_records_csv, write_records_json,
};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{ColumnOverrides, config_path, init_config, load_config};

#[derive(Parser, Debug)]
#[command(name = "khlong", version, about = "Bank statement text to automation tasks")]
struct Cli {
    /// Config file (default: ./khlong.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse extracted statement text into transaction records
    ParseStatement {
        /// Text file produced by the PDF extractor
        #[arg(long)]
        text: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Validate a row table and split it into tasks and skipped rows
    BuildTasks {
        /// CSV with a header row
        #[arg(long)]
        csv: PathBuf,

        /// Where to write accepted tasks as JSON (default: stdout)
        #[arg(long)]
        tasks_out: Option<PathBuf>,

        /// Where to write skipped rows as CSV
        #[arg(long)]
        skips_out: Option<PathBuf>,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Classify a transfer description and extract the sender name
    Classify { description: String },

    /// Split a Thai address into components (JSON)
    Address { text: String },

    /// Normalize a date to DD/MM/YYYY
    NormalizeDate { text: String },

    /// Write a default config file if none exists
    InitConfig,
}

#[derive(Args, Debug)]
struct ColumnArgs {
    #[arg(long)]
    amount_col: Option<String>,
    #[arg(long)]
    transfer_type_col: Option<String>,
    #[arg(long)]
    registry_col: Option<String>,
    #[arg(long)]
    date_col: Option<String>,
    #[arg(long)]
    company_name_col: Option<String>,
}

impl From<ColumnArgs> for ColumnOverrides {
    fn from(a: ColumnArgs) -> Self {
        ColumnOverrides {
            amount: a.amount_col,
            transfer_type: a.transfer_type_col,
            registry_info: a.registry_col,
            date: a.date_col,
            company_name: a.company_name_col,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "khlong=debug" } else { "khlong=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg_path = config_path(cli.config.as_deref());

    match cli.command {
        Command::ParseStatement { text, out, json } => {
            parse_statement(&text, out.as_deref(), json)?;
        }

        Command::BuildTasks {
            csv,
            tasks_out,
            skips_out,
            columns,
        } => {
            let cfg = load_config(&cfg_path)?.apply(columns.into());
            build_tasks(&csv, tasks_out.as_deref(), skips_out.as_deref(), cfg.columns)?;
        }

        Command::Classify { description } => {
            let transfer_type = classify(&description);
            println!("type:   {} ({})", transfer_type, transfer_type.thai_label());
            println!("entity: {}", extract_entity_name(&description));
        }

        Command::Address { text } => {
            let parts = decompose_address(&text);
            println!("{}", serde_json::to_string_pretty(&parts)?);
        }

        Command::NormalizeDate { text } => {
            println!("{}", normalize_date(&text));
        }

        Command::InitConfig => {
            init_config(&cfg_path)?;
        }
    }

    Ok(())
}

/// File if given, else stdout.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(File::create(p).with_context(|| format!("create {}", p.display()))?),
        None => Box::new(io::stdout().lock()),
    })
}

fn parse_statement(text_path: &Path, out: Option<&Path>, json: bool) -> Result<()> {
    let text = fs::read_to_string(text_path)
        .with_context(|| format!("read {}", text_path.display()))?;

    let account = extract_account_info(&text);
    info!(
        account_number = %account.account_number,
        account_name = %account.account_name,
        branch = %account.branch,
        period = %format!("{} - {}", account.period_start, account.period_end),
        opening_balance = %account.opening_balance,
        "statement header"
    );

    let records = parse_statement_text(&text);
    let summary = summarize(&records);
    info!(
        rows = summary.rows,
        credits = summary.credits,
        debits = summary.debits,
        missing_amount = summary.missing_amount,
        total_credits = summary.total_credits,
        total_debits = summary.total_debits,
        "statement summary"
    );

    let writer = open_output(out)?;
    if json {
        write_records_json(&records, writer)?;
    } else {
        write_records_csv(&records, writer)?;
    }
    Ok(())
}

fn build_tasks(
    csv_path: &Path,
    tasks_out: Option<&Path>,
    skips_out: Option<&Path>,
    columns: khlong_finance::ColumnBindings,
) -> Result<()> {
    let table = RowTable::from_path(csv_path)?;
    table
        .check_bindings(&columns)
        .with_context(|| format!("binding columns of {}", csv_path.display()))?;

    let batch = TaskBuilder::new(columns).build(&table.rows);

    let mut writer = open_output(tasks_out)?;
    serde_json::to_writer_pretty(&mut writer, &batch.tasks).context("serializing tasks")?;
    writeln!(writer)?;

    if let Some(path) = skips_out {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut wtr = csv::Writer::from_writer(file);
        for skip in &batch.skips {
            wtr.serialize(skip).context("writing skip row")?;
        }
        wtr.flush()?;
    }

    eprintln!("{} tasks, {} skipped", batch.tasks.len(), batch.skips.len());
    for (reason, count) in batch.skips_by_reason() {
        eprintln!("  {reason}: {count}");
    }
    Ok(())
}
