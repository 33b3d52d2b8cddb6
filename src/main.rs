use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use commission_engine::csv_handler::write_commissions;
use commission_engine::processor::CommissionProcessor;
use commission_engine::storage::{Storage, TransactionStorage};

/// Calculates per-account commissions from a transaction log, leaving out the single highest transaction.
#[derive(Parser)]
struct Cli {
    /// CSV file with `account,transaction,amount` lines
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = File::open(&cli.file)
        .with_context(|| format!("Failed to open input file '{}'", cli.file.display()))?;
    let storage = TransactionStorage::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read transactions from '{}'", cli.file.display()))?;

    let mut processor = CommissionProcessor::new(&storage);
    processor.remove_highest_transaction();
    let commissions = processor.calculate_commissions();

    write_commissions(&commissions, io::stdout().lock()).context("Failed to write commission report")?;

    eprintln!(
        "{} commissions calculated - {} transactions read from file",
        commissions.len(),
        storage.transaction_count()
    );
    if storage.skipped_lines() > 0 {
        info!("{} malformed lines were skipped", storage.skipped_lines());
    }

    Ok(())
}
