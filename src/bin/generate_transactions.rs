use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use commission_engine::generator::{write_transactions, DEFAULT_ACCOUNTS};

/// Generates a transaction log of roughly the requested size.
#[derive(Parser)]
struct Cli {
    /// Target file size in MB
    size_mb: u64,

    #[arg(short, long, default_value = "large_transactions.csv")]
    output: PathBuf,

    /// Number of distinct account ids
    #[arg(short, long, default_value_t = DEFAULT_ACCOUNTS)]
    accounts: u32,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let target_bytes = cli
        .size_mb
        .checked_mul(1024 * 1024)
        .with_context(|| format!("size in MB is too large: {}", cli.size_mb))?;

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create output file '{}'", cli.output.display()))?;
    let mut writer = BufWriter::new(file);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generated = write_transactions(&mut writer, &mut rng, target_bytes, cli.accounts)
        .with_context(|| format!("Failed to write transactions to '{}'", cli.output.display()))?;

    info!("{} transactions written", generated.lines);
    println!(
        "File '{}' generated with an approximate size of {} MB.",
        cli.output.display(),
        cli.size_mb
    );

    Ok(())
}
