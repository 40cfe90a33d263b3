use clap::Parser;
use fundpool::application::engine::PoolEngine;
use fundpool::domain::ports::{PayoutLedgerBox, PoolStoreBox};
use fundpool::infrastructure::in_memory::{InMemoryPayoutLedger, InMemoryPoolStore};
use fundpool::interfaces::csv::command_reader::CommandReader;
use fundpool::interfaces::csv::summary_writer::SummaryWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn build_engine(db_path: Option<PathBuf>) -> Result<PoolEngine> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            let store =
                fundpool::infrastructure::rocksdb::RocksDBStore::open(db_path).into_diagnostic()?;

            // The same RocksDB instance backs both ports
            let pools: PoolStoreBox = Box::new(store.clone());
            let ledger: PayoutLedgerBox = Box::new(store);

            Ok(PoolEngine::new(pools, ledger))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' \
                 feature is not enabled. Falling back to In-Memory storage."
            );
            let pools: PoolStoreBox = Box::new(InMemoryPoolStore::new());
            let ledger: PayoutLedgerBox = Box::new(InMemoryPayoutLedger::new());

            Ok(PoolEngine::new(pools, ledger))
        }
        None => {
            let pools: PoolStoreBox = Box::new(InMemoryPoolStore::new());
            let ledger: PayoutLedgerBox = Box::new(InMemoryPayoutLedger::new());

            Ok(PoolEngine::new(pools, ledger))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = build_engine(cli.db_path)?;

    // Run commands
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for cmd_result in reader.commands() {
        match cmd_result {
            Ok(cmd) => {
                if let Err(e) = engine.execute(cmd).await {
                    eprintln!("Error executing command: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    // Collect final state from engine
    let summaries = engine.into_results().await.into_diagnostic()?;

    // Output final state
    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write_summaries(summaries).into_diagnostic()?;

    Ok(())
}
