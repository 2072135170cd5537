use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use presupuesto::cli::{handle_command, Commands};
use presupuesto::config::BudgetPaths;
use presupuesto::session::Session;
use presupuesto::storage::FileStore;

#[derive(Parser)]
#[command(
    name = "presupuesto",
    version,
    about = "Personal income, expense and debt ledger",
    long_about = "presupuesto records income, expense and debt entries, \
                  categorizes them and shows aggregated totals and \
                  per-category breakdowns, persisted locally between runs."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    paths.ensure_directories()?;

    let store = Arc::new(FileStore::new(paths.data_dir())?);
    let mut session = Session::load(store);

    handle_command(&mut session, &paths, cli.command)?;
    Ok(())
}
