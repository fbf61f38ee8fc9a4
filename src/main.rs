use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use sales_importer::logging::init_tracing;
use sales_importer::{Config, ConsoleUi, SalesManager};

/// Record, import and review quarterly regional sales
#[derive(Parser, Debug)]
#[command(name = "sales-importer", version, about)]
struct Args {
    /// Config file (defaults to ./sales_importer.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with all_sales.csv, imported_files.txt and the import files
    #[arg(long, env = "SALES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    debug!(?config, "starting console");

    let manager = SalesManager::new(&config)?;

    let stdin = io::stdin();
    let mut console = ConsoleUi::new(manager, stdin.lock(), io::stdout());
    console.run()?;

    println!("Bye!");

    Ok(())
}
