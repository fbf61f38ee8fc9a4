// Sales Data Importer - Database Tool
// Look up and correct sales amounts stored in SQLite

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use sales_importer::logging::init_tracing;
use sales_importer::maintenance::{
    get_sales, list_regions, load_sales, update_sales_record, view_stored_sales,
};
use sales_importer::{open_database, Config};

/// Sales database maintenance
#[derive(Parser, Debug)]
#[command(name = "sales-db", version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ./sales_importer.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "SALES_DB")]
    database: Option<PathBuf>,

    /// Directory holding all_sales.csv
    #[arg(long, env = "SALES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy the master sales file into the database
    Load,
    /// List region codes and names
    Regions,
    /// Show every stored sale
    View,
    /// Find the sale for a date and region
    Get {
        /// Sales date, yyyy-mm-dd
        #[arg(long)]
        date: String,
        /// Region code
        #[arg(long)]
        region: String,
    },
    /// Change a stored sale
    Update {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        amount: String,
        /// New sales date, yyyy-mm-dd
        #[arg(long)]
        date: Option<String>,
        /// New region code
        #[arg(long)]
        region: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        config.database = database;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    debug!(?config, "starting sales-db");

    let conn = open_database(&config.database)?;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Load => load_sales(&mut out, &conn, &config.all_sales_path())?,
        Command::Regions => list_regions(&mut out, &conn)?,
        Command::View => view_stored_sales(&mut out, &conn)?,
        Command::Get { date, region } => get_sales(&mut out, &conn, &date, &region)?,
        Command::Update {
            id,
            amount,
            date,
            region,
        } => update_sales_record(
            &mut out,
            &conn,
            id,
            &amount,
            date.as_deref(),
            region.as_deref(),
        )?,
    }

    out.flush()?;
    Ok(())
}
