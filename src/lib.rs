// Sales Data Importer - Core Library
// Exposes all modules for use in the console, the database tool, and tests

pub mod calendar;
pub mod config;
pub mod db;
pub mod deduplication;  // Imported-file log
pub mod entities;       // Region + Sales models
pub mod error;
pub mod input;
pub mod logging;
pub mod maintenance;    // sales-db operations
pub mod manager;
pub mod parser;         // Quarterly sales files
pub mod report;
pub mod storage;        // Master sales file
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use db::{
    open_database, setup_database, seed_regions, retrieve_regions,
    retrieve_sales_by_date_region, retrieve_sales_by_id, update_sales, insert_sales,
    get_all_sales, verify_count, InsertSummary,
};
pub use deduplication::ImportedFileLog;
pub use entities::{Region, Regions, Sales, SalesList, BAD_FIELD};
pub use error::{ImportError, LookupError};
pub use input::InputAccess;
pub use manager::SalesManager;
pub use parser::{SalesFile, NAMING_CONVENTION};
pub use report::{format_currency, view_sales};
pub use storage::SalesStore;
pub use ui::{Command, ConsoleUi};
