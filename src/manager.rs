// 🧮 Sales Manager - business layer between the console and the files
//
// Owns the master sales list and the imported-file log. Import is split in
// steps so the console can show the rows before they are accepted:
//   check_sales_file -> read_sales_file -> (report) -> accept_import

use crate::config::Config;
use crate::deduplication::ImportedFileLog;
use crate::entities::{Regions, Sales, SalesList};
use crate::error::ImportError;
use crate::parser::SalesFile;
use crate::storage::SalesStore;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub struct SalesManager {
    data_dir: PathBuf,
    regions: Regions,
    store: SalesStore,
    imported: ImportedFileLog,
}

impl SalesManager {
    /// Load the master file and open the import log named by `config`
    pub fn new(config: &Config) -> Result<Self> {
        let regions = Regions::standard();
        let store = SalesStore::open(&config.all_sales_path(), &regions)?;

        Ok(SalesManager {
            data_dir: config.data_dir.clone(),
            regions,
            store,
            imported: ImportedFileLog::new(&config.imported_files_path()),
        })
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn sales(&self) -> &SalesList {
        self.store.sales()
    }

    /// False when the master file was missing at startup
    pub fn sales_file_found(&self) -> bool {
        self.store.file_found()
    }

    /// Record one user-entered sale
    pub fn add_sales(&mut self, sales: Sales) -> &Sales {
        let added = self.store.add(sales);
        info!(id = added.id, "added sales");
        added
    }

    // ========================================================================
    // IMPORT
    // ========================================================================

    /// Name format, region code and duplicate checks, in that order
    pub fn check_sales_file(&self, filename: &str) -> Result<SalesFile, ImportError> {
        let file = SalesFile::new(&self.data_dir, filename);

        if !file.is_valid_filename_format() {
            return Err(ImportError::InvalidFormat {
                filename: filename.to_string(),
            });
        }

        let known_region = file
            .region_code()
            .is_some_and(|code| self.regions.contains(&code));
        if !known_region {
            return Err(ImportError::UnknownRegion {
                filename: filename.to_string(),
                codes: self.regions.codes_as_list(),
            });
        }

        let already_imported = self
            .imported
            .already_imported(file.path())
            .map_err(|source| ImportError::LogRead { source })?;
        if already_imported {
            return Err(ImportError::AlreadyImported {
                filename: filename.to_string(),
            });
        }

        Ok(file)
    }

    /// Read the rows of a checked file
    pub fn read_sales_file(&self, file: &SalesFile) -> Result<SalesList, ImportError> {
        let region = file
            .region_code()
            .and_then(|code| self.regions.get(&code))
            .ok_or_else(|| ImportError::UnknownRegion {
                filename: file.filename().to_string(),
                codes: self.regions.codes_as_list(),
            })?;

        file.import_sales(region).map_err(|source| ImportError::Read {
            filename: file.filename().to_string(),
            source,
        })
    }

    /// Append imported sales to the master list, then record the file as
    /// imported. The sales are kept even if the log cannot be written.
    pub fn accept_import(&mut self, file: &SalesFile, imported: SalesList) -> Result<(), ImportError> {
        let count = imported.count();
        self.store.concat(imported);
        info!(file = file.filename(), count, "imported sales");

        self.imported
            .add_imported_file(file.path())
            .map_err(|source| ImportError::Log { source })
    }

    /// Rewrite the master file
    pub fn save_all_sales(&self) -> Result<()> {
        self.store.save()
    }
}
