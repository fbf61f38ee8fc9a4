// 📄 Sales File Parser
// Validates import file names and reads `amount,date` rows into sales records

use crate::entities::{Region, Sales, SalesList};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed-length pattern every import file name must follow
pub const NAMING_CONVENTION: &str = "sales_qn_yyyy_r.csv";

// ============================================================================
// SALES FILE
// ============================================================================

/// A quarterly regional sales file, e.g. `sales_q4_2021_w.csv`
#[derive(Debug, Clone)]
pub struct SalesFile {
    filename: String,
    path: PathBuf,
    delimiter: u8,
}

impl SalesFile {
    /// File `filename` inside `data_dir`
    pub fn new(data_dir: &Path, filename: &str) -> Self {
        SalesFile {
            filename: filename.to_string(),
            path: data_dir.join(filename),
            delimiter: b',',
        }
    }

    /// Builder pattern: use another field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks the fixed parts of `sales_qn_yyyy_r.csv`: overall length, the
    /// `sales_q` prefix, both inner underscores, and the `.csv` extension.
    /// The quarter digit, year and region positions are not inspected here.
    pub fn is_valid_filename_format(&self) -> bool {
        let name = self.filename.as_bytes();
        let pattern = NAMING_CONVENTION.as_bytes();

        name.len() == pattern.len()
            && name[..7] == pattern[..7]
            && name[8] == pattern[8]
            && name[13] == pattern[pattern.len() - 6]
            && name[name.len() - 4..] == pattern[pattern.len() - 4..]
    }

    /// Region code: the character right before the extension dot
    pub fn region_code(&self) -> Option<String> {
        let dot = self.filename.rfind('.')?;
        self.filename[..dot]
            .chars()
            .next_back()
            .map(|c| c.to_string())
    }

    /// Read every row of the file as a sales record of `region`.
    ///
    /// Rows are `amount,date` without a header. Fields that do not convert
    /// (including missing ones) are marked bad; only I/O and CSV structure
    /// errors fail the import.
    pub fn import_sales(&self, region: &Region) -> Result<SalesList, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)?;

        let mut imported = SalesList::new();

        for result in reader.records() {
            let record = result?;

            let amount = record.get(0).unwrap_or("");
            let sales_date = record.get(1).unwrap_or("");
            imported.add(Sales::from_fields(amount, sales_date, region.clone()));
        }

        debug!(
            file = %self.path.display(),
            rows = imported.count(),
            "read sales file"
        );

        Ok(imported)
    }
}
