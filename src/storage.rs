// 🗄️ Master sales file - load, id assignment, save
//
// The master file holds every accepted sale as `amount,date,region_code`.
// Ids only live in memory: they are handed out in load order and continue
// for every record added or imported afterwards.

use crate::entities::{Regions, Sales, SalesList};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct SalesStore {
    path: PathBuf,
    sales: SalesList,
    next_id: u32,
    file_found: bool,
}

impl SalesStore {
    /// Load the master file. A missing file yields an empty store.
    pub fn open(path: &Path, regions: &Regions) -> Result<Self> {
        let mut store = SalesStore {
            path: path.to_path_buf(),
            sales: SalesList::new(),
            next_id: 1,
            file_found: true,
        };

        let mut reader = match ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(e) if is_not_found(&e) => {
                warn!(file = %path.display(), "sales file not found, starting empty");
                store.file_found = false;
                return Ok(store);
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to open sales file: {}", path.display())))
            }
        };

        for (line_num, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!("Failed to parse line {} of {}", line_num + 1, path.display())
            })?;

            // amount,date,...,region_code - the region is always the last field
            let region_code = record.get(record.len().saturating_sub(1)).unwrap_or("");
            let Some(region) = regions.get(region_code.trim()) else {
                warn!(
                    line = line_num + 1,
                    region_code,
                    "skipping sales row with unknown region"
                );
                continue;
            };

            let amount = if record.len() > 1 { record.get(0).unwrap_or("") } else { "" };
            let sales_date = if record.len() > 2 { record.get(1).unwrap_or("") } else { "" };

            store.add(Sales::from_fields(amount, sales_date, region.clone()));
        }

        info!(
            file = %path.display(),
            count = store.sales.count(),
            "loaded sales"
        );

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False when the master file did not exist at load time
    pub fn file_found(&self) -> bool {
        self.file_found
    }

    pub fn sales(&self) -> &SalesList {
        &self.sales
    }

    /// Id the next added record will get
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Append one record, assigning its id
    pub fn add(&mut self, mut sales: Sales) -> &Sales {
        sales.id = self.take_id();
        self.sales.add(sales);
        &self.sales[self.sales.count() - 1]
    }

    /// Append a whole list (e.g. an imported file), assigning ids in order
    pub fn concat(&mut self, mut other: SalesList) {
        for sales in other.iter_mut() {
            sales.id = self.take_id();
        }
        self.sales.concat(other);
    }

    /// Rewrite the master file from memory
    pub fn save(&self) -> Result<()> {
        self.save_with_delimiter(b',')
    }

    pub fn save_with_delimiter(&self, delimiter: u8) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .from_path(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;

        for sales in &self.sales {
            writer.write_record([
                sales.amount_text(),
                sales.date_text(),
                sales.region.code.clone(),
            ])?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!(file = %self.path.display(), count = self.sales.count(), "saved sales");
        Ok(())
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn is_not_found(error: &csv::Error) -> bool {
    matches!(error.kind(), csv::ErrorKind::Io(e) if e.kind() == ErrorKind::NotFound)
}
