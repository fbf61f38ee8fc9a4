use crate::entities::{parse_date, Region, Regions, Sales, SalesList};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Open (or create) the sales database and make sure the schema exists
pub fn open_database(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    setup_database(&conn)?;

    debug!(db = %db_path.display(), "database ready");
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Region Table (static lookup)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Region (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Sales Table
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Sales (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            salesDate TEXT NOT NULL,
            region TEXT NOT NULL REFERENCES Region(code)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_sales_date_region ON Sales(salesDate, region)",
        [],
    )?;

    // One row per (amount, date, region): reloading the same file is a no-op
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_sales_unique ON Sales(amount, salesDate, region)",
        [],
    )?;

    seed_regions(conn, &Regions::standard())?;

    Ok(())
}

/// Insert the given regions, leaving existing codes untouched
pub fn seed_regions(conn: &Connection, regions: &Regions) -> Result<usize> {
    let mut inserted = 0;
    for region in regions {
        inserted += conn.execute(
            "INSERT OR IGNORE INTO Region (code, name) VALUES (?1, ?2)",
            params![region.code, region.name],
        )?;
    }
    Ok(inserted)
}

/// Region code and name from the Region table, in insertion order
pub fn retrieve_regions(conn: &Connection) -> Result<Regions> {
    let mut stmt = conn.prepare("SELECT code, name FROM Region ORDER BY rowid")?;

    let regions = stmt
        .query_map([], |row| {
            Ok(Region {
                code: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Regions::from_list(regions))
}

/// First sales row (lowest ID) recorded for the given date and region
pub fn retrieve_sales_by_date_region(
    conn: &Connection,
    sales_date: NaiveDate,
    region_code: &str,
) -> Result<Option<Sales>> {
    let sales = conn
        .query_row(
            "SELECT s.ID, s.amount, s.salesDate, s.region, r.name
             FROM Sales s
             JOIN Region r ON r.code = s.region
             WHERE s.salesDate = ?1 AND s.region = ?2
             ORDER BY s.ID
             LIMIT 1",
            params![sales_date.format(Sales::DATE_FORMAT).to_string(), region_code],
            sales_from_row,
        )
        .optional()?;

    Ok(sales)
}

pub fn retrieve_sales_by_id(conn: &Connection, id: u32) -> Result<Option<Sales>> {
    let sales = conn
        .query_row(
            "SELECT s.ID, s.amount, s.salesDate, s.region, r.name
             FROM Sales s
             JOIN Region r ON r.code = s.region
             WHERE s.ID = ?1",
            params![id],
            sales_from_row,
        )
        .optional()?;

    Ok(sales)
}

/// Update amount, salesDate and region of the row with `sales.id`.
/// Returns false when no row has that ID.
pub fn update_sales(conn: &Connection, sales: &Sales) -> Result<bool> {
    let (Some(amount), Some(_)) = (sales.amount, sales.sales_date) else {
        bail!("Cannot store sales with bad data: {}", sales);
    };
    let amount = amount
        .to_f64()
        .with_context(|| format!("Amount out of range: {}", amount))?;

    let changed = conn.execute(
        "UPDATE Sales
         SET amount = ?1, salesDate = ?2, region = ?3
         WHERE ID = ?4",
        params![amount, sales.date_text(), sales.region.code, sales.id],
    )?;

    info!(id = sales.id, changed, "updated sales");
    Ok(changed > 0)
}

/// Outcome of `insert_sales`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertSummary {
    pub inserted: usize,
    /// Already stored with the same amount, date and region
    pub duplicates: usize,
    /// Bad amount or date, never stored
    pub skipped: usize,
}

/// Persist a sales list in one transaction. Records with bad data are
/// skipped, records already in the table are counted as duplicates.
pub fn insert_sales(conn: &Connection, sales_list: &SalesList) -> Result<InsertSummary> {
    let mut summary = InsertSummary::default();
    let tx = conn.unchecked_transaction()?;

    for sales in sales_list {
        let amount = match sales.amount.and_then(|a| a.to_f64()) {
            Some(amount) if sales.sales_date.is_some() => amount,
            _ => {
                summary.skipped += 1;
                continue;
            }
        };

        let result = tx.execute(
            "INSERT INTO Sales (amount, salesDate, region) VALUES (?1, ?2, ?3)",
            params![amount, sales.date_text(), sales.region.code],
        );

        match result {
            Ok(_) => summary.inserted += 1,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                summary.duplicates += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tx.commit()?;

    info!(
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        "inserted sales"
    );
    Ok(summary)
}

pub fn get_all_sales(conn: &Connection) -> Result<SalesList> {
    let mut stmt = conn.prepare(
        "SELECT s.ID, s.amount, s.salesDate, s.region, r.name
         FROM Sales s
         JOIN Region r ON r.code = s.region
         ORDER BY s.ID",
    )?;

    let sales = stmt
        .query_map([], sales_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SalesList::from(sales))
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM Sales", [], |row| row.get(0))?;

    Ok(count)
}

fn sales_from_row(row: &Row<'_>) -> rusqlite::Result<Sales> {
    let id: i64 = row.get(0)?;
    let amount: f64 = row.get(1)?;
    let sales_date: String = row.get(2)?;

    Ok(Sales {
        id: u32::try_from(id).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, id))?,
        amount: Decimal::from_f64(amount)
            .map(|a| a.round_dp(2))
            .filter(|a| *a > Decimal::ZERO),
        sales_date: parse_date(&sales_date),
        region: Region {
            code: row.get(3)?,
            name: row.get(4)?,
        },
    })
}
