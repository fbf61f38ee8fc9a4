// 🛠️ Database maintenance - the operations behind `sales-db`
//
// Lookup by date + region, correction by ID, and loading the master file.
// Output goes to any writer so the same code serves stdout and the tests.

use crate::db::{
    get_all_sales, insert_sales, retrieve_regions, retrieve_sales_by_date_region,
    retrieve_sales_by_id, update_sales, verify_count,
};
use crate::entities::{parse_amount, parse_date, Region, Regions};
use crate::error::LookupError;
use crate::report::view_sales;
use crate::storage::SalesStore;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::io::Write;
use std::path::Path;

const NO_SALES: &str = "No sales found.";

/// Copy the master sales file into the database. Safe to repeat.
pub fn load_sales<W: Write>(out: &mut W, conn: &Connection, sales_path: &Path) -> Result<()> {
    let regions = retrieve_regions(conn)?;
    let store = SalesStore::open(sales_path, &regions)?;
    if !store.file_found() {
        writeln!(out, "Sales file not found.")?;
        return Ok(());
    }

    let summary = insert_sales(conn, store.sales())?;
    writeln!(out, "✓ Loaded {} sales from {}", summary.inserted, store.path().display())?;
    if summary.duplicates > 0 {
        writeln!(out, "✓ Skipped {} sales already in the database", summary.duplicates)?;
    }
    if summary.skipped > 0 {
        writeln!(out, "✓ Skipped {} sales with bad data", summary.skipped)?;
    }

    let count = verify_count(conn)?;
    writeln!(out, "✓ Database contains {} sales", count)?;

    Ok(())
}

pub fn list_regions<W: Write>(out: &mut W, conn: &Connection) -> Result<()> {
    for region in &retrieve_regions(conn)? {
        writeln!(out, "{} - {}", region.code, region.name)?;
    }
    Ok(())
}

pub fn view_stored_sales<W: Write>(out: &mut W, conn: &Connection) -> Result<()> {
    let sales = get_all_sales(conn)?;
    view_sales(out, &sales)?;
    Ok(())
}

/// Show ID and amount of the sale recorded for `date` in `region_code`
pub fn get_sales<W: Write>(
    out: &mut W,
    conn: &Connection,
    date: &str,
    region_code: &str,
) -> Result<()> {
    let sales_date = check_date(date)?;
    let regions = retrieve_regions(conn)?;
    check_region(&regions, region_code)?;

    match retrieve_sales_by_date_region(conn, sales_date, region_code)? {
        Some(sales) => {
            writeln!(out, "ID:     {}", sales.id)?;
            writeln!(out, "Amount: {}", sales.amount_text())?;
        }
        None => writeln!(out, "{}", NO_SALES)?,
    }

    Ok(())
}

/// Set a new amount on sale `id`; date and region change only when given
pub fn update_sales_record<W: Write>(
    out: &mut W,
    conn: &Connection,
    id: u32,
    amount: &str,
    date: Option<&str>,
    region_code: Option<&str>,
) -> Result<()> {
    let new_amount = parse_amount(amount).ok_or_else(|| LookupError::InvalidAmount {
        amount: amount.to_string(),
    })?;
    let new_date = date.map(check_date).transpose()?;
    let regions = retrieve_regions(conn)?;
    let new_region = region_code
        .map(|code| check_region(&regions, code).cloned())
        .transpose()?;

    let Some(mut sales) = retrieve_sales_by_id(conn, id)? else {
        writeln!(out, "{}", NO_SALES)?;
        return Ok(());
    };

    sales.amount = Some(new_amount);
    if let Some(sales_date) = new_date {
        sales.sales_date = Some(sales_date);
    }
    if let Some(region) = new_region {
        sales.region = region;
    }

    if update_sales(conn, &sales)? {
        writeln!(out, "{} is updated.", sales)?;
    } else {
        writeln!(out, "{}", NO_SALES)?;
    }

    Ok(())
}

fn check_date(date: &str) -> Result<NaiveDate, LookupError> {
    parse_date(date).ok_or_else(|| LookupError::InvalidDate {
        date: date.to_string(),
    })
}

fn check_region<'a>(regions: &'a Regions, code: &str) -> Result<&'a Region, LookupError> {
    regions.get(code).ok_or_else(|| LookupError::UnknownRegion {
        code: code.to_string(),
        codes: regions.codes_as_list(),
    })
}
