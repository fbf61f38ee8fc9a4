// 💵 Sales Entity - one sales record + the in-memory list
//
// Imported rows are never rejected field by field: a value that fails to
// parse is kept as "bad" (None) so the whole file can be shown to the user
// with the broken cells marked "?".

use super::region::Region;
use crate::calendar;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Rendering of a bad field in reports and files
pub const BAD_FIELD: &str = "?";

// ============================================================================
// SALES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Sales {
    /// Sequence number assigned by the store (0 until assigned)
    pub id: u32,

    /// None = the amount failed validation
    pub amount: Option<Decimal>,

    /// None = the date failed validation
    pub sales_date: Option<NaiveDate>,

    pub region: Region,
}

impl Sales {
    pub const DATE_FORMAT: &'static str = "%Y-%m-%d";
    pub const MIN_YEAR: i32 = 2000;
    pub const MAX_YEAR: i32 = 2_999;

    /// A fully valid record, typically from user input
    pub fn new(amount: Decimal, sales_date: NaiveDate, region: Region) -> Self {
        Sales {
            id: 0,
            amount: Some(amount),
            sales_date: Some(sales_date),
            region,
        }
    }

    /// Build a record from raw text fields, marking each one that does not
    /// convert as bad instead of failing the row.
    pub fn from_fields(amount: &str, sales_date: &str, region: Region) -> Self {
        Sales {
            id: 0,
            amount: parse_amount(amount),
            sales_date: parse_date(sales_date),
            region,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn has_bad_amount(&self) -> bool {
        self.amount.is_none()
    }

    pub fn has_bad_date(&self) -> bool {
        self.sales_date.is_none()
    }

    pub fn has_bad_data(&self) -> bool {
        self.has_bad_amount() || self.has_bad_date()
    }

    /// Calendar quarter of the sales date, 0 when the date is bad
    pub fn quarter(&self) -> u32 {
        self.sales_date
            .map(|d| calendar::quarter(d.month()))
            .unwrap_or(0)
    }

    /// Amount as written to files ("?" when bad)
    pub fn amount_text(&self) -> String {
        self.amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| BAD_FIELD.to_string())
    }

    /// Date as YYYY-MM-DD ("?" when bad)
    pub fn date_text(&self) -> String {
        self.sales_date
            .map(|d| d.format(Self::DATE_FORMAT).to_string())
            .unwrap_or_else(|| BAD_FIELD.to_string())
    }
}

impl fmt::Display for Sales {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sales(ID={}, amount={}, date={}, region={})",
            self.id,
            self.amount_text(),
            self.date_text(),
            self.region.name
        )
    }
}

// ============================================================================
// FIELD VALIDATION
// ============================================================================

/// Plain (`1250.50`) or scientific (`1.2505e3`) decimal text
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Strictly positive decimal amount
pub fn parse_amount(text: &str) -> Option<Decimal> {
    parse_decimal(text).filter(|amount| *amount > Decimal::ZERO)
}

/// YYYY-MM-DD date with a year in the supported range
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), Sales::DATE_FORMAT)
        .ok()
        .filter(|d| is_supported_year(d.year()))
}

pub fn is_supported_year(year: i32) -> bool {
    (Sales::MIN_YEAR..=Sales::MAX_YEAR).contains(&year)
}

// ============================================================================
// SALES LIST
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesList {
    sales: Vec<Sales>,
}

impl SalesList {
    pub fn new() -> Self {
        SalesList { sales: Vec::new() }
    }

    pub fn count(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn add(&mut self, sales: Sales) {
        self.sales.push(sales);
    }

    /// Append every record of another list
    pub fn concat(&mut self, other: SalesList) {
        self.sales.extend(other.sales);
    }

    pub fn get(&self, index: usize) -> Option<&Sales> {
        self.sales.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sales> {
        self.sales.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sales> {
        self.sales.iter_mut()
    }

    pub fn has_bad_data(&self) -> bool {
        self.sales.iter().any(Sales::has_bad_data)
    }

    /// Sum of all amounts that are not bad. None when the sum overflows.
    pub fn total(&self) -> Option<Decimal> {
        self.sales
            .iter()
            .filter_map(|s| s.amount)
            .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
    }
}

impl From<Vec<Sales>> for SalesList {
    fn from(sales: Vec<Sales>) -> Self {
        SalesList { sales }
    }
}

impl std::ops::Index<usize> for SalesList {
    type Output = Sales;

    fn index(&self, index: usize) -> &Self::Output {
        &self.sales[index]
    }
}

impl<'a> IntoIterator for &'a SalesList {
    type Item = &'a Sales;
    type IntoIter = std::slice::Iter<'a, Sales>;

    fn into_iter(self) -> Self::IntoIter {
        self.sales.iter()
    }
}

impl IntoIterator for SalesList {
    type Item = Sales;
    type IntoIter = std::vec::IntoIter<Sales>;

    fn into_iter(self) -> Self::IntoIter {
        self.sales.into_iter()
    }
}
