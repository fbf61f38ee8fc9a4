// 📊 Sales report - fixed-width table with totals
//
//      Date           Quarter        Region                  Amount
// -----------------------------------------------------------------
// 1.   2020-12-22     4              West                $12,493.00
// 2.*  ?              0              West                 $9,710.00
// -----------------------------------------------------------------
// TOTAL                                                  $22,203.00

use crate::entities::{SalesList, BAD_FIELD};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::{self, Write};
use tracing::warn;

const NUM_W: usize = 5;
const DATE_W: usize = 15;
const QUARTER_W: usize = 15;
const REGION_W: usize = 15;
const AMOUNT_W: usize = 15;
const TOTAL_W: usize = NUM_W + DATE_W + QUARTER_W + REGION_W + AMOUNT_W;

/// Print the report for `sales`. Returns true when any row has bad data.
pub fn view_sales<W: Write>(out: &mut W, sales: &SalesList) -> io::Result<bool> {
    if sales.is_empty() {
        writeln!(out, "No sales to view.")?;
        return Ok(false);
    }

    let rule = "-".repeat(TOTAL_W);
    let mut bad_data = false;

    writeln!(
        out,
        "{:NUM_W$}{:DATE_W$}{:QUARTER_W$}{:REGION_W$}{:>AMOUNT_W$}",
        " ", "Date", "Quarter", "Region", "Amount"
    )?;
    writeln!(out, "{}", rule)?;

    for (idx, sale) in sales.iter().enumerate() {
        let num = if sale.has_bad_data() {
            bad_data = true;
            format!("{}.*", idx + 1)
        } else {
            format!("{}.", idx + 1)
        };

        let amount = sale
            .amount
            .map(format_currency)
            .unwrap_or_else(|| BAD_FIELD.to_string());

        writeln!(
            out,
            "{:<NUM_W$}{:DATE_W$}{:<QUARTER_W$}{:REGION_W$}{:>AMOUNT_W$}",
            num,
            sale.date_text(),
            sale.quarter(),
            sale.region.name,
            amount
        )?;
    }

    // Totals past Decimal::MAX are shown as bad
    let total = match sales.total() {
        Some(total) => format_currency(total),
        None => {
            warn!(rows = sales.count(), "sales total overflowed");
            BAD_FIELD.to_string()
        }
    };

    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{:NUM_W$}{:width$}{:>AMOUNT_W$}\n",
        "TOTAL",
        " ",
        total,
        width = DATE_W + QUARTER_W + REGION_W
    )?;

    Ok(bad_data)
}

/// `$12,345.68` - rounded half-up to cents, thousands grouped
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
