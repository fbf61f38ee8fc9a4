// ⌨️ Interactive input - prompt until the user enters something valid
//
// Generic over the reader/writer pair so the console can run on stdin/stdout
// and the tests can script a whole session from a string.

use crate::calendar;
use crate::entities::sales::{is_supported_year, parse_decimal};
use crate::entities::{Region, Regions, Sales};
use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// Prompts are left-aligned in a column this wide
pub const PROMPT_WIDTH: usize = 20;

pub struct InputAccess<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> InputAccess<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        InputAccess { reader, writer }
    }

    /// Where prompts, warnings and reports are written
    pub fn out(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Show `prompt` and read one line without its line ending.
    /// Ok(None) at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like `read_line`, but end of input is an error
    pub fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?
            .ok_or_else(|| anyhow!("input closed"))
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }

    // ========================================================================
    // FIELD PROMPTS
    // ========================================================================

    pub fn input_amount(&mut self) -> Result<Decimal> {
        let prompt = format!("{:PROMPT_WIDTH$}", "Amount:");
        loop {
            let entry = self.prompt(&prompt)?;
            match parse_decimal(&entry) {
                Some(amount) if amount > Decimal::ZERO => return Ok(amount),
                Some(_) => self.warn("Amount must be greater than zero.")?,
                None => self.warn("Invalid amount value.")?,
            }
        }
    }

    /// Integer in `low..=high`, prompt like `Month (1-12):`
    pub fn input_int(&mut self, entry_item: &str, high: i32, low: i32) -> Result<i32> {
        let item = capitalize(entry_item);
        let prompt = format!("{:PROMPT_WIDTH$}", format!("{} ({}-{}):", item, low, high));
        loop {
            let entry = self.prompt(&prompt)?;
            match entry.trim().parse::<i32>() {
                Ok(value) if (low..=high).contains(&value) => return Ok(value),
                Ok(_) => self.warn(&format!("{} must be between {} and {}.", item, low, high))?,
                Err(_) => self.warn(&format!("Invalid {} value.", entry_item))?,
            }
        }
    }

    pub fn input_year(&mut self) -> Result<i32> {
        self.input_int("year", Sales::MAX_YEAR, Sales::MIN_YEAR)
    }

    pub fn input_month(&mut self) -> Result<u32> {
        let month = self.input_int("month", 12, 1)?;
        Ok(month.unsigned_abs())
    }

    /// Day of the given month; the upper bound follows the calendar
    pub fn input_day(&mut self, year: i32, month: u32) -> Result<u32> {
        let max_day = calendar::max_day(year, month);
        let day = self.input_int("day", max_day as i32, 1)?;
        Ok(day.unsigned_abs())
    }

    pub fn input_region_code(&mut self, regions: &Regions) -> Result<String> {
        let valid_codes = regions.codes_as_tuple();
        let prompt = format!("{:PROMPT_WIDTH$}", format!("Region {}:", valid_codes));
        loop {
            let code = self.prompt(&prompt)?;
            let code = code.trim();
            if regions.contains(code) {
                return Ok(code.to_string());
            }
            self.warn(&format!("Region must be one of the following: {}.", valid_codes))?;
        }
    }

    pub fn input_date(&mut self) -> Result<NaiveDate> {
        let prompt = format!("{:PROMPT_WIDTH$}", "Date (yyyy-mm-dd):");
        loop {
            let entry = self.prompt(&prompt)?;
            match NaiveDate::parse_from_str(entry.trim(), Sales::DATE_FORMAT) {
                Ok(date) if is_supported_year(date.year()) => return Ok(date),
                Ok(_) => self.warn(&format!(
                    "Year of the date must be between {} and {}.",
                    Sales::MIN_YEAR,
                    Sales::MAX_YEAR
                ))?,
                Err(_) => self.warn(&format!("{} is not in a valid date format.", entry))?,
            }
        }
    }

    // ========================================================================
    // WHOLE RECORDS
    // ========================================================================

    /// Amount, then year / month / day separately, then region
    pub fn from_input1(&mut self, regions: &Regions) -> Result<Sales> {
        let amount = self.input_amount()?;
        let year = self.input_year()?;
        let month = self.input_month()?;
        let day = self.input_day(year, month)?;
        let sales_date = NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("Invalid date {}-{}-{}", year, month, day))?;
        let region = self.input_region(regions)?;

        Ok(Sales::new(amount, sales_date, region))
    }

    /// Amount, then a YYYY-MM-DD date, then region
    pub fn from_input2(&mut self, regions: &Regions) -> Result<Sales> {
        let amount = self.input_amount()?;
        let sales_date = self.input_date()?;
        let region = self.input_region(regions)?;

        Ok(Sales::new(amount, sales_date, region))
    }

    fn input_region(&mut self, regions: &Regions) -> Result<Region> {
        let code = self.input_region_code(regions)?;
        regions
            .get(&code)
            .cloned()
            .with_context(|| format!("Unknown region code: {}", code))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> InputAccess<Cursor<Vec<u8>>, Vec<u8>> {
        InputAccess::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(io: InputAccess<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(io.into_inner().1).unwrap()
    }

    #[test]
    fn test_input_amount_retries() {
        let mut io = session("abc\n0\n-5\n3245\n");

        let amount = io.input_amount().unwrap();

        assert_eq!(amount, Decimal::from(3245));
        assert_eq!(
            output(io),
            "Amount:             Invalid amount value.\n\
             Amount:             Amount must be greater than zero.\n\
             Amount:             Amount must be greater than zero.\n\
             Amount:             "
        );
    }

    #[test]
    fn test_input_amount_scientific_notation() {
        let mut io = session("1e\n-2e3\n2.5e3\n");

        let amount = io.input_amount().unwrap();

        assert_eq!(amount, Decimal::from(2500));
        let text = output(io);
        assert!(text.contains("Invalid amount value.\n"));
        assert!(text.contains("Amount must be greater than zero.\n"));
    }

    #[test]
    fn test_input_int_bounds() {
        let mut io = session("0\n20\nx\n2\n");

        let month = io.input_month().unwrap();

        assert_eq!(month, 2);
        let text = output(io);
        assert!(text.contains("Month (1-12):       Month must be between 1 and 12.\n"));
        assert!(text.contains("Invalid month value.\n"));
    }

    #[test]
    fn test_input_day_uses_month_length() {
        let mut io = session("29\n28\n");

        let day = io.input_day(2021, 2).unwrap();

        assert_eq!(day, 28);
        assert!(output(io).contains("Day (1-28):         Day must be between 1 and 28.\n"));
    }

    #[test]
    fn test_input_region_code() {
        let mut io = session("x\nc\n");

        let code = io.input_region_code(&Regions::standard()).unwrap();

        assert_eq!(code, "c");
        assert_eq!(
            output(io),
            "Region ('w', 'm', 'c', 'e'):\
             Region must be one of the following: ('w', 'm', 'c', 'e').\n\
             Region ('w', 'm', 'c', 'e'):"
        );
    }

    #[test]
    fn test_input_date() {
        let mut io = session("0021-08-14\n202a\n2021-8-14\n");

        let date = io.input_date().unwrap();

        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 8, 14).unwrap());
        let text = output(io);
        assert!(text.contains(
            "Date (yyyy-mm-dd):  Year of the date must be between 2000 and 2999.\n"
        ));
        assert!(text.contains("202a is not in a valid date format.\n"));
    }

    #[test]
    fn test_from_input1() {
        let mut io = session("0\n3245\n0\n3000\n2021\n0\n20\n2\n0\n40\n14\nx\nc\n");

        let sales = io.from_input1(&Regions::standard()).unwrap();

        assert_eq!(sales.amount, Some(Decimal::from(3245)));
        assert_eq!(sales.date_text(), "2021-02-14");
        assert_eq!(sales.region.name, "Central");
        assert!(output(io).contains("Year must be between 2000 and 2999.\nYear (2000-2999):   "));
    }

    #[test]
    fn test_from_input2() {
        let mut io = session("4324\n2021-08-14\ne\n");

        let sales = io.from_input2(&Regions::standard()).unwrap();

        assert_eq!(sales.date_text(), "2021-08-14");
        assert_eq!(sales.region.code, "e");
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut io = session("0\n");

        let err = io.input_amount().unwrap_err();

        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn test_read_line_strips_line_ending() {
        let mut io = session("view\r\n");

        assert_eq!(io.read_line("> ").unwrap().as_deref(), Some("view"));
        assert_eq!(io.read_line("> ").unwrap(), None);
    }
}
