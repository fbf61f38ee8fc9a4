// 📅 Calendar helpers - leap years, month lengths, quarters
//
// Used by the day prompt (upper bound depends on year + month) and by the
// sales report (quarter column).

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

/// Number of days in `month` of `year`
pub fn max_day(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Calendar quarter (1-4) of a month. Anything outside 1-12 maps to 0,
/// which is what the report shows for rows without a usable date.
pub fn quarter(month: u32) -> u32 {
    match month {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        10..=12 => 4,
        _ => 0,
    }
}
