// Entity Models
//
// - Region: fixed (code, name) enumeration
// - Sales: one record with per-field bad-data flags, and the ordered list

pub mod region;
pub mod sales;

pub use region::{Region, Regions};
pub use sales::{parse_amount, parse_date, parse_decimal, Sales, SalesList, BAD_FIELD};
