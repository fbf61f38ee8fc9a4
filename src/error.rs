//! Import rejection and lookup validation errors
//!
//! The `Display` text of each variant is the message shown to the user.

use crate::parser::NAMING_CONVENTION;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Filename '{filename}' doesn't follow the expected format of '{convention}'.", convention = NAMING_CONVENTION)]
    InvalidFormat { filename: String },

    #[error("Filename '{filename}' doesn't include one of the following region codes: {codes}.")]
    UnknownRegion { filename: String, codes: String },

    #[error("File '{filename}' has already been imported.")]
    AlreadyImported { filename: String },

    #[error("{source}. Fail to import sales from '{filename}'.")]
    Read {
        filename: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source}. Could not check the list of imported files.")]
    LogRead {
        #[source]
        source: std::io::Error,
    },

    #[error("{source} - The imported file could not be documented.")]
    Log {
        #[source]
        source: std::io::Error,
    },
}

/// Field validation for the database tool
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("{date} is not in a valid date format 'yyyy-mm-dd'.")]
    InvalidDate { date: String },

    #[error("{code} is not one of the following region code: {codes}.")]
    UnknownRegion { code: String, codes: String },

    #[error("{amount} is not a valid amount greater than zero.")]
    InvalidAmount { amount: String },
}
