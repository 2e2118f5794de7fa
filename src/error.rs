//! Error types for salestat
//!
//! This module defines the error types used throughout the salestat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use salestat::error::{Result, SalestatError};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to SalestatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for salestat operations
///
/// This enum encompasses all possible errors that can occur during
/// salestat operations, from IO errors to CSV parsing failures and
/// invalid filter arguments.
#[derive(Error, Debug)]
pub enum SalestatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset file does not exist
    #[error("Dataset not found: {0}")]
    DataNotFound(PathBuf),

    /// A required column is missing from the dataset header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Invalid month format
    #[error("Invalid month format: {0}")]
    InvalidMonth(String),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in salestat
///
/// This type alias makes it easier to work with Results throughout
/// the codebase by providing a default error type.
///
/// # Example
///
/// ```
/// use salestat::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, SalestatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SalestatError::MissingColumn("total_price".to_string());
        assert_eq!(error.to_string(), "Missing required column: total_price");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let salestat_error: SalestatError = io_error.into();
        assert!(matches!(salestat_error, SalestatError::Io(_)));
    }
}
