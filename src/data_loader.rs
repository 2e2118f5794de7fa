//! Data loader for the order-items CSV export
//!
//! The loader opens a single pre-cleaned CSV file, validates that the
//! required columns are present in the header row, and deserializes each row
//! into an [`OrderItem`]. Any unreadable row fails the load with file
//! context; malformed values are never silently dropped.
//!
//! The file path is a configuration value: the `--data` flag, falling back
//! to the `SALESTAT_DATA` environment variable.
//!
//! # Examples
//!
//! ```no_run
//! use salestat::data_loader::DataLoader;
//!
//! # fn example() -> salestat::Result<()> {
//! let loader = DataLoader::new("order_items_cleaned.csv")?;
//! let records = loader.load_order_items()?;
//! println!("{} order items", records.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SalestatError};
use crate::types::OrderItem;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Columns every export must carry; the loader refuses files without them.
const REQUIRED_COLUMNS: &[&str] = &[
    "customer_unique_id",
    "customer_state",
    "seller_id",
    "seller_state",
    "total_price",
    "order_purchase_year_month",
];

/// Loader for the order-items dataset
#[derive(Debug)]
pub struct DataLoader {
    path: PathBuf,
    show_progress: bool,
}

impl DataLoader {
    /// Create a new DataLoader for the given CSV file
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(SalestatError::DataNotFound(path));
        }

        Ok(Self {
            path,
            show_progress: false,
        })
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The dataset path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all order items into memory
    ///
    /// Validates the header row up front, then deserializes every record.
    /// A row that fails to parse aborts the load with the file path and the
    /// underlying CSV error.
    pub fn load_order_items(&self) -> Result<Vec<OrderItem>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                return Err(SalestatError::MissingColumn(column.to_string()));
            }
        }

        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} rows read")
                    .unwrap(),
            );
            pb.set_message("Loading order items");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let mut records = Vec::new();
        for result in reader.deserialize::<OrderItem>() {
            let item = result.map_err(|e| SalestatError::Parse {
                file: self.path.clone(),
                error: e.to_string(),
            })?;
            records.push(item);

            if let Some(ref pb) = progress {
                pb.set_position(records.len() as u64);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Loaded {} order items", records.len()));
        }

        debug!("Loaded {} order items from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderStatus, StateCode};
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_csv_parsing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            "orders.csv",
            "customer_unique_id,customer_state,seller_id,seller_state,total_price,order_purchase_year_month,order_status\n\
             c1,SP,s1,RJ,129.90,2017-05,delivered\n\
             c2,MG,s2,SP,49.50,2017-06,\n",
        );

        let records = DataLoader::new(path).unwrap().load_order_items().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].customer_state, StateCode::new("SP"));
        assert_eq!(records[0].total_price, 129.90);
        assert_eq!(records[0].order_status, Some(OrderStatus::Delivered));
        assert_eq!(records[0].order_purchase_year_month.to_string(), "2017-05");
        assert_eq!(records[1].order_status, None);
        assert_eq!(records[1].order_purchase_date, None);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = DataLoader::new(temp_dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, SalestatError::DataNotFound(_)));
    }

    #[test]
    fn test_missing_required_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            "orders.csv",
            "customer_unique_id,customer_state,seller_id,seller_state,total_price\n\
             c1,SP,s1,RJ,129.90\n",
        );

        let err = DataLoader::new(path).unwrap().load_order_items().unwrap_err();
        match err {
            SalestatError::MissingColumn(column) => {
                assert_eq!(column, "order_purchase_year_month");
            }
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_month_fails_the_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(
            &temp_dir,
            "orders.csv",
            "customer_unique_id,customer_state,seller_id,seller_state,total_price,order_purchase_year_month\n\
             c1,SP,s1,RJ,129.90,May-2017\n",
        );

        let err = DataLoader::new(path).unwrap().load_order_items().unwrap_err();
        assert!(matches!(err, SalestatError::Parse { .. }));
    }
}
