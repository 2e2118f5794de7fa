//! CLI interface for salestat
//!
//! This module defines the command-line interface using clap. The filter
//! criteria are global flags shared by every report, so
//! `salestat summary --state SP` and `salestat --state SP summary` are
//! equivalent. When the report subcommand is omitted, the full dashboard
//! (headline + both breakdowns) is rendered.
//!
//! # Example
//!
//! ```bash
//! # Headline metrics for SP and RJ, delivered orders only
//! salestat --data order_items.csv summary --state SP,RJ --status delivered
//!
//! # Monthly time series for the Sudeste region as JSON
//! salestat --data order_items.csv monthly --region sudeste --json
//!
//! # Full dashboard, price window 50-1000 BRL
//! salestat --data order_items.csv --min-price 50 --max-price 1000
//! ```

use crate::error::{Result, SalestatError};
use crate::filters::FilterSelection;
use crate::types::{OrderItem, OrderStatus, Region, StateCode};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Analyze marketplace order data from CSV exports
#[derive(Parser, Debug, Clone)]
#[command(name = "salestat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the order-items CSV export
    #[arg(long, env = "SALESTAT_DATA")]
    pub data: PathBuf,

    /// Only show warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Filter by state code (repeatable or comma-separated; default: all states)
    #[arg(long = "state", value_delimiter = ',', global = true)]
    pub states: Vec<String>,

    /// Filter by start date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Filter by end date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Filter by order status (repeatable or comma-separated)
    #[arg(long = "status", value_delimiter = ',', global = true)]
    pub statuses: Vec<String>,

    /// Restrict the state selection to one macro-region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Minimum line-item price (inclusive)
    #[arg(long, global = true)]
    pub min_price: Option<f64>,

    /// Maximum line-item price (inclusive)
    #[arg(long, global = true)]
    pub max_price: Option<f64>,

    /// Minimum items per order (inclusive)
    #[arg(long, global = true)]
    pub min_items: Option<u32>,

    /// Maximum items per order (inclusive)
    #[arg(long, global = true)]
    pub max_items: Option<u32>,

    /// Report to run (default: the full dashboard)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available reports
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the headline metric cards
    Summary,
    /// Show the per-state breakdown
    States,
    /// Show the per-month breakdown
    Monthly,
}

impl Cli {
    /// Build the filter selection from the parsed flags
    ///
    /// The records are needed to compute the default state set (all distinct
    /// seller states). Criteria left unset on the command line stay disengaged
    /// so the default run matches the unfiltered dataset.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable dates, statuses or regions, and for
    /// inverted price or item-count ranges.
    pub fn selection(&self, records: &[OrderItem]) -> Result<FilterSelection> {
        let mut selection = if self.states.is_empty() {
            FilterSelection::all_states(records)
        } else {
            FilterSelection::new(self.states.iter().map(StateCode::new))
        };

        if let Some(since) = &self.since {
            selection = selection.with_since(parse_date_filter(since)?);
        }
        if let Some(until) = &self.until {
            selection = selection.with_until(parse_date_filter(until)?);
        }

        if !self.statuses.is_empty() {
            let statuses: Vec<OrderStatus> = self
                .statuses
                .iter()
                .map(|s| s.parse())
                .collect::<Result<_>>()?;
            selection = selection.with_statuses(statuses);
        }

        if let Some(region) = &self.region {
            selection = selection.with_region(region.parse::<Region>()?);
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let min = self.min_price.unwrap_or(0.0);
            let max = self.max_price.unwrap_or(f64::INFINITY);
            if min < 0.0 {
                return Err(SalestatError::InvalidArgument(format!(
                    "Minimum price must be non-negative, got {min}"
                )));
            }
            if min > max {
                return Err(SalestatError::InvalidArgument(format!(
                    "Inverted price range: {min} > {max}"
                )));
            }
            selection = selection.with_price_range(min, max);
        }

        if self.min_items.is_some() || self.max_items.is_some() {
            let min = self.min_items.unwrap_or(1);
            let max = self.max_items.unwrap_or(u32::MAX);
            if min > max {
                return Err(SalestatError::InvalidArgument(format!(
                    "Inverted item-count range: {min} > {max}"
                )));
            }
            selection = selection.with_item_range(min, max);
        }

        Ok(selection)
    }
}

/// Parse date filter from string
///
/// Accepts dates in YYYY-MM-DD or YYYY-MM format.
/// For YYYY-MM format, defaults to the first day of the month.
///
/// # Example
///
/// ```
/// use salestat::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2017-05-15").unwrap();
/// assert_eq!(date.year(), 2017);
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2017-05").unwrap();
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    // Try YYYY-MM-DD format first
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    // Try YYYY-MM format (convert to first day of month)
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| SalestatError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| SalestatError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(SalestatError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| SalestatError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(SalestatError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )))
    }
}
