//! Core domain types for salestat
//!
//! This module contains the fundamental types used throughout the salestat
//! library. These types provide strong typing for common concepts like
//! customer/seller identifiers, state codes, and calendar months.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SalestatError;

/// Strongly-typed customer identifier
///
/// # Examples
/// ```
/// use salestat::types::CustomerId;
///
/// let customer = CustomerId::new("c1a2b3");
/// assert_eq!(customer.as_str(), "c1a2b3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    /// Create a new CustomerId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed seller identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SellerId(String);

impl SellerId {
    /// Create a new SellerId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SellerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Two-letter state code
///
/// State codes are normalized to upper case on construction so that values
/// coming from the dataset and from the command line compare equal.
///
/// # Examples
/// ```
/// use salestat::types::StateCode;
///
/// let state = StateCode::new("sp");
/// assert_eq!(state.as_str(), "SP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct StateCode(String);

impl StateCode {
    /// Create a new StateCode, normalizing to upper case
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_ascii_uppercase())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StateCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar month used as the grouping key for the monthly pipelines
///
/// The dataset carries purchase months as `YYYY-MM` strings; they are
/// normalized to this type at load time so that grouping and ordering are
/// chronological rather than lexicographic.
///
/// # Examples
/// ```
/// use salestat::types::YearMonth;
///
/// let month: YearMonth = "2017-03".parse().unwrap();
/// assert_eq!(month.to_string(), "2017-03");
/// assert!(month < "2017-11".parse().unwrap());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a new YearMonth; returns None when the month is out of range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = SalestatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SalestatError::InvalidMonth(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = SalestatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Order status values present in the dataset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Delivered,
    Shipped,
    Canceled,
    Processing,
    Invoiced,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Shipped => write!(f, "shipped"),
            Self::Canceled => write!(f, "canceled"),
            Self::Processing => write!(f, "processing"),
            Self::Invoiced => write!(f, "invoiced"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = SalestatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivered" => Ok(Self::Delivered),
            "shipped" => Ok(Self::Shipped),
            "canceled" => Ok(Self::Canceled),
            "processing" => Ok(Self::Processing),
            "invoiced" => Ok(Self::Invoiced),
            _ => Err(SalestatError::InvalidArgument(format!(
                "Unknown order status: {s}"
            ))),
        }
    }
}

/// Brazilian macro-regions, each a fixed set of state codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    /// State codes belonging to this region
    pub fn states(&self) -> &'static [&'static str] {
        match self {
            Self::Norte => &["AC", "AM", "AP", "PA", "RO", "RR", "TO"],
            Self::Nordeste => &["AL", "BA", "CE", "MA", "PB", "PE", "PI", "RN", "SE"],
            Self::CentroOeste => &["DF", "GO", "MS", "MT"],
            Self::Sudeste => &["ES", "MG", "RJ", "SP"],
            Self::Sul => &["PR", "RS", "SC"],
        }
    }

    /// Check whether a state code belongs to this region
    pub fn contains(&self, state: &StateCode) -> bool {
        self.states().contains(&state.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Norte => write!(f, "norte"),
            Self::Nordeste => write!(f, "nordeste"),
            Self::CentroOeste => write!(f, "centro-oeste"),
            Self::Sudeste => write!(f, "sudeste"),
            Self::Sul => write!(f, "sul"),
        }
    }
}

impl FromStr for Region {
    type Err = SalestatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "norte" => Ok(Self::Norte),
            "nordeste" => Ok(Self::Nordeste),
            "centro-oeste" | "centrooeste" => Ok(Self::CentroOeste),
            "sudeste" => Ok(Self::Sudeste),
            "sul" => Ok(Self::Sul),
            _ => Err(SalestatError::InvalidArgument(format!(
                "Unknown region: {s}"
            ))),
        }
    }
}

/// Order-item record from the CSV export
///
/// One row per line item sold. The status, purchase-date and item-count
/// columns are optional in the export; when a column is absent the fields
/// stay unset and the corresponding filters match nothing once engaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Buyer identifier, deduplicated across orders
    pub customer_unique_id: CustomerId,
    /// State the buyer ordered from
    pub customer_state: StateCode,
    /// Seller identifier
    pub seller_id: SellerId,
    /// State the seller operates from
    pub seller_state: StateCode,
    /// Line-item price in BRL
    pub total_price: f64,
    /// Purchase month, normalized at load time
    pub order_purchase_year_month: YearMonth,
    /// Order status (optional column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// Purchase date (optional column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_purchase_date: Option<NaiveDate>,
    /// Number of items on the parent order (optional column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_item_count: Option<u32>,
}
