//! Filtering module for order-item records
//!
//! The filter selection is an immutable value object: the state set plus a
//! handful of optional criteria (date range, order status, region, price
//! range, item-count range). Applying it to the record set yields the two
//! derived views every pipeline consumes: the customer-side view and the
//! seller-side view.
//!
//! # Examples
//!
//! ```
//! use salestat::filters::FilterSelection;
//! use salestat::types::{OrderStatus, StateCode};
//! use chrono::NaiveDate;
//!
//! // Delivered orders from SP and RJ, January 2017 onwards
//! let selection = FilterSelection::new([StateCode::new("SP"), StateCode::new("RJ")])
//!     .with_since(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap())
//!     .with_statuses([OrderStatus::Delivered]);
//! ```

use crate::types::{OrderItem, OrderStatus, Region, StateCode};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// The two row subsets every pipeline consumes
///
/// The customer view is scoped by `customer_state`, the seller view by
/// `seller_state`. They are intentionally different subsets: customer-side
/// sums (revenue, tickets) come from the former, seller-side counts from the
/// latter, and the two must never be conflated.
#[derive(Debug, Clone, Default)]
pub struct FilteredViews {
    /// Rows whose `customer_state` is in the selection
    pub customers: Vec<OrderItem>,
    /// Rows whose `seller_state` is in the selection
    pub sellers: Vec<OrderItem>,
}

/// Immutable filter selection applied to the record set
///
/// The state set is always present (an empty set yields empty views, never an
/// error). Every other criterion is optional; a record missing an optional
/// column does not match an engaged filter on that column.
#[derive(Debug, Default, Clone)]
pub struct FilterSelection {
    /// Selected state codes
    pub states: BTreeSet<StateCode>,
    /// Start date filter (inclusive)
    pub since: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub until: Option<NaiveDate>,
    /// Order status filter
    pub statuses: Option<BTreeSet<OrderStatus>>,
    /// Region filter, intersected with the state set
    pub region: Option<Region>,
    /// Inclusive price bounds
    pub price_range: Option<(f64, f64)>,
    /// Inclusive items-per-order bounds
    pub item_range: Option<(u32, u32)>,
}

impl FilterSelection {
    /// Create a selection over the given states with no other restrictions
    pub fn new(states: impl IntoIterator<Item = StateCode>) -> Self {
        Self {
            states: states.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Create the default selection: every distinct seller state in the data
    pub fn all_states(records: &[OrderItem]) -> Self {
        Self::new(records.iter().map(|r| r.seller_state.clone()))
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Set the order status filter
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Set the region filter
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the inclusive price bounds
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some((min, max));
        self
    }

    /// Set the inclusive items-per-order bounds
    pub fn with_item_range(mut self, min: u32, max: u32) -> Self {
        self.item_range = Some((min, max));
        self
    }

    /// Check whether a state is in the effective selection
    ///
    /// A region filter narrows the state set rather than replacing it.
    fn state_selected(&self, state: &StateCode) -> bool {
        self.states.contains(state)
            && self.region.as_ref().is_none_or(|r| r.contains(state))
    }

    /// Criteria shared by both views
    fn matches_shared(&self, item: &OrderItem) -> bool {
        if self.since.is_some() || self.until.is_some() {
            let Some(date) = item.order_purchase_date else {
                return false;
            };
            if let Some(since) = self.since {
                if date < since {
                    return false;
                }
            }
            if let Some(until) = self.until {
                if date > until {
                    return false;
                }
            }
        }

        if let Some(statuses) = &self.statuses {
            match item.order_status {
                Some(status) if statuses.contains(&status) => {}
                _ => return false,
            }
        }

        if let Some((min, max)) = self.price_range {
            if item.total_price < min || item.total_price > max {
                return false;
            }
        }

        if let Some((min, max)) = self.item_range {
            match item.order_item_count {
                Some(count) if (min..=max).contains(&count) => {}
                _ => return false,
            }
        }

        true
    }

    /// Check whether a record belongs to the customer view
    pub fn matches_customer(&self, item: &OrderItem) -> bool {
        self.state_selected(&item.customer_state) && self.matches_shared(item)
    }

    /// Check whether a record belongs to the seller view
    pub fn matches_seller(&self, item: &OrderItem) -> bool {
        self.state_selected(&item.seller_state) && self.matches_shared(item)
    }

    /// Split the record set into the customer and seller views
    ///
    /// Pure over the input: the records are never mutated, and an empty
    /// selection simply yields two zero-row views.
    pub fn split(&self, records: &[OrderItem]) -> FilteredViews {
        let mut views = FilteredViews::default();
        for item in records {
            if self.matches_customer(item) {
                views.customers.push(item.clone());
            }
            if self.matches_seller(item) {
                views.sellers.push(item.clone());
            }
        }
        views
    }
}
