//! Aggregation pipelines for the filtered views
//!
//! Three independent, stateless pipelines summarize the customer and seller
//! views: headline metrics (the metric cards), the per-state breakdown and
//! the per-month breakdown. Each pipeline is a pure function re-executed in
//! full on every invocation; nothing is cached between runs.
//!
//! # Cloning Strategy
//!
//! Grouping keys (`StateCode`, `YearMonth`) are cloned into the accumulator
//! maps. State codes are two-byte strings and months are `Copy`, so there are
//! at most a few dozen small allocations per pass. Distinct counts are taken
//! over borrowed ids to avoid copying the (much larger) identifier strings.
//!
//! # Examples
//!
//! ```
//! use salestat::aggregation;
//! use salestat::filters::FilterSelection;
//! use salestat::types::{CustomerId, OrderItem, SellerId, StateCode};
//!
//! let records = vec![OrderItem {
//!     customer_unique_id: CustomerId::new("c1"),
//!     customer_state: StateCode::new("SP"),
//!     seller_id: SellerId::new("s1"),
//!     seller_state: StateCode::new("SP"),
//!     total_price: 100.0,
//!     order_purchase_year_month: "2017-01".parse().unwrap(),
//!     order_status: None,
//!     order_purchase_date: None,
//!     order_item_count: None,
//! }];
//!
//! let views = FilterSelection::all_states(&records).split(&records);
//! let metrics = aggregation::summarize(&views);
//! assert_eq!(metrics.total_revenue, 100.0);
//! ```

use crate::filters::FilteredViews;
use crate::types::{CustomerId, OrderItem, SellerId, StateCode, YearMonth};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Headline metrics shown as metric cards
///
/// Customer-side sums come from the customer view, seller-side counts from
/// the seller view. Ratios with a zero denominator report 0 instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineMetrics {
    /// Row count of the customer view
    pub order_count: u64,
    /// Distinct customers in the customer view
    pub unique_customers: u64,
    /// Distinct sellers in the seller view
    pub unique_sellers: u64,
    /// Sum of `total_price` over the customer view
    pub total_revenue: f64,
    /// Total revenue per order, 0 when there are no orders
    pub average_ticket: f64,
    /// Total revenue per distinct seller, 0 when there are no sellers
    pub average_seller_revenue: f64,
    /// Highest-grossing seller in the seller view, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_seller: Option<TopSeller>,
}

/// The seller with the highest summed revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSeller {
    /// Seller identifier
    pub seller_id: SellerId,
    /// Summed revenue for this seller
    pub revenue: f64,
}

/// Revenue summed per state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRevenue {
    pub state: StateCode,
    pub revenue: f64,
}

/// Distinct customers per state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCustomers {
    pub state: StateCode,
    pub unique_customers: u64,
}

/// Distinct sellers per state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSellers {
    pub state: StateCode,
    pub unique_sellers: u64,
}

/// Average ticket per state (revenue / distinct customers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTicket {
    pub state: StateCode,
    pub average_ticket: f64,
}

/// Per-state breakdown, every series sorted descending by its measure
///
/// Descending sorts tie-break by state code ascending so repeated runs over
/// the same views produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAggregates {
    pub revenue: Vec<StateRevenue>,
    pub unique_customers: Vec<StateCustomers>,
    pub unique_sellers: Vec<StateSellers>,
    pub average_ticket: Vec<StateTicket>,
}

/// Revenue summed per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: YearMonth,
    pub revenue: f64,
}

/// Distinct customers per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCustomers {
    pub month: YearMonth,
    pub unique_customers: u64,
}

/// Distinct sellers per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySellers {
    pub month: YearMonth,
    pub unique_sellers: u64,
}

/// Average ticket per month (revenue / distinct customers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTicket {
    pub month: YearMonth,
    pub average_ticket: f64,
}

/// Per-month breakdown, every series in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregates {
    pub revenue: Vec<MonthlyRevenue>,
    pub unique_customers: Vec<MonthlyCustomers>,
    pub unique_sellers: Vec<MonthlySellers>,
    pub average_ticket: Vec<MonthlyTicket>,
}

/// Compute the headline metrics from the two views
pub fn summarize(views: &FilteredViews) -> HeadlineMetrics {
    let total_revenue: f64 = views.customers.iter().map(|r| r.total_price).sum();
    let order_count = views.customers.len() as u64;

    let unique_customers = views
        .customers
        .iter()
        .map(|r| &r.customer_unique_id)
        .collect::<HashSet<&CustomerId>>()
        .len() as u64;
    let unique_sellers = views
        .sellers
        .iter()
        .map(|r| &r.seller_id)
        .collect::<HashSet<&SellerId>>()
        .len() as u64;

    let average_ticket = if order_count > 0 {
        total_revenue / order_count as f64
    } else {
        0.0
    };
    let average_seller_revenue = if unique_sellers > 0 {
        total_revenue / unique_sellers as f64
    } else {
        0.0
    };

    HeadlineMetrics {
        order_count,
        unique_customers,
        unique_sellers,
        total_revenue,
        average_ticket,
        average_seller_revenue,
        top_seller: top_seller(&views.sellers),
    }
}

/// Seller with the highest summed revenue over the seller view
///
/// Ties break to the lexicographically smallest seller id: the map iterates
/// ids in ascending order and the running best is only replaced on a strictly
/// greater revenue.
fn top_seller(sellers: &[OrderItem]) -> Option<TopSeller> {
    let mut revenue_by_seller: BTreeMap<&SellerId, f64> = BTreeMap::new();
    for item in sellers {
        *revenue_by_seller.entry(&item.seller_id).or_insert(0.0) += item.total_price;
    }

    let mut best: Option<(&SellerId, f64)> = None;
    for (seller_id, revenue) in revenue_by_seller {
        match best {
            Some((_, best_revenue)) if revenue <= best_revenue => {}
            _ => best = Some((seller_id, revenue)),
        }
    }

    best.map(|(seller_id, revenue)| TopSeller {
        seller_id: seller_id.clone(),
        revenue,
    })
}

/// Compute the per-state breakdown from the two views
pub fn by_state(views: &FilteredViews) -> StateAggregates {
    let mut revenue_map: BTreeMap<StateCode, f64> = BTreeMap::new();
    let mut customer_map: BTreeMap<StateCode, HashSet<&CustomerId>> = BTreeMap::new();
    for item in &views.customers {
        *revenue_map.entry(item.customer_state.clone()).or_insert(0.0) += item.total_price;
        customer_map
            .entry(item.customer_state.clone())
            .or_default()
            .insert(&item.customer_unique_id);
    }

    let mut seller_map: BTreeMap<StateCode, HashSet<&SellerId>> = BTreeMap::new();
    for item in &views.sellers {
        seller_map
            .entry(item.seller_state.clone())
            .or_default()
            .insert(&item.seller_id);
    }

    // Inner join of revenue and distinct customers on the state key; states
    // with no customers are excluded rather than divided.
    let mut average_ticket: Vec<StateTicket> = revenue_map
        .iter()
        .filter_map(|(state, &revenue)| {
            let customers = customer_map.get(state).map_or(0, HashSet::len) as u64;
            (customers > 0).then(|| StateTicket {
                state: state.clone(),
                average_ticket: revenue / customers as f64,
            })
        })
        .collect();
    average_ticket.sort_by(|a, b| {
        b.average_ticket
            .total_cmp(&a.average_ticket)
            .then_with(|| a.state.cmp(&b.state))
    });

    let mut revenue: Vec<StateRevenue> = revenue_map
        .into_iter()
        .map(|(state, revenue)| StateRevenue { state, revenue })
        .collect();
    revenue.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.state.cmp(&b.state))
    });

    let mut unique_customers: Vec<StateCustomers> = customer_map
        .into_iter()
        .map(|(state, ids)| StateCustomers {
            state,
            unique_customers: ids.len() as u64,
        })
        .collect();
    unique_customers.sort_by(|a, b| {
        b.unique_customers
            .cmp(&a.unique_customers)
            .then_with(|| a.state.cmp(&b.state))
    });

    let mut unique_sellers: Vec<StateSellers> = seller_map
        .into_iter()
        .map(|(state, ids)| StateSellers {
            state,
            unique_sellers: ids.len() as u64,
        })
        .collect();
    unique_sellers.sort_by(|a, b| {
        b.unique_sellers
            .cmp(&a.unique_sellers)
            .then_with(|| a.state.cmp(&b.state))
    });

    StateAggregates {
        revenue,
        unique_customers,
        unique_sellers,
        average_ticket,
    }
}

/// Compute the per-month breakdown from the two views
///
/// Months are already canonical `YearMonth` keys, so the `BTreeMap`
/// accumulators iterate chronologically and the series come out ordered as a
/// time series, not sorted by value.
pub fn by_month(views: &FilteredViews) -> MonthlyAggregates {
    let mut revenue_map: BTreeMap<YearMonth, f64> = BTreeMap::new();
    let mut customer_map: BTreeMap<YearMonth, HashSet<&CustomerId>> = BTreeMap::new();
    for item in &views.customers {
        *revenue_map
            .entry(item.order_purchase_year_month)
            .or_insert(0.0) += item.total_price;
        customer_map
            .entry(item.order_purchase_year_month)
            .or_default()
            .insert(&item.customer_unique_id);
    }

    let mut seller_map: BTreeMap<YearMonth, HashSet<&SellerId>> = BTreeMap::new();
    for item in &views.sellers {
        seller_map
            .entry(item.order_purchase_year_month)
            .or_default()
            .insert(&item.seller_id);
    }

    let average_ticket: Vec<MonthlyTicket> = revenue_map
        .iter()
        .filter_map(|(&month, &revenue)| {
            let customers = customer_map.get(&month).map_or(0, HashSet::len) as u64;
            (customers > 0).then(|| MonthlyTicket {
                month,
                average_ticket: revenue / customers as f64,
            })
        })
        .collect();

    let revenue = revenue_map
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue { month, revenue })
        .collect();
    let unique_customers = customer_map
        .into_iter()
        .map(|(month, ids)| MonthlyCustomers {
            month,
            unique_customers: ids.len() as u64,
        })
        .collect();
    let unique_sellers = seller_map
        .into_iter()
        .map(|(month, ids)| MonthlySellers {
            month,
            unique_sellers: ids.len() as u64,
        })
        .collect();

    MonthlyAggregates {
        revenue,
        unique_customers,
        unique_sellers,
        average_ticket,
    }
}
