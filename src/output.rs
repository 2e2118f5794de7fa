//! Output formatting for salestat
//!
//! This module is the presentation boundary: aggregation results come in as
//! plain rows/series and leave as strings. Two formatters are provided:
//! - Table format for human-readable terminal output, with a proportional
//!   bar column standing in for the original bar/line charts
//! - JSON format for machine-readable output
//!
//! # Examples
//!
//! ```
//! use salestat::output::get_formatter;
//! use salestat::aggregation::HeadlineMetrics;
//!
//! let metrics = HeadlineMetrics {
//!     order_count: 3,
//!     unique_customers: 2,
//!     unique_sellers: 2,
//!     total_revenue: 350.0,
//!     average_ticket: 116.67,
//!     average_seller_revenue: 175.0,
//!     top_seller: None,
//! };
//!
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_headline(&metrics));
//! ```

use crate::aggregation::{HeadlineMetrics, MonthlyAggregates, StateAggregates};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Width of the proportional bar column
const BAR_WIDTH: usize = 24;

/// Bar fill character (ASCII)
const BAR_FULL: &str = "#";

/// Trait for output formatters
///
/// Implementations render aggregation results without recomputing anything;
/// pipelines compute, formatters only display.
pub trait OutputFormatter {
    /// Format the headline metric cards
    fn format_headline(&self, metrics: &HeadlineMetrics) -> String;

    /// Format the per-state breakdown
    fn format_states(&self, aggregates: &StateAggregates) -> String;

    /// Format the per-month breakdown
    fn format_monthly(&self, aggregates: &MonthlyAggregates) -> String;

    /// Format the full dashboard (headline + both breakdowns)
    fn format_dashboard(
        &self,
        metrics: &HeadlineMetrics,
        states: &StateAggregates,
        monthly: &MonthlyAggregates,
    ) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. Numbers carry
/// thousands separators and amounts are shown in BRL.
pub struct TableFormatter;

impl TableFormatter {
    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Format a currency amount in BRL
    fn format_currency(amount: f64) -> String {
        let cents = (amount * 100.0).round() as u64;
        format!(
            "R${}.{:02}",
            Self::format_number(cents / 100),
            cents % 100
        )
    }

    /// Proportional bar for a value against the series maximum
    fn bar(value: f64, max: f64) -> String {
        if max <= 0.0 || value <= 0.0 {
            return String::new();
        }
        let filled = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
        BAR_FULL.repeat(filled.min(BAR_WIDTH))
    }

    /// Section heading
    fn section(title: &str) -> String {
        format!("\n{}\n", title.bold())
    }
}

impl OutputFormatter for TableFormatter {
    fn format_headline(&self, metrics: &HeadlineMetrics) -> String {
        let mut output = Self::section("Sales overview");

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Metric", b -> "Value"]);

        table.add_row(row!["Orders", r -> Self::format_number(metrics.order_count)]);
        table.add_row(row![
            "Unique customers",
            r -> Self::format_number(metrics.unique_customers)
        ]);
        table.add_row(row![
            "Unique sellers",
            r -> Self::format_number(metrics.unique_sellers)
        ]);
        table.add_row(row![
            "Total revenue",
            r -> Self::format_currency(metrics.total_revenue)
        ]);
        table.add_row(row![
            "Average ticket",
            r -> Self::format_currency(metrics.average_ticket)
        ]);
        table.add_row(row![
            "Average revenue per seller",
            r -> Self::format_currency(metrics.average_seller_revenue)
        ]);
        if let Some(top) = &metrics.top_seller {
            table.add_row(row![
                "Top seller",
                r -> format!("{} ({})", top.seller_id, Self::format_currency(top.revenue))
            ]);
        }

        output.push_str(&table.to_string());
        output
    }

    fn format_states(&self, aggregates: &StateAggregates) -> String {
        let mut output = String::new();

        output.push_str(&Self::section("Revenue by state"));
        let max = aggregates.revenue.first().map_or(0.0, |r| r.revenue);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "State", b -> "Revenue", b -> ""]);
        for entry in &aggregates.revenue {
            table.add_row(row![
                entry.state,
                r -> Self::format_currency(entry.revenue),
                Self::bar(entry.revenue, max)
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&Self::section("Unique customers by state"));
        let max = aggregates
            .unique_customers
            .first()
            .map_or(0.0, |r| r.unique_customers as f64);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "State", b -> "Customers", b -> ""]);
        for entry in &aggregates.unique_customers {
            table.add_row(row![
                entry.state,
                r -> Self::format_number(entry.unique_customers),
                Self::bar(entry.unique_customers as f64, max)
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&Self::section("Unique sellers by state"));
        let max = aggregates
            .unique_sellers
            .first()
            .map_or(0.0, |r| r.unique_sellers as f64);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "State", b -> "Sellers", b -> ""]);
        for entry in &aggregates.unique_sellers {
            table.add_row(row![
                entry.state,
                r -> Self::format_number(entry.unique_sellers),
                Self::bar(entry.unique_sellers as f64, max)
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&Self::section("Average ticket by state"));
        let max = aggregates
            .average_ticket
            .first()
            .map_or(0.0, |r| r.average_ticket);
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "State", b -> "Average ticket", b -> ""]);
        for entry in &aggregates.average_ticket {
            table.add_row(row![
                entry.state,
                r -> Self::format_currency(entry.average_ticket),
                Self::bar(entry.average_ticket, max)
            ]);
        }
        output.push_str(&table.to_string());

        output
    }

    fn format_monthly(&self, aggregates: &MonthlyAggregates) -> String {
        let mut output = String::new();

        output.push_str(&Self::section("Revenue by month"));
        let max = aggregates
            .revenue
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.revenue));
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Month", b -> "Revenue", b -> ""]);
        for entry in &aggregates.revenue {
            table.add_row(row![
                entry.month,
                r -> Self::format_currency(entry.revenue),
                Self::bar(entry.revenue, max)
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&Self::section("Unique customers by month"));
        let max = aggregates
            .unique_customers
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.unique_customers as f64));
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Month", b -> "Customers", b -> ""]);
        for entry in &aggregates.unique_customers {
            table.add_row(row![
                entry.month,
                r -> Self::format_number(entry.unique_customers),
                Self::bar(entry.unique_customers as f64, max)
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&Self::section("Unique sellers by month"));
        let max = aggregates
            .unique_sellers
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.unique_sellers as f64));
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Month", b -> "Sellers", b -> ""]);
        for entry in &aggregates.unique_sellers {
            table.add_row(row![
                entry.month,
                r -> Self::format_number(entry.unique_sellers),
                Self::bar(entry.unique_sellers as f64, max)
            ]);
        }
        output.push_str(&table.to_string());

        output.push_str(&Self::section("Average ticket by month"));
        let max = aggregates
            .average_ticket
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.average_ticket));
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Month", b -> "Average ticket", b -> ""]);
        for entry in &aggregates.average_ticket {
            table.add_row(row![
                entry.month,
                r -> Self::format_currency(entry.average_ticket),
                Self::bar(entry.average_ticket, max)
            ]);
        }
        output.push_str(&table.to_string());

        output
    }

    fn format_dashboard(
        &self,
        metrics: &HeadlineMetrics,
        states: &StateAggregates,
        monthly: &MonthlyAggregates,
    ) -> String {
        let mut output = String::new();
        output.push_str(&self.format_headline(metrics));
        output.push_str(&self.format_states(states));
        output.push_str(&self.format_monthly(monthly));
        output
    }
}

/// JSON formatter for machine-readable output
///
/// All data is preserved in its raw form for maximum flexibility; months are
/// emitted as `YYYY-MM` strings.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_headline(&self, metrics: &HeadlineMetrics) -> String {
        let output = json!({ "headline": metrics });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_states(&self, aggregates: &StateAggregates) -> String {
        let output = json!({ "by_state": aggregates });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_monthly(&self, aggregates: &MonthlyAggregates) -> String {
        let output = json!({ "by_month": aggregates });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_dashboard(
        &self,
        metrics: &HeadlineMetrics,
        states: &StateAggregates,
        monthly: &MonthlyAggregates,
    ) -> String {
        let output = json!({
            "headline": metrics,
            "by_state": states,
            "by_month": monthly,
        });
        serde_json::to_string_pretty(&output).unwrap()
    }
}

/// Get the appropriate formatter based on the output format
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
