//! Integration tests for salestat

use chrono::NaiveDate;
use salestat::{
    aggregation,
    filters::{FilterSelection, FilteredViews},
    types::{CustomerId, OrderItem, OrderStatus, SellerId, StateCode},
};

fn create_test_record(
    customer: &str,
    customer_state: &str,
    seller: &str,
    seller_state: &str,
    price: f64,
    month: &str,
) -> OrderItem {
    OrderItem {
        customer_unique_id: CustomerId::new(customer),
        customer_state: StateCode::new(customer_state),
        seller_id: SellerId::new(seller),
        seller_state: StateCode::new(seller_state),
        total_price: price,
        order_purchase_year_month: month.parse().unwrap(),
        order_status: Some(OrderStatus::Delivered),
        order_purchase_date: NaiveDate::from_ymd_opt(2017, 6, 15),
        order_item_count: Some(1),
    }
}

fn sample_records() -> Vec<OrderItem> {
    vec![
        create_test_record("c1", "SP", "s1", "SP", 100.0, "2017-01"),
        create_test_record("c2", "SP", "s1", "SP", 50.0, "2017-01"),
        create_test_record("c3", "RJ", "s2", "RJ", 200.0, "2017-02"),
    ]
}

#[test]
fn test_state_selection_worked_example() {
    // Records {(SP, 100), (SP, 50), (RJ, 200)} with selection {SP, RJ}:
    // total revenue 350, per-state revenue sorted descending [RJ:200, SP:150]
    let records = sample_records();
    let selection = FilterSelection::new([StateCode::new("SP"), StateCode::new("RJ")]);
    let views = selection.split(&records);

    let metrics = aggregation::summarize(&views);
    assert_eq!(metrics.total_revenue, 350.0);
    assert_eq!(metrics.order_count, 3);

    let states = aggregation::by_state(&views);
    let revenue: Vec<(&str, f64)> = states
        .revenue
        .iter()
        .map(|r| (r.state.as_str(), r.revenue))
        .collect();
    assert_eq!(revenue, vec![("RJ", 200.0), ("SP", 150.0)]);
}

#[test]
fn test_empty_selection_degrades_to_zero_metrics() {
    let records = sample_records();
    let views = FilterSelection::new([]).split(&records);

    assert!(views.customers.is_empty());
    assert!(views.sellers.is_empty());

    let metrics = aggregation::summarize(&views);
    assert_eq!(metrics.order_count, 0);
    assert_eq!(metrics.total_revenue, 0.0);
    assert_eq!(metrics.average_ticket, 0.0);
    assert_eq!(metrics.average_seller_revenue, 0.0);
    assert!(metrics.top_seller.is_none());

    let states = aggregation::by_state(&views);
    assert!(states.revenue.is_empty());
    assert!(states.unique_customers.is_empty());
    assert!(states.unique_sellers.is_empty());
    assert!(states.average_ticket.is_empty());

    let monthly = aggregation::by_month(&views);
    assert!(monthly.revenue.is_empty());
}

#[test]
fn test_monthly_worked_example() {
    // Months "2017-03", "2017-01", "2017-02" with revenues 10, 20, 30 must
    // come out in order 2017-01(20), 2017-02(30), 2017-03(10)
    let records = vec![
        create_test_record("c1", "SP", "s1", "SP", 10.0, "2017-03"),
        create_test_record("c2", "SP", "s1", "SP", 20.0, "2017-01"),
        create_test_record("c3", "SP", "s1", "SP", 30.0, "2017-02"),
    ];
    let views = FilterSelection::all_states(&records).split(&records);

    let monthly = aggregation::by_month(&views);
    let series: Vec<(String, f64)> = monthly
        .revenue
        .iter()
        .map(|r| (r.month.to_string(), r.revenue))
        .collect();
    assert_eq!(
        series,
        vec![
            ("2017-01".to_string(), 20.0),
            ("2017-02".to_string(), 30.0),
            ("2017-03".to_string(), 10.0),
        ]
    );
}

#[test]
fn test_customer_and_seller_views_are_distinct_subsets() {
    // A record sold from RJ to a customer in SP belongs to the SP customer
    // view and the RJ seller view, never both sides of one state.
    let records = vec![
        create_test_record("c1", "SP", "s1", "RJ", 100.0, "2017-01"),
        create_test_record("c2", "RJ", "s2", "SP", 60.0, "2017-01"),
    ];
    let selection = FilterSelection::new([StateCode::new("SP")]);
    let views = selection.split(&records);

    assert_eq!(views.customers.len(), 1);
    assert_eq!(views.customers[0].customer_unique_id, CustomerId::new("c1"));
    assert_eq!(views.sellers.len(), 1);
    assert_eq!(views.sellers[0].seller_id, SellerId::new("s2"));

    // Customer-side revenue comes from the customer view only
    let metrics = aggregation::summarize(&views);
    assert_eq!(metrics.total_revenue, 100.0);
    assert_eq!(metrics.unique_sellers, 1);
}

#[test]
fn test_supplementary_criteria_restrict_both_views() {
    let mut canceled = create_test_record("c4", "SP", "s3", "SP", 400.0, "2017-03");
    canceled.order_status = Some(OrderStatus::Canceled);

    let mut records = sample_records();
    records.push(canceled);

    let selection = FilterSelection::all_states(&records)
        .with_statuses([OrderStatus::Delivered])
        .with_price_range(0.0, 300.0);
    let views = selection.split(&records);

    assert_eq!(views.customers.len(), 3);
    assert_eq!(views.sellers.len(), 3);
    assert!(
        views
            .customers
            .iter()
            .all(|r| r.order_status == Some(OrderStatus::Delivered))
    );
}

#[test]
fn test_region_filter_narrows_selection() {
    let records = vec![
        create_test_record("c1", "SP", "s1", "SP", 100.0, "2017-01"),
        create_test_record("c2", "BA", "s2", "BA", 50.0, "2017-01"),
    ];

    let selection = FilterSelection::all_states(&records).with_region("sudeste".parse().unwrap());
    let views = selection.split(&records);

    assert_eq!(views.customers.len(), 1);
    assert_eq!(views.customers[0].customer_state, StateCode::new("SP"));
}

#[test]
fn test_average_ticket_per_state_joins_on_state() {
    // SP has customer rows, RJ has seller rows only, so RJ must be absent
    // from the average-ticket join.
    let records = vec![
        create_test_record("c1", "SP", "s1", "RJ", 90.0, "2017-01"),
        create_test_record("c2", "SP", "s1", "RJ", 30.0, "2017-01"),
    ];
    let views = FilterSelection::new([StateCode::new("SP"), StateCode::new("RJ")]).split(&records);

    let states = aggregation::by_state(&views);
    assert_eq!(states.average_ticket.len(), 1);
    assert_eq!(states.average_ticket[0].state, StateCode::new("SP"));
    // 120.0 revenue over 2 distinct customers
    assert_eq!(states.average_ticket[0].average_ticket, 60.0);

    // The seller-side series still reports RJ
    assert_eq!(states.unique_sellers.len(), 1);
    assert_eq!(states.unique_sellers[0].state, StateCode::new("RJ"));
}

#[test]
fn test_pipelines_are_idempotent() {
    let records = sample_records();
    let views = FilterSelection::all_states(&records).split(&records);

    assert_eq!(aggregation::summarize(&views), aggregation::summarize(&views));
    assert_eq!(aggregation::by_state(&views), aggregation::by_state(&views));
    assert_eq!(aggregation::by_month(&views), aggregation::by_month(&views));
}

#[test]
fn test_summarize_handles_views_with_one_empty_side() {
    // Sellers only: revenue is 0 (customer-side sum) but the seller counts
    // and top seller still come through.
    let records = vec![create_test_record("c1", "MG", "s1", "SP", 75.0, "2017-01")];
    let views = FilterSelection::new([StateCode::new("SP")]).split(&records);

    assert!(views.customers.is_empty());
    assert_eq!(views.sellers.len(), 1);

    let metrics = aggregation::summarize(&views);
    assert_eq!(metrics.total_revenue, 0.0);
    assert_eq!(metrics.average_ticket, 0.0);
    assert_eq!(metrics.unique_sellers, 1);
    let top = metrics.top_seller.unwrap();
    assert_eq!(top.seller_id, SellerId::new("s1"));
    assert_eq!(top.revenue, 75.0);
}

#[test]
fn test_views_default_is_empty() {
    let views = FilteredViews::default();
    let metrics = aggregation::summarize(&views);
    assert_eq!(metrics.order_count, 0);
}
