use criterion::{Criterion, criterion_group, criterion_main};
use salestat::{
    aggregation,
    filters::FilterSelection,
    types::{CustomerId, OrderItem, SellerId, StateCode, YearMonth},
};
use std::hint::black_box;

const STATES: [&str; 8] = ["SP", "RJ", "MG", "BA", "PR", "RS", "PE", "AM"];

fn create_test_records(count: usize) -> Vec<OrderItem> {
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        records.push(OrderItem {
            customer_unique_id: CustomerId::new(format!("customer-{}", i % 500)),
            customer_state: StateCode::new(STATES[i % STATES.len()]),
            seller_id: SellerId::new(format!("seller-{}", i % 50)),
            seller_state: StateCode::new(STATES[(i / 3) % STATES.len()]),
            total_price: (i % 400) as f64 + 9.9,
            order_purchase_year_month: YearMonth::new(2017 + (i / 1200) as i32, (i % 12 + 1) as u32)
                .unwrap(),
            order_status: None,
            order_purchase_date: None,
            order_item_count: None,
        });
    }

    records
}

fn benchmark_filter_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_split");

    for count in [1_000, 10_000] {
        let records = create_test_records(count);
        let selection = FilterSelection::all_states(&records);

        group.bench_function(format!("split_{count}_records"), |b| {
            b.iter(|| {
                let _views = selection.split(black_box(&records));
            });
        });
    }

    group.finish();
}

fn benchmark_headline_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("headline_metrics");

    for count in [1_000, 10_000] {
        let records = create_test_records(count);
        let views = FilterSelection::all_states(&records).split(&records);

        group.bench_function(format!("summarize_{count}_records"), |b| {
            b.iter(|| {
                let _metrics = aggregation::summarize(black_box(&views));
            });
        });
    }

    group.finish();
}

fn benchmark_state_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_aggregation");

    for count in [1_000, 10_000] {
        let records = create_test_records(count);
        let views = FilterSelection::all_states(&records).split(&records);

        group.bench_function(format!("by_state_{count}_records"), |b| {
            b.iter(|| {
                let _aggregates = aggregation::by_state(black_box(&views));
            });
        });
    }

    group.finish();
}

fn benchmark_monthly_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_aggregation");

    for count in [1_000, 10_000] {
        let records = create_test_records(count);
        let views = FilterSelection::all_states(&records).split(&records);

        group.bench_function(format!("by_month_{count}_records"), |b| {
            b.iter(|| {
                let _aggregates = aggregation::by_month(black_box(&views));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_filter_split,
    benchmark_headline_metrics,
    benchmark_state_aggregation,
    benchmark_monthly_aggregation
);
criterion_main!(benches);
