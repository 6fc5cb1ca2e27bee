use chrono::{NaiveDate, NaiveDateTime};
use core_types::{Dataset, Order, Payment, PerformanceRecord, Table, normalize_optional};
use filters::{FilterOptions, FilterSelection, apply_filters, order_matches};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn order(when: NaiveDateTime, brand: &str, product: &str, platform: &str, influencer: &str, revenue: Decimal) -> Order {
    Order {
        order_date: when,
        brand: brand.to_string(),
        product: product.to_string(),
        platform: normalize_optional(platform),
        influencer_id: influencer.to_string(),
        revenue_generated: revenue,
        campaign: None,
        raw: vec![influencer.to_string()],
    }
}

fn performance(influencer: &str) -> PerformanceRecord {
    PerformanceRecord {
        influencer_id: influencer.to_string(),
        raw: vec![influencer.to_string()],
    }
}

fn payment(when: NaiveDateTime, influencer: &str, amount: Decimal) -> Payment {
    Payment {
        invoice_date: when,
        influencer_id: influencer.to_string(),
        payment_amount: amount,
        raw: vec![influencer.to_string()],
    }
}

fn dataset() -> Dataset {
    Dataset {
        performance: Table::new(
            vec!["influencer_id".to_string()],
            vec![
                performance("INF1"),
                performance("INF2"),
                performance("INF3"),
                performance("INF1"),
                performance("INF9"),
            ],
        ),
        orders: Table::new(
            vec!["influencer_id".to_string()],
            vec![
                order(at(2025, 1, 1, 9), "MuscleBlaze", "Whey", "Instagram", "INF1", dec!(1000)),
                order(at(2025, 1, 15, 23), "MuscleBlaze", "Creatine", "", "INF2", dec!(400)),
                order(at(2025, 1, 31, 18), "HKVitals", "Fish Oil", "YouTube", "INF3", dec!(300)),
                order(at(2025, 2, 1, 0), "HKVitals", "Whey", "Instagram", "INF4", dec!(900)),
                order(at(2024, 12, 31, 23), "Gritzo", "SuperMilk", "Twitter", "INF1", dec!(200)),
            ],
        ),
        payments: Table::new(
            vec!["influencer_id".to_string()],
            vec![
                payment(at(2025, 1, 10, 12), "INF1", dec!(300)),
                payment(at(2025, 2, 10, 12), "INF1", dec!(300)),
                payment(at(2025, 1, 20, 12), "INF3", dec!(150)),
                payment(at(2025, 1, 20, 12), "INF9", dec!(999)),
            ],
        ),
    }
}

fn january_everything(data: &Dataset) -> FilterSelection {
    let options = FilterOptions::from_orders(&data.orders).unwrap();
    let mut selection = options.select_all();
    selection.start_date = day(2025, 1, 1);
    selection.end_date = day(2025, 1, 31);
    selection
}

#[test]
fn options_cover_the_loaded_orders() {
    let data = dataset();
    let options = FilterOptions::from_orders(&data.orders).unwrap();

    assert_eq!(options.min_date, day(2024, 12, 31));
    assert_eq!(options.max_date, day(2025, 2, 1));
    assert_eq!(options.brands, vec!["MuscleBlaze", "HKVitals", "Gritzo"]);
    assert_eq!(options.platforms, vec!["Instagram", "Organic", "YouTube", "Twitter"]);
}

#[test]
fn select_all_keeps_every_order() {
    let data = dataset();
    let selection = FilterOptions::from_orders(&data.orders).unwrap().select_all();
    let filtered = apply_filters(&data, &selection);
    assert_eq!(filtered.orders, data.orders);
}

#[test]
fn date_range_is_inclusive_and_ignores_time_of_day() {
    let data = dataset();
    let filtered = apply_filters(&data, &january_everything(&data));

    let ids: Vec<&str> = filtered.orders.iter().map(|o| o.influencer_id.as_str()).collect();
    assert_eq!(ids, vec!["INF1", "INF2", "INF3"]);
}

#[test]
fn every_kept_order_satisfies_all_predicates() {
    let data = dataset();
    let selection = january_everything(&data)
        .with_brands(["MuscleBlaze"])
        .with_platforms(["Instagram", "YouTube"]);
    let filtered = apply_filters(&data, &selection);

    assert_eq!(filtered.orders.len(), 1);
    assert!(filtered.orders.iter().all(|o| order_matches(&selection, o)));
    assert!(
        data.orders
            .iter()
            .filter(|o| order_matches(&selection, o))
            .eq(filtered.orders.iter())
    );
}

#[test]
fn influencer_set_drives_performance_and_payments() {
    let data = dataset();
    let filtered = apply_filters(&data, &january_everything(&data));

    let from_orders: HashSet<&str> = filtered.orders.influencer_ids();
    assert_eq!(from_orders, HashSet::from(["INF1", "INF2", "INF3"]));

    let perf_ids: Vec<&str> = filtered.performance.iter().map(|p| p.influencer_id.as_str()).collect();
    assert_eq!(perf_ids, vec!["INF1", "INF2", "INF3", "INF1"]);

    // INF1's February invoice is out of range and INF9 placed no matching order.
    let paid: Vec<(&str, Decimal)> = filtered
        .payments
        .iter()
        .map(|p| (p.influencer_id.as_str(), p.payment_amount))
        .collect();
    assert_eq!(paid, vec![("INF1", dec!(300)), ("INF3", dec!(150))]);
}

#[test]
fn organic_sentinel_matches_null_and_empty_platforms() {
    let when = at(2025, 1, 5, 10);
    let orders = vec![
        order(when, "B", "P", "Instagram", "I1", dec!(1)),
        Order {
            platform: None,
            ..order(when, "B", "P", "", "I2", dec!(1))
        },
        order(when, "B", "P", "", "I3", dec!(1)),
        order(when, "B", "P", "YouTube", "I4", dec!(1)),
    ];
    let data = Dataset {
        performance: Table::new(vec![], vec![]),
        orders: Table::new(vec![], orders),
        payments: Table::new(vec![], vec![]),
    };
    let selection = FilterSelection::new(day(2025, 1, 1), day(2025, 1, 31))
        .with_brands(["B"])
        .with_products(["P"])
        .with_platforms(["Organic", "Instagram"]);

    let filtered = apply_filters(&data, &selection);
    let ids: Vec<&str> = filtered.orders.iter().map(|o| o.influencer_id.as_str()).collect();
    assert_eq!(ids, vec!["I1", "I2", "I3"]);
}

#[test]
fn empty_categorical_selection_yields_empty_tables() {
    let data = dataset();
    for selection in [
        january_everything(&data).with_brands(Vec::<String>::new()),
        january_everything(&data).with_products(Vec::<String>::new()),
        january_everything(&data).with_platforms(Vec::<String>::new()),
    ] {
        let filtered = apply_filters(&data, &selection);
        assert!(filtered.orders.is_empty());
        assert!(filtered.performance.is_empty());
        assert!(filtered.payments.is_empty());
    }
}

#[test]
fn filtered_tables_are_independent_copies() {
    let data = dataset();
    let original = data.clone();
    let mut filtered = apply_filters(&data, &january_everything(&data));

    filtered.orders.rows[0].revenue_generated = dec!(0);
    filtered.payments.rows.clear();
    filtered.performance.rows[0].influencer_id = "changed".to_string();

    assert_eq!(data, original);
}
