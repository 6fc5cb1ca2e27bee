use analytics::breakdown::{Dimension, daily_payout, daily_revenue, influencer_summary, revenue_by, top_influencers};
use analytics::{KpiCalculator, KpiSet, calculate_kpis};
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{Dataset, Order, Payment, PerformanceRecord, Table};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn at(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap().and_hms_opt(10, 0, 0).unwrap()
}

fn order(influencer: &str, platform: Option<&str>, revenue: Decimal, campaign: Option<&str>) -> Order {
    Order {
        order_date: at(1),
        brand: "MuscleBlaze".to_string(),
        product: "Whey".to_string(),
        platform: platform.map(str::to_string),
        influencer_id: influencer.to_string(),
        revenue_generated: revenue,
        campaign: campaign.map(str::to_string),
        raw: vec![],
    }
}

fn payment(influencer: &str, amount: Decimal) -> Payment {
    Payment {
        invoice_date: at(2),
        influencer_id: influencer.to_string(),
        payment_amount: amount,
        raw: vec![],
    }
}

#[test]
fn worked_example_matches_hand_calculation() {
    let orders = vec![
        order("I1", None, dec!(1000), None),
        order("I2", Some("Instagram"), dec!(2000), Some("Launch")),
    ];
    let payments = vec![payment("I2", dec!(500))];

    let kpis = KpiCalculator::default().calculate(&orders, &payments);

    assert_eq!(kpis.total_revenue, dec!(3000));
    assert_eq!(kpis.total_payout, dec!(500));
    assert_eq!(kpis.net_profit, dec!(850));
    assert_eq!(kpis.baseline_revenue, dec!(1000));
    assert_eq!(kpis.influencer_driven_revenue, dec!(2000));
    assert_eq!(kpis.incremental_roas, dec!(4.0));
    assert_eq!(kpis.roi, dec!(170.0));
    assert_eq!(kpis.total_orders, 2);
    assert_eq!(kpis.organic_orders_count, 1);
    assert_eq!(kpis.influenced_orders_count, 1);
    assert_eq!(kpis.num_campaigns, 1);
    assert_eq!(kpis.overall_net_profit_percentage, dec!(850) / dec!(3000));
}

#[test]
fn empty_inputs_give_all_zeros() {
    let kpis = KpiCalculator::default().calculate(&[], &[]);
    assert_eq!(kpis, KpiSet::new());
}

#[test]
fn zero_payout_zeroes_payout_ratios() {
    let orders = vec![
        order("I1", Some("YouTube"), dec!(1200), None),
        order("I2", None, dec!(300), None),
    ];

    let kpis = KpiCalculator::default().calculate(&orders, &[]);
    assert_eq!(kpis.incremental_roas, Decimal::ZERO);
    assert_eq!(kpis.roi, Decimal::ZERO);
    assert_eq!(kpis.net_profit, dec!(675));
    assert_eq!(kpis.overall_net_profit_percentage, dec!(0.45));
}

#[test]
fn payout_without_revenue_has_no_profit_percentage() {
    let kpis = KpiCalculator::default().calculate(&[], &[payment("I1", dec!(100))]);
    assert_eq!(kpis.net_profit, dec!(-100));
    assert_eq!(kpis.roi, dec!(-100));
    assert_eq!(kpis.overall_net_profit_percentage, Decimal::ZERO);
}

#[test]
fn campaigns_are_counted_once_and_nulls_ignored() {
    let orders = vec![
        order("I1", Some("Instagram"), dec!(1), Some("Summer")),
        order("I2", Some("Instagram"), dec!(1), Some("Summer")),
        order("I3", Some("YouTube"), dec!(1), Some("Monsoon")),
        order("I4", None, dec!(1), None),
    ];
    assert_eq!(KpiCalculator::default().calculate(&orders, &[]).num_campaigns, 2);
}

#[test]
fn structural_identities_hold() {
    let orders = vec![
        order("I1", Some("Instagram"), dec!(120.50), None),
        order("I2", None, dec!(80.25), None),
        order("I3", Some("Twitter"), dec!(10), None),
        order("I4", None, dec!(0), None),
    ];
    let payments = vec![payment("I1", dec!(33.3)), payment("I3", dec!(7))];

    let kpis = KpiCalculator::default().calculate(&orders, &payments);
    assert_eq!(kpis.total_orders, kpis.influenced_orders_count + kpis.organic_orders_count);
    assert_eq!(kpis.total_revenue, kpis.baseline_revenue + kpis.influencer_driven_revenue);
}

#[test]
fn calculation_is_pure() {
    let orders = vec![order("I1", Some("Instagram"), dec!(999), Some("A"))];
    let payments = vec![payment("I1", dec!(111))];
    let (orders_before, payments_before) = (orders.clone(), payments.clone());

    let calculator = KpiCalculator::default();
    let first = calculator.calculate(&orders, &payments);
    let second = calculator.calculate(&orders, &payments);

    assert_eq!(first, second);
    assert_eq!(orders, orders_before);
    assert_eq!(payments, payments_before);
}

#[test]
fn configured_margin_changes_profit() {
    let orders = vec![order("I1", Some("Instagram"), dec!(1000), None)];
    let payments = vec![payment("I1", dec!(100))];
    let kpis = calculate_kpis(&orders, &payments, dec!(0.5));
    assert_eq!(kpis.net_profit, dec!(400));
    assert_eq!(kpis.roi, dec!(400));
}

fn view_dataset() -> Dataset {
    let mut orders = vec![
        order("I1", Some("Instagram"), dec!(500), None),
        order("I2", None, dec!(300), None),
        order("I1", Some("Instagram"), dec!(250), None),
        order("I3", Some("YouTube"), dec!(800), None),
    ];
    orders[1].brand = "HKVitals".to_string();
    orders[3].order_date = at(3);

    Dataset {
        performance: Table::new(
            vec!["influencer_id".to_string()],
            vec![
                PerformanceRecord { influencer_id: "I1".to_string(), raw: vec![] },
                PerformanceRecord { influencer_id: "I1".to_string(), raw: vec![] },
                PerformanceRecord { influencer_id: "I3".to_string(), raw: vec![] },
            ],
        ),
        orders: Table::new(vec![], orders),
        payments: Table::new(vec![], vec![payment("I1", dec!(250)), payment("I3", dec!(1000))]),
    }
}

#[test]
fn revenue_groups_are_sorted_by_revenue() {
    let data = view_dataset();

    let by_platform = revenue_by(&data.orders.rows, Dimension::Platform);
    let labels: Vec<(&str, Decimal, usize)> = by_platform
        .iter()
        .map(|g| (g.label.as_str(), g.revenue, g.orders))
        .collect();
    assert_eq!(
        labels,
        vec![("YouTube", dec!(800), 1), ("Instagram", dec!(750), 2), ("Organic", dec!(300), 1)]
    );

    let by_brand = revenue_by(&data.orders.rows, Dimension::Brand);
    assert_eq!(by_brand[0].label, "MuscleBlaze");
    assert_eq!(by_brand[0].revenue, dec!(1550));
    assert_eq!(by_brand[1].label, "HKVitals");
}

#[test]
fn daily_trends_are_summed_per_day_in_order() {
    let data = view_dataset();

    let revenue = daily_revenue(&data.orders.rows);
    assert_eq!(revenue.len(), 2);
    assert_eq!(revenue[0].date, at(1).date());
    assert_eq!(revenue[0].value, dec!(1050));
    assert_eq!(revenue[1].value, dec!(800));

    let payout = daily_payout(&data.payments.rows);
    assert_eq!(payout.len(), 1);
    assert_eq!(payout[0].value, dec!(1250));
}

#[test]
fn influencer_summary_joins_orders_payments_and_performance() {
    let data = view_dataset();
    let summary = influencer_summary(&data);

    let ids: Vec<&str> = summary.iter().map(|s| s.influencer_id.as_str()).collect();
    assert_eq!(ids, vec!["I3", "I1", "I2"]);

    let i1 = &summary[1];
    assert_eq!(i1.revenue, dec!(750));
    assert_eq!(i1.orders, 2);
    assert_eq!(i1.payout, dec!(250));
    assert_eq!(i1.roas, dec!(3));
    assert_eq!(i1.performance_records, 2);

    let i2 = &summary[2];
    assert_eq!(i2.payout, Decimal::ZERO);
    assert_eq!(i2.roas, Decimal::ZERO);

    assert_eq!(top_influencers(&data, 1)[0].influencer_id, "I3");
}
