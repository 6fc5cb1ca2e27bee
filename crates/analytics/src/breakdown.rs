//! Grouped totals and daily trends for the three dashboard views.

use chrono::NaiveDate;
use core_types::{Dataset, Order, Payment, platform_label};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A categorical column of the orders table to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Brand,
    Product,
    Platform,
}

impl Dimension {
    fn label<'a>(&self, order: &'a Order) -> &'a str {
        match self {
            Dimension::Brand => &order.brand,
            Dimension::Product => &order.product,
            Dimension::Platform => platform_label(order.platform.as_deref()),
        }
    }
}

/// Revenue and order count for one value of a `Dimension`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub label: String,
    pub revenue: Decimal,
    pub orders: usize,
}

/// One point of a daily time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Per-influencer figures for the influencer analysis view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluencerSummary {
    pub influencer_id: String,
    pub revenue: Decimal,
    pub orders: usize,
    pub payout: Decimal,
    /// Revenue over payout, or zero when nothing was paid.
    pub roas: Decimal,
    pub performance_records: usize,
}

/// Revenue and order counts grouped by `dimension`, highest revenue first.
///
/// Ties are broken by label so the output is stable. Organic orders group under
/// `ORGANIC_LABEL` when grouping by platform.
pub fn revenue_by(orders: &[Order], dimension: Dimension) -> Vec<GroupTotal> {
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for order in orders {
        let entry = groups.entry(dimension.label(order)).or_default();
        entry.0 += order.revenue_generated;
        entry.1 += 1;
    }

    let mut totals: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(label, (revenue, orders))| GroupTotal {
            label: label.to_string(),
            revenue,
            orders,
        })
        .collect();
    totals.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.label.cmp(&b.label)));
    totals
}

/// Revenue per order day, in date order. Days without orders are omitted.
pub fn daily_revenue(orders: &[Order]) -> Vec<TrendPoint> {
    daily(orders.iter().map(|o| (o.order_date.date(), o.revenue_generated)))
}

/// Payout per invoice day, in date order. Days without invoices are omitted.
pub fn daily_payout(payments: &[Payment]) -> Vec<TrendPoint> {
    daily(payments.iter().map(|p| (p.invoice_date.date(), p.payment_amount)))
}

fn daily(values: impl Iterator<Item = (NaiveDate, Decimal)>) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (date, value) in values {
        *by_day.entry(date).or_default() += value;
    }
    by_day
        .into_iter()
        .map(|(date, value)| TrendPoint { date, value })
        .collect()
}

/// One summary row per influencer with at least one order in `data`, highest revenue first.
pub fn influencer_summary(data: &Dataset) -> Vec<InfluencerSummary> {
    let mut rows: BTreeMap<&str, InfluencerSummary> = BTreeMap::new();
    for order in data.orders.iter() {
        let row = rows
            .entry(order.influencer_id.as_str())
            .or_insert_with(|| InfluencerSummary {
                influencer_id: order.influencer_id.clone(),
                revenue: Decimal::ZERO,
                orders: 0,
                payout: Decimal::ZERO,
                roas: Decimal::ZERO,
                performance_records: 0,
            });
        row.revenue += order.revenue_generated;
        row.orders += 1;
    }

    for payment in data.payments.iter() {
        if let Some(row) = rows.get_mut(payment.influencer_id.as_str()) {
            row.payout += payment.payment_amount;
        }
    }
    for record in data.performance.iter() {
        if let Some(row) = rows.get_mut(record.influencer_id.as_str()) {
            row.performance_records += 1;
        }
    }

    let mut summaries: Vec<InfluencerSummary> = rows
        .into_values()
        .map(|mut row| {
            if row.payout > Decimal::ZERO {
                row.roas = row.revenue.checked_div(row.payout).unwrap_or(Decimal::ZERO);
            }
            row
        })
        .collect();
    summaries.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.influencer_id.cmp(&b.influencer_id)));
    summaries
}

/// The `n` highest-revenue influencers.
pub fn top_influencers(data: &Dataset, n: usize) -> Vec<InfluencerSummary> {
    let mut summaries = influencer_summary(data);
    summaries.truncate(n);
    summaries
}
