use crate::format::{format_indian_currency, fraction_as_percent, multiple, percent, rupees};
use analytics::{GroupTotal, InfluencerSummary, KpiSet, TrendPoint};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use filters::{FilterOptions, FilterSelection};
use std::collections::BTreeMap;

fn base_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// A one-line summary of the active filters, printed above every view.
pub fn selection_summary(selection: &FilterSelection) -> String {
    format!(
        "{} to {} | {} brand(s), {} product(s), platforms: {}",
        selection.start_date,
        selection.end_date,
        selection.brands.len(),
        selection.products.len(),
        selection.platforms.iter().cloned().collect::<Vec<_>>().join(", ")
    )
}

/// The KPI cards of the overview.
pub fn kpi_cards(kpis: &KpiSet) -> Table {
    let mut table = base_table(&["Metric", "Value"]);
    let rows = [
        ("Total Revenue", rupees(kpis.total_revenue)),
        ("Total Payout", rupees(kpis.total_payout)),
        ("Net Profit", rupees(kpis.net_profit)),
        ("Net Profit Margin", fraction_as_percent(kpis.overall_net_profit_percentage)),
        ("ROI", percent(kpis.roi)),
        ("Incremental ROAS", multiple(kpis.incremental_roas)),
        ("Baseline (Organic) Revenue", rupees(kpis.baseline_revenue)),
        ("Influencer-Driven Revenue", rupees(kpis.influencer_driven_revenue)),
        ("Campaigns", kpis.num_campaigns.to_string()),
        ("Total Orders", kpis.total_orders.to_string()),
        ("Influenced Orders", kpis.influenced_orders_count.to_string()),
        ("Organic Orders", kpis.organic_orders_count.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), right(value)]);
    }
    table
}

/// Daily revenue and payout side by side. A day missing from one series shows as zero.
pub fn trend_table(revenue: &[TrendPoint], payout: &[TrendPoint]) -> Table {
    let mut days: BTreeMap<NaiveDate, (String, String)> = BTreeMap::new();
    for point in revenue {
        days.entry(point.date).or_insert_with(|| ("0".into(), "0".into())).0 =
            format_indian_currency(point.value);
    }
    for point in payout {
        days.entry(point.date).or_insert_with(|| ("0".into(), "0".into())).1 =
            format_indian_currency(point.value);
    }

    let mut table = base_table(&["Date", "Revenue (₹)", "Payout (₹)"]);
    for (date, (rev, pay)) in days {
        table.add_row(vec![Cell::new(date), right(rev), right(pay)]);
    }
    table
}

/// Revenue and order count per group, with each group's share of revenue.
pub fn group_table(dimension: &str, groups: &[GroupTotal]) -> Table {
    let total: rust_decimal::Decimal = groups.iter().map(|g| g.revenue).sum();
    let mut table = base_table(&[dimension, "Revenue", "Orders", "Share"]);
    for group in groups {
        let share = if total.is_zero() {
            rust_decimal::Decimal::ZERO
        } else {
            group.revenue / total
        };
        table.add_row(vec![
            Cell::new(&group.label),
            right(rupees(group.revenue)),
            right(group.orders),
            right(fraction_as_percent(share)),
        ]);
    }
    table
}

pub fn influencer_table(rows: &[InfluencerSummary]) -> Table {
    let mut table = base_table(&["Influencer", "Revenue", "Orders", "Payout", "ROAS", "Perf. Records"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.influencer_id),
            right(rupees(row.revenue)),
            right(row.orders),
            right(rupees(row.payout)),
            right(multiple(row.roas)),
            right(row.performance_records),
        ]);
    }
    table
}

pub fn options_table(options: &FilterOptions) -> Table {
    let mut table = base_table(&["Filter", "Available values"]);
    table.add_row(vec![
        Cell::new("Date range"),
        Cell::new(format!("{} to {}", options.min_date, options.max_date)),
    ]);
    for (name, values) in [
        ("Brand", &options.brands),
        ("Product", &options.products),
        ("Platform", &options.platforms),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(values.join(", "))]);
    }
    table
}
