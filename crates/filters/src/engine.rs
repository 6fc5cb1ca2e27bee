use crate::selection::FilterSelection;
use chrono::NaiveDate;
use core_types::{Dataset, ORGANIC_LABEL, Order, Record};

/// Platform membership for one order.
///
/// A named platform matches when it is selected by name. An organic order (no platform)
/// matches only when `ORGANIC_LABEL` is selected. The label itself never matches a
/// named platform value.
pub fn platform_matches(selection: &FilterSelection, platform: Option<&str>) -> bool {
    match platform {
        Some(name) => name != ORGANIC_LABEL && selection.platforms.contains(name),
        None => selection.includes_organic(),
    }
}

fn within(selection: &FilterSelection, date: NaiveDate) -> bool {
    selection.start_date <= date && date <= selection.end_date
}

/// Whether an order satisfies every predicate of the selection at once.
pub fn order_matches(selection: &FilterSelection, order: &Order) -> bool {
    within(selection, order.order_date.date())
        && selection.brands.contains(&order.brand)
        && selection.products.contains(&order.product)
        && platform_matches(selection, order.platform.as_deref())
}

/// Applies a selection to the loaded tables and returns independent filtered copies.
///
/// 1. Orders are kept when they match the date range, brand, product and platform.
/// 2. The influencers appearing in the kept orders form the join set.
/// 3. Performance records are kept when their influencer is in the join set.
/// 4. Payments are kept when they were invoiced within the date range and their
///    influencer is in the join set.
pub fn apply_filters(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    let orders = dataset.orders.select(|o| order_matches(selection, o));
    let influencers = orders.influencer_ids();

    let performance = dataset
        .performance
        .select(|p| influencers.contains(p.influencer_id()));
    let payments = dataset.payments.select(|p| {
        within(selection, p.invoice_date.date()) && influencers.contains(p.influencer_id())
    });

    tracing::debug!(
        start = %selection.start_date,
        end = %selection.end_date,
        brands = selection.brands.len(),
        products = selection.products.len(),
        platforms = ?selection.platforms,
        orders = orders.len(),
        influencers = influencers.len(),
        performance = performance.len(),
        payments = payments.len(),
        "Applied filters."
    );

    Dataset {
        performance,
        orders,
        payments,
    }
}
