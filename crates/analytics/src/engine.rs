use crate::report::KpiSet;
use core_types::{Order, Payment};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// The share of revenue kept as gross margin when no other factor is configured.
pub const PROFIT_MARGIN_FACTOR: Decimal = dec!(0.45);

/// A stateless calculator for deriving KPIs from filtered orders and payments.
#[derive(Debug, Clone)]
pub struct KpiCalculator {
    profit_margin_factor: Decimal,
}

impl Default for KpiCalculator {
    fn default() -> Self {
        Self::new(PROFIT_MARGIN_FACTOR)
    }
}

impl KpiCalculator {
    pub fn new(profit_margin_factor: Decimal) -> Self {
        Self { profit_margin_factor }
    }

    pub fn profit_margin_factor(&self) -> Decimal {
        self.profit_margin_factor
    }

    /// The main entry point for calculating KPIs.
    ///
    /// # Arguments
    ///
    /// * `orders` - The filtered orders.
    /// * `payments` - The filtered payment log.
    ///
    /// # Returns
    ///
    /// A fully populated `KpiSet`. Inputs are only read, so repeated calls with the same
    /// rows give the same result.
    pub fn calculate(&self, orders: &[Order], payments: &[Payment]) -> KpiSet {
        let mut report = KpiSet::new();

        self.calculate_revenue(orders, &mut report);
        self.calculate_counts(orders, &mut report);
        self.calculate_payout(payments, &mut report);
        self.calculate_ratios(&mut report);

        tracing::debug!(
            total_orders = report.total_orders,
            total_revenue = %report.total_revenue,
            total_payout = %report.total_payout,
            "Calculated KPIs."
        );

        report
    }

    /// Total revenue and its split into organic baseline and influencer-driven revenue.
    fn calculate_revenue(&self, orders: &[Order], report: &mut KpiSet) {
        report.total_revenue = orders.iter().map(|o| o.revenue_generated).sum();
        report.baseline_revenue = orders
            .iter()
            .filter(|o| o.is_organic())
            .map(|o| o.revenue_generated)
            .sum();
        report.influencer_driven_revenue = report.total_revenue - report.baseline_revenue;
    }

    fn calculate_counts(&self, orders: &[Order], report: &mut KpiSet) {
        report.total_orders = orders.len();
        report.organic_orders_count = orders.iter().filter(|o| o.is_organic()).count();
        report.influenced_orders_count = report.total_orders - report.organic_orders_count;
        report.num_campaigns = orders
            .iter()
            .filter_map(|o| o.campaign.as_deref())
            .collect::<HashSet<_>>()
            .len();
    }

    fn calculate_payout(&self, payments: &[Payment], report: &mut KpiSet) {
        report.total_payout = payments.iter().map(|p| p.payment_amount).sum();
        report.net_profit = report.total_revenue * self.profit_margin_factor - report.total_payout;
    }

    /// Ratios over payout and revenue. A non-positive denominator yields zero.
    fn calculate_ratios(&self, report: &mut KpiSet) {
        report.incremental_roas = ratio(report.influencer_driven_revenue, report.total_payout);
        report.roi = ratio(report.net_profit, report.total_payout) * Decimal::ONE_HUNDRED;
        report.overall_net_profit_percentage = ratio(report.net_profit, report.total_revenue);
    }
}

/// Computes KPIs with an explicit margin factor.
pub fn calculate_kpis(orders: &[Order], payments: &[Payment], profit_margin_factor: Decimal) -> KpiSet {
    KpiCalculator::new(profit_margin_factor).calculate(orders, payments)
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}
