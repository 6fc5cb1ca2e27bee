use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline KPIs for one filter selection.
///
/// This struct is the final output of the `KpiCalculator` and is what the
/// overview cards, the JSON output and the other views consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    // I. Revenue and Cost
    pub total_revenue: Decimal,
    pub total_payout: Decimal,
    pub net_profit: Decimal,

    // II. Attribution
    pub baseline_revenue: Decimal,
    pub influencer_driven_revenue: Decimal,

    // III. Ratios (zero whenever the denominator is not positive)
    pub incremental_roas: Decimal,
    /// Net profit over payout, as a percentage.
    pub roi: Decimal,
    /// Net profit over revenue, as a fraction.
    pub overall_net_profit_percentage: Decimal,

    // IV. Counts
    pub num_campaigns: usize,
    pub total_orders: usize,
    pub influenced_orders_count: usize,
    pub organic_orders_count: usize,
}

impl KpiSet {
    /// Creates a new, zeroed-out KpiSet.
    /// This is also the correct result for empty inputs.
    pub fn new() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            total_payout: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            baseline_revenue: Decimal::ZERO,
            influencer_driven_revenue: Decimal::ZERO,
            incremental_roas: Decimal::ZERO,
            roi: Decimal::ZERO,
            overall_net_profit_percentage: Decimal::ZERO,
            num_campaigns: 0,
            total_orders: 0,
            influenced_orders_count: 0,
            organic_orders_count: 0,
        }
    }
}

impl Default for KpiSet {
    fn default() -> Self {
        Self::new()
    }
}
