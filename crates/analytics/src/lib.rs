//! # Campaign Insights Analytics
//!
//! This crate turns filtered orders and payments into the marketing and finance
//! figures shown on the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of files or configuration. It depends
//!   only on `core-types`.
//! - **Stateless Calculation:** The `KpiCalculator` takes filtered rows as input and
//!   produces a `KpiSet` as output. It is total: empty inputs and zero denominators
//!   yield zeros, never errors.
//!
//! ## Public API
//!
//! - `KpiCalculator`: Computes the twelve headline KPIs.
//! - `KpiSet`: The fixed-shape record holding those KPIs.
//! - `breakdown`: Grouped totals and trends behind the overview, product & brand, and
//!   influencer views.

// Declare the modules that constitute this crate.
pub mod breakdown;
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use breakdown::{Dimension, GroupTotal, InfluencerSummary, TrendPoint};
pub use engine::{KpiCalculator, PROFIT_MARGIN_FACTOR, calculate_kpis};
pub use report::KpiSet;
