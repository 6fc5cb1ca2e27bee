//! # Campaign Insights Filter Engine
//!
//! Narrows the loaded tables down to a user's selection: an inclusive date range plus
//! brand, product and platform membership. Orders are filtered first; the influencers
//! appearing in the surviving orders then decide which performance records and
//! payments are kept.

pub mod engine;
pub mod error;
pub mod selection;

pub use engine::{apply_filters, order_matches, platform_matches};
pub use error::FilterInputError;
pub use selection::{FilterOptions, FilterSelection};
