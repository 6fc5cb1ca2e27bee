pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{MISSING_TOKENS, ORGANIC_LABEL, TableKind, is_missing, normalize_optional, platform_label};
pub use error::CoreError;
pub use structs::{Dataset, Order, Payment, PerformanceRecord, Record, Table};
