use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The label used for orders that carry no platform attribution.
///
/// It only exists at the presentation and filter-selection boundary. Inside the
/// data model an organic order has `platform == None`.
pub const ORGANIC_LABEL: &str = "Organic";

/// Cell values that spreadsheet and dataframe exports write for a missing value.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell holds no value. Surrounding whitespace is ignored, so a
/// whitespace-only cell is missing too.
pub fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

/// Normalizes a raw cell into an optional, trimmed value.
///
/// Blank cells, whitespace-only cells and the `MISSING_TOKENS` are all absent. For the
/// platform column this means a cell of `"  "` or `NaN` marks an organic order.
pub fn normalize_optional(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

/// Returns the display label for a platform, mapping organic orders to `ORGANIC_LABEL`.
pub fn platform_label(platform: Option<&str>) -> &str {
    platform.unwrap_or(ORGANIC_LABEL)
}

/// Identifies one of the three source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Performance,
    Orders,
    Payments,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Performance => "performance",
            TableKind::Orders => "orders",
            TableKind::Payments => "payments",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "performance" => Ok(TableKind::Performance),
            "orders" => Ok(TableKind::Orders),
            "payments" | "payment_log" => Ok(TableKind::Payments),
            other => Err(CoreError::InvalidInput(
                "table".to_string(),
                format!("'{other}' is not one of performance, orders, payments"),
            )),
        }
    }
}
