//! # Campaign Insights Data Loader
//!
//! Reads the three source tables (influencer performance, enriched orders and the
//! payment log) from CSV into typed, immutable tables.
//!
//! ## Public API
//!
//! - `load_all_data`: Reads all three sources from the configured paths, uncached.
//! - `DataCache`: Memoizes `load_all_data` for the session, keyed by each source's path
//!   and modification stamp, with manual invalidation.
//! - `export_table` / `table_to_csv`: Serialize a (filtered) table back to CSV.
//! - `DataLoadError`: The fatal error raised when any source cannot be loaded.

pub mod cache;
pub mod error;
pub mod export;
pub mod reader;

pub use cache::DataCache;
pub use error::{DataLoadError, ExportError};
pub use export::{export_table, table_to_csv};
pub use reader::{read_orders, read_payments, read_performance};

use configuration::DataPaths;
use core_types::{Dataset, TableKind};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads performance, orders and payment log data from the configured paths.
///
/// Fails on the first source that is missing, unreadable or malformed; there is
/// no partial result.
pub fn load_all_data(paths: &DataPaths) -> Result<Dataset, DataLoadError> {
    let performance = read_performance(open_source(TableKind::Performance, &paths.performance_path)?)?;
    let orders = read_orders(open_source(TableKind::Orders, &paths.orders_path)?)?;
    let payments = read_payments(open_source(TableKind::Payments, &paths.payment_log_path)?)?;

    tracing::info!(
        performance_rows = performance.len(),
        order_rows = orders.len(),
        payment_rows = payments.len(),
        "Loaded source data."
    );

    Ok(Dataset {
        performance,
        orders,
        payments,
    })
}

fn open_source(table: TableKind, path: &Path) -> Result<BufReader<File>, DataLoadError> {
    tracing::debug!(%table, path = %path.display(), "Opening source file.");
    File::open(path).map(BufReader::new).map_err(|e| io_error(table, path, e))
}

pub(crate) fn io_error(table: TableKind, path: &Path, source: std::io::Error) -> DataLoadError {
    if source.kind() == std::io::ErrorKind::NotFound {
        DataLoadError::NotFound {
            table,
            path: path.to_path_buf(),
        }
    } else {
        DataLoadError::Io {
            table,
            path: path.to_path_buf(),
            source,
        }
    }
}
