use crate::error::DataLoadError;
use crate::{io_error, load_all_data};
use configuration::DataPaths;
use core_types::{Dataset, TableKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

/// Identifies one version of a source file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceStamp {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

/// Session-wide memoization of the loaded source tables.
///
/// A load is reused as long as every source file still has the same path, modification
/// time and size. Consumers receive a shared, read-only handle to the dataset.
#[derive(Debug)]
pub struct DataCache {
    paths: DataPaths,
    entry: Option<(Vec<SourceStamp>, Arc<Dataset>)>,
    loads: usize,
}

impl DataCache {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            entry: None,
            loads: 0,
        }
    }

    /// Returns the cached dataset, reading from disk only if nothing is cached yet or a
    /// source file changed since the last load.
    pub fn get_or_load(&mut self) -> Result<Arc<Dataset>, DataLoadError> {
        let stamps = self.stamps()?;

        if let Some((cached_stamps, dataset)) = &self.entry {
            if *cached_stamps == stamps {
                tracing::debug!("Source data served from cache.");
                return Ok(Arc::clone(dataset));
            }
            tracing::info!("Source files changed on disk; reloading.");
        }

        let dataset = Arc::new(load_all_data(&self.paths)?);
        self.loads += 1;
        self.entry = Some((stamps, Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drops the cached dataset so the next `get_or_load` reads from disk.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("Source data cache invalidated.");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.entry.is_some()
    }

    /// How many times the sources have actually been read from disk.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn stamps(&self) -> Result<Vec<SourceStamp>, DataLoadError> {
        [
            (TableKind::Performance, &self.paths.performance_path),
            (TableKind::Orders, &self.paths.orders_path),
            (TableKind::Payments, &self.paths.payment_log_path),
        ]
        .into_iter()
        .map(|(table, path)| -> Result<SourceStamp, DataLoadError> {
            let metadata = std::fs::metadata(path).map_err(|e| io_error(table, path, e))?;
            Ok(SourceStamp {
                path: path.clone(),
                modified: metadata.modified().ok(),
                len: metadata.len(),
            })
        })
        .collect()
    }
}
