use crate::error::ExportError;
use core_types::{Dataset, TableKind};
use std::io::Write;
use std::path::Path;

/// Writes one table of `dataset` as CSV: the source header row, then every row verbatim.
pub fn write_table<W: Write>(dataset: &Dataset, kind: TableKind, writer: W) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(dataset.headers(kind))?;

    let rows = dataset.raw_rows(kind);
    for row in &rows {
        writer.write_record(*row)?;
    }
    writer.flush()?;

    Ok(rows.len())
}

/// Serializes one table to an in-memory UTF-8 CSV document, ready for download.
pub fn table_to_csv(dataset: &Dataset, kind: TableKind) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_table(dataset, kind, &mut buffer)?;
    Ok(buffer)
}

/// Writes one table to a CSV file at `path`, returning the number of data rows written.
pub fn export_table(dataset: &Dataset, kind: TableKind, path: &Path) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let written = write_table(dataset, kind, file)?;
    tracing::info!(table = %kind, rows = written, path = %path.display(), "Exported table.");
    Ok(written)
}
