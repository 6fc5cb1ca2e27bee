use crate::error::DataLoadError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::{Order, Payment, PerformanceRecord, Table, TableKind, is_missing, normalize_optional};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

pub const ORDER_DATE: &str = "order_date";
pub const BRAND: &str = "brand";
pub const PRODUCT: &str = "product";
pub const PLATFORM: &str = "platform";
pub const INFLUENCER_ID: &str = "influencer_id";
pub const REVENUE_GENERATED: &str = "revenue_generated";
pub const CAMPAIGN: &str = "campaign";
pub const INVOICE_DATE: &str = "invoice_date";
pub const PAYMENT_AMOUNT: &str = "payment_amount";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];
// Slash and dash layouts without a leading year are month-first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];

/// A parsed CSV source: its header row plus each data row padded to the header width.
struct RawSource {
    table: TableKind,
    headers: Vec<String>,
    rows: Vec<(u64, StringRecord)>,
}

impl RawSource {
    fn read<R: Read>(table: TableKind, reader: R) -> Result<Self, DataLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| DataLoadError::Csv { table, source })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|source| DataLoadError::Csv { table, source })?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            rows.push((line, record));
        }

        Ok(Self { table, headers, rows })
    }

    /// Resolves a required column to its index, case-insensitively.
    fn column(&self, name: &str) -> Result<usize, DataLoadError> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataLoadError::MissingColumn {
                table: self.table,
                column: name.to_string(),
            })
    }

    /// The source row as owned strings, exactly one per header column.
    fn raw_fields(&self, record: &StringRecord) -> Vec<String> {
        (0..self.headers.len())
            .map(|i| record.get(i).unwrap_or_default().to_string())
            .collect()
    }

    fn date(&self, record: &StringRecord, line: u64, idx: usize) -> Result<NaiveDateTime, DataLoadError> {
        let value = record.get(idx).unwrap_or_default();
        parse_datetime(value).ok_or_else(|| DataLoadError::InvalidDate {
            table: self.table,
            column: self.headers[idx].clone(),
            value: value.to_string(),
            line,
        })
    }

    fn amount(&self, record: &StringRecord, line: u64, idx: usize) -> Result<Decimal, DataLoadError> {
        let value = record.get(idx).unwrap_or_default();
        parse_amount(value).ok_or_else(|| DataLoadError::InvalidNumber {
            table: self.table,
            column: self.headers[idx].clone(),
            value: value.to_string(),
            line,
        })
    }
}

fn text(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().trim().to_string()
}

/// Parses a date or date-time cell. Bare dates land at midnight.
///
/// A timestamp carrying a UTC offset keeps its wall-clock time in that offset.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .or_else(|| {
                    OFFSET_DATETIME_FORMATS
                        .iter()
                        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
                })
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parses a monetary cell. A blank or missing-value cell (`NA`, `NaN`, ...) counts as
/// zero so that it drops out of sums.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    if is_missing(value) {
        return Some(Decimal::ZERO);
    }
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Reads the enriched orders table.
pub fn read_orders<R: Read>(reader: R) -> Result<Table<Order>, DataLoadError> {
    let source = RawSource::read(TableKind::Orders, reader)?;
    let order_date = source.column(ORDER_DATE)?;
    let brand = source.column(BRAND)?;
    let product = source.column(PRODUCT)?;
    let platform = source.column(PLATFORM)?;
    let influencer_id = source.column(INFLUENCER_ID)?;
    let revenue = source.column(REVENUE_GENERATED)?;
    let campaign = source.column(CAMPAIGN)?;

    let rows = source
        .rows
        .iter()
        .map(|(line, record)| -> Result<Order, DataLoadError> {
            Ok(Order {
                order_date: source.date(record, *line, order_date)?,
                brand: text(record, brand),
                product: text(record, product),
                platform: normalize_optional(record.get(platform).unwrap_or_default()),
                influencer_id: text(record, influencer_id),
                revenue_generated: source.amount(record, *line, revenue)?,
                campaign: normalize_optional(record.get(campaign).unwrap_or_default()),
                raw: source.raw_fields(record),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table::new(source.headers, rows))
}

/// Reads the influencer performance table. Only `influencer_id` is required.
pub fn read_performance<R: Read>(reader: R) -> Result<Table<PerformanceRecord>, DataLoadError> {
    let source = RawSource::read(TableKind::Performance, reader)?;
    let influencer_id = source.column(INFLUENCER_ID)?;

    let rows = source
        .rows
        .iter()
        .map(|(_, record)| PerformanceRecord {
            influencer_id: text(record, influencer_id),
            raw: source.raw_fields(record),
        })
        .collect();

    Ok(Table::new(source.headers, rows))
}

/// Reads the payment log.
pub fn read_payments<R: Read>(reader: R) -> Result<Table<Payment>, DataLoadError> {
    let source = RawSource::read(TableKind::Payments, reader)?;
    let invoice_date = source.column(INVOICE_DATE)?;
    let influencer_id = source.column(INFLUENCER_ID)?;
    let amount = source.column(PAYMENT_AMOUNT)?;

    let rows = source
        .rows
        .iter()
        .map(|(line, record)| -> Result<Payment, DataLoadError> {
            Ok(Payment {
                invoice_date: source.date(record, *line, invoice_date)?,
                influencer_id: text(record, influencer_id),
                payment_amount: source.amount(record, *line, amount)?,
                raw: source.raw_fields(record),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table::new(source.headers, rows))
}
