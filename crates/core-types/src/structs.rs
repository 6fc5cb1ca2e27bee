use crate::enums::TableKind;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// Behaviour shared by every row type so tables can be joined and exported generically.
pub trait Record {
    /// The loose join key linking orders, performance records and payments.
    fn influencer_id(&self) -> &str;

    /// The row exactly as it appeared in the source file, one entry per header column.
    fn raw_fields(&self) -> &[String];
}

/// A single row of the enriched orders table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_date: NaiveDateTime,
    pub brand: String,
    pub product: String,
    /// `None` marks an organic order. Null and empty source cells both land here.
    pub platform: Option<String>,
    pub influencer_id: String,
    pub revenue_generated: Decimal,
    pub campaign: Option<String>,
    #[serde(skip)]
    pub raw: Vec<String>,
}

impl Order {
    pub fn is_organic(&self) -> bool {
        self.platform.is_none()
    }
}

/// A single row of the influencer performance table.
///
/// Only the join key is typed; every other column is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    pub influencer_id: String,
    #[serde(skip)]
    pub raw: Vec<String>,
}

/// A single row of the payment log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub invoice_date: NaiveDateTime,
    pub influencer_id: String,
    pub payment_amount: Decimal,
    #[serde(skip)]
    pub raw: Vec<String>,
}

impl Record for Order {
    fn influencer_id(&self) -> &str {
        &self.influencer_id
    }

    fn raw_fields(&self) -> &[String] {
        &self.raw
    }
}

impl Record for PerformanceRecord {
    fn influencer_id(&self) -> &str {
        &self.influencer_id
    }

    fn raw_fields(&self) -> &[String] {
        &self.raw
    }
}

impl Record for Payment {
    fn influencer_id(&self) -> &str {
        &self.influencer_id
    }

    fn raw_fields(&self) -> &[String] {
        &self.raw
    }
}

/// An in-memory table: the source header row plus typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    pub headers: Vec<String>,
    pub rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(headers: Vec<String>, rows: Vec<R>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Builds a new table with the same headers holding clones of the rows that match.
    pub fn select<F>(&self, mut predicate: F) -> Self
    where
        R: Clone,
        F: FnMut(&R) -> bool,
    {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }
}

impl<R: Record> Table<R> {
    /// The distinct influencer ids present in this table.
    pub fn influencer_ids(&self) -> HashSet<&str> {
        self.rows.iter().map(Record::influencer_id).collect()
    }
}

/// The three tables that make up one load (or one filtered view) of the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub performance: Table<PerformanceRecord>,
    pub orders: Table<Order>,
    pub payments: Table<Payment>,
}

impl Dataset {
    pub fn headers(&self, kind: TableKind) -> &[String] {
        match kind {
            TableKind::Performance => &self.performance.headers,
            TableKind::Orders => &self.orders.headers,
            TableKind::Payments => &self.payments.headers,
        }
    }

    /// The raw source rows of one table, in table order.
    pub fn raw_rows(&self, kind: TableKind) -> Vec<&[String]> {
        match kind {
            TableKind::Performance => self.performance.iter().map(Record::raw_fields).collect(),
            TableKind::Orders => self.orders.iter().map(Record::raw_fields).collect(),
            TableKind::Payments => self.payments.iter().map(Record::raw_fields).collect(),
        }
    }
}
