use crate::error::FilterInputError;
use chrono::NaiveDate;
use core_types::{ORGANIC_LABEL, Order, Table, platform_label};
use serde::Serialize;
use std::collections::BTreeSet;

/// A complete set of filter choices.
///
/// `platforms` uses platform names as they appear in the data, plus `ORGANIC_LABEL` to
/// select orders with no platform. An empty set on any dimension selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub brands: BTreeSet<String>,
    pub products: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
}

impl FilterSelection {
    /// A selection over the given date range with every categorical set empty.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            brands: BTreeSet::new(),
            products: BTreeSet::new(),
            platforms: BTreeSet::new(),
        }
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = products.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    /// Whether orders without a platform are part of the selection.
    pub fn includes_organic(&self) -> bool {
        self.platforms.contains(ORGANIC_LABEL)
    }

    /// Rejects selections the filter engine cannot meaningfully apply.
    pub fn validate(&self) -> Result<(), FilterInputError> {
        if self.start_date > self.end_date {
            return Err(FilterInputError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

/// The choices available for each filter, derived from the loaded orders.
///
/// Values keep the order in which they first appear in the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub brands: Vec<String>,
    pub products: Vec<String>,
    /// Platform names, with organic orders listed as `ORGANIC_LABEL`.
    pub platforms: Vec<String>,
}

impl FilterOptions {
    pub fn from_orders(orders: &Table<Order>) -> Result<Self, FilterInputError> {
        let mut dates = orders.iter().map(|o| o.order_date.date());
        let first = dates.next().ok_or(FilterInputError::NoOrders)?;
        let (min_date, max_date) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        Ok(Self {
            min_date,
            max_date,
            brands: distinct(orders.iter().map(|o| o.brand.as_str())),
            products: distinct(orders.iter().map(|o| o.product.as_str())),
            platforms: distinct(orders.iter().map(|o| platform_label(o.platform.as_deref()))),
        })
    }

    /// The default selection: the full date range and every option on every dimension.
    pub fn select_all(&self) -> FilterSelection {
        FilterSelection::new(self.min_date, self.max_date)
            .with_brands(self.brands.iter().cloned())
            .with_products(self.products.iter().cloned())
            .with_platforms(self.platforms.iter().cloned())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
