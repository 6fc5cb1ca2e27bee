use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterInputError {
    #[error("The start date ({start}) is after the end date ({end}).")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("No orders are loaded, so no filter options can be offered.")]
    NoOrders,
}
