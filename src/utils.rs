//! Shared date helpers for the climate service
//!
//! Observation dates are stored as fixed-width `yyyy-mm-dd` text and compared
//! as strings throughout, so these helpers work on the text form only and
//! never go through a calendar type.

use std::sync::LazyLock;

use regex::Regex;

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date shape pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateFormatError {
    #[error("date '{0}' does not have year, month and day parts")]
    MissingParts(String),
    #[error("date '{0}' has a non-numeric year")]
    InvalidYear(String),
}

/// Subtract one year from a `yyyy-mm-dd` date by decrementing the year field
///
/// Month and day are copied through untouched, so the result is not
/// necessarily a real calendar date: `2016-02-29` becomes `2015-02-29`.
/// Range filters compare dates as strings, which tolerates that.
///
/// # Examples
///
/// ```
/// use climate_service::utils::newest_date_minus_year;
///
/// assert_eq!(newest_date_minus_year("2017-08-23").unwrap(), "2016-08-23");
/// assert_eq!(newest_date_minus_year("2016-02-29").unwrap(), "2015-02-29");
/// assert!(newest_date_minus_year("20170823").is_err());
/// ```
pub fn newest_date_minus_year(date: &str) -> Result<String, DateFormatError> {
    let mut parts = date.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DateFormatError::MissingParts(date.to_string()));
    };

    let year: i32 = year
        .parse()
        .map_err(|_| DateFormatError::InvalidYear(date.to_string()))?;

    Ok(format!("{}-{}-{}", year - 1, month, day))
}

/// Check that a value has the `dddd-dd-dd` shape used by stored dates
///
/// Only the shape is checked. `2015-02-29` passes even though it is not a
/// real day, because range queries treat dates as plain strings.
pub fn is_date_shaped(value: &str) -> bool {
    DATE_SHAPE.is_match(value)
}
