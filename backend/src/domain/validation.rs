//! Stateless checks applied before any write.
//!
//! These functions never touch the store; the services compose them in the
//! order each operation requires.

use chrono::NaiveDate;

use super::errors::{DomainError, DomainResult};

/// Number of digits in a tax ID
pub const TAX_ID_DIGITS: usize = 14;

/// Keep only the ASCII digits of `raw`
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Fail with the first field whose trimmed value is empty.
///
/// Fields are `(label, value)` pairs; the label ends up in the error.
pub fn require_all_non_empty(fields: &[(&'static str, &str)]) -> DomainResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(DomainError::MissingField { field }),
        None => Ok(()),
    }
}

/// Parse the three container dimensions, in meters.
///
/// Zero and negative values pass; anything that is not a finite number fails.
pub fn parse_dimensions(height: &str, width: &str, length: &str) -> DomainResult<(f64, f64, f64)> {
    Ok((
        parse_dimension("Height", height)?,
        parse_dimension("Width", width)?,
        parse_dimension("Length", length)?,
    ))
}

fn parse_dimension(field: &'static str, raw: &str) -> DomainResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DomainError::InvalidNumber { field }),
    }
}

/// Strip separators and return the 14 digit form of a tax ID
pub fn validate_tax_id(raw: &str) -> DomainResult<String> {
    let digits = digits_only(raw);
    if digits.len() == TAX_ID_DIGITS {
        Ok(digits)
    } else {
        Err(DomainError::InvalidFormat)
    }
}

/// Strict `DD/MM/YYYY` parse.
///
/// Day and month take one or two digits, the year exactly four. Anything else,
/// including dates that do not exist on the calendar, yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let day = numeric_part(day, 1..=2)?;
    let month = numeric_part(month, 1..=2)?;
    let year = numeric_part(year, 4..=4)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn numeric_part(part: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// True when `date` is `today` or later
pub fn date_not_in_past(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}
