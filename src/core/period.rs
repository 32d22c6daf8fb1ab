use crate::domain::model::Period;
use crate::utils::error::{DigestError, Result};
use crate::utils::validation::validate_range;
use chrono::{Datelike, Local, NaiveDate};

/// The calendar month before the one containing `today`.
pub fn previous_month(today: NaiveDate) -> Period {
    if today.month() == 1 {
        Period::new(12, today.year() - 1)
    } else {
        Period::new(today.month() - 1, today.year())
    }
}

/// Resolve the digest period from explicit input, falling back to the
/// previous month when neither value is given. Month and year must be
/// supplied together.
pub fn resolve_period(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> Result<Period> {
    match (month, year) {
        (Some(month), Some(year)) => {
            validate_range("month", month, 1, 12)?;
            Ok(Period::new(month, year))
        }
        (None, None) => Ok(previous_month(today)),
        (Some(_), None) => Err(DigestError::ConfigValidationError {
            field: "year".to_string(),
            message: "--month was given without --year".to_string(),
        }),
        (None, Some(_)) => Err(DigestError::ConfigValidationError {
            field: "month".to_string(),
            message: "--year was given without --month".to_string(),
        }),
    }
}

pub fn resolve_period_now(month: Option<u32>, year: Option<i32>) -> Result<Period> {
    resolve_period(month, year, Local::now().date_naive())
}
