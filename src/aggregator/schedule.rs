//! Fetch scheduling policy.
//!
//! This module decides, from the target year and the current date, which
//! months get a regular-paycheck fetch and which 13º-salário installments
//! are due. Both functions are pure so the policy can be tested without a
//! clock or a network.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::error::{ServiceError, ServiceResult};
use crate::models::DocumentKind;

/// Years below this bound cannot form a valid six-digit `vigencia` key.
const MIN_YEAR: i32 = 1000;

/// Determines the month range to fetch for a target year.
///
/// - A past year covers all twelve months.
/// - The current year covers months `1..=today's month`.
/// - A future year, or a year with fewer than four digits, is rejected
///   with [`ServiceError::InvalidYear`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stv_paydocs::aggregator::months_to_fetch;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// assert_eq!(months_to_fetch(2025, today).unwrap(), 1..=6);
/// assert_eq!(months_to_fetch(2024, today).unwrap(), 1..=12);
/// assert!(months_to_fetch(2026, today).is_err());
/// ```
pub fn months_to_fetch(year: i32, today: NaiveDate) -> ServiceResult<RangeInclusive<u32>> {
    let current_year = today.year();
    if year > current_year || year < MIN_YEAR {
        return Err(ServiceError::InvalidYear { year, current_year });
    }
    if year == current_year {
        Ok(1..=today.month())
    } else {
        Ok(1..=12)
    }
}

/// Determines which 13º-salário installments are due for a target year.
///
/// For a past year both installments are always fetched. For the current
/// year the first installment becomes due in November and the second in
/// December. A future year has none due.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stv_paydocs::aggregator::bonus_installments_due;
/// use stv_paydocs::models::DocumentKind;
///
/// let november = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
/// assert_eq!(
///     bonus_installments_due(2025, november),
///     vec![DocumentKind::BonusFirst]
/// );
/// ```
pub fn bonus_installments_due(year: i32, today: NaiveDate) -> Vec<DocumentKind> {
    let current_year = today.year();
    if year < current_year {
        return vec![DocumentKind::BonusFirst, DocumentKind::BonusSecond];
    }
    if year > current_year {
        return Vec::new();
    }

    let mut due = Vec::new();
    if today.month() >= 11 {
        due.push(DocumentKind::BonusFirst);
    }
    if today.month() >= 12 {
        due.push(DocumentKind::BonusSecond);
    }
    due
}
