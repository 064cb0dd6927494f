//! Pay period model.
//!
//! This module contains the [`Period`] type identifying the pay cycle a
//! payroll document covers, plus the Portuguese month-name lookup used to
//! build human-readable period labels.

use serde::{Deserialize, Serialize};

/// Portuguese month names, indexed by month number minus one.
///
/// Labels are kept in the portal's language because they are displayed
/// verbatim by the presentation layer.
const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Returns the Portuguese name of a month, or `None` for a month outside
/// the `1..=12` range.
///
/// # Example
///
/// ```
/// use stv_paydocs::models::month_name;
///
/// assert_eq!(month_name(1), Some("Janeiro"));
/// assert_eq!(month_name(12), Some("Dezembro"));
/// assert_eq!(month_name(13), None);
/// ```
pub fn month_name(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTH_NAMES[(month - 1) as usize])
    } else {
        None
    }
}

/// A year+month key identifying which pay cycle a document covers.
///
/// The remote payroll service keys every document request on a 6-digit
/// `YYYYMM` string (the "vigência"); [`Period::vigencia`] produces it.
///
/// # Example
///
/// ```
/// use stv_paydocs::models::Period;
///
/// let period = Period::new(2025, 6);
/// assert_eq!(period.vigencia(), "202506");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The calendar year of the pay cycle.
    pub year: i32,
    /// The month of the pay cycle (1..=12).
    pub month: u32,
}

impl Period {
    /// Creates a new period for the given year and month.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the 6-digit `YYYYMM` wire key for this period.
    ///
    /// The year is zero-padded to four digits and the month to two, matching
    /// the format the remote payroll service expects.
    pub fn vigencia(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Returns the Portuguese name of this period's month, or an empty
    /// string for an out-of-range month.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("")
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}
