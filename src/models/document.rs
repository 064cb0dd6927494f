//! Payroll document models.
//!
//! This module contains the [`DocumentKind`] and [`PayrollDocument`] types
//! representing the retrievable payroll artifacts of the STV portal.

use serde::{Deserialize, Serialize};

use super::period::Period;

/// The category of a payroll document.
///
/// Each kind maps to its own endpoint on the remote payroll service and
/// carries its own period rules: regular and vacation paychecks are keyed to
/// the month they cover, while the two 13º-salário installments are always
/// keyed to fixed period months (November and December respectively).
///
/// # Example
///
/// ```
/// use stv_paydocs::models::DocumentKind;
///
/// assert_eq!(DocumentKind::Regular.endpoint(), "folha_pagamento_html.php");
/// assert_eq!(DocumentKind::BonusFirst.fixed_month(), Some(11));
/// assert_eq!(DocumentKind::Vacation.slug(), "ferias");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// The regular monthly paycheck.
    Regular,
    /// The vacation paycheck, present only for months with vacations.
    Vacation,
    /// The first 13º-salário installment, keyed to period month 11.
    BonusFirst,
    /// The second 13º-salário installment, keyed to period month 12.
    BonusSecond,
}

impl DocumentKind {
    /// Returns the remote payroll service endpoint serving this kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            DocumentKind::Regular => "folha_pagamento_html.php",
            DocumentKind::Vacation => "folha_pagamento_ferias_html.php",
            DocumentKind::BonusFirst => "folha_pagamento13_1_html.php",
            DocumentKind::BonusSecond => "folha_pagamento13_2_html.php",
        }
    }

    /// Returns the short identifier slug used in document ids.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Regular => "normal",
            DocumentKind::Vacation => "ferias",
            DocumentKind::BonusFirst => "13_1",
            DocumentKind::BonusSecond => "13_2",
        }
    }

    /// Returns the fixed period month for kinds that are not tied to the
    /// month being browsed (`Some(11)` / `Some(12)` for the 13º-salário
    /// installments, `None` otherwise).
    pub fn fixed_month(&self) -> Option<u32> {
        match self {
            DocumentKind::BonusFirst => Some(11),
            DocumentKind::BonusSecond => Some(12),
            DocumentKind::Regular | DocumentKind::Vacation => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// One retrievable payroll artifact.
///
/// A `PayrollDocument` is built only from a successful remote fetch; its
/// `content` is the opaque HTML payload returned by the service and is never
/// parsed. The `id` is deterministic for a given (year, month, kind) triple,
/// so refreshing the same year against an unchanged backend always yields the
/// same ids.
///
/// # Example
///
/// ```
/// use stv_paydocs::models::{DocumentKind, PayrollDocument, Period};
///
/// let doc = PayrollDocument::new(
///     DocumentKind::Regular,
///     Period::new(2025, 1),
///     "<html>...</html>".to_string(),
/// );
/// assert_eq!(doc.id, "2025-01-normal");
/// assert_eq!(doc.period_label, "Janeiro");
/// assert_eq!(doc.month, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDocument {
    /// Deterministic identifier, unique within a collection:
    /// `"{year}-{month:02}-{slug}"`.
    pub id: String,
    /// Human-readable label for the period this document covers.
    pub period_label: String,
    /// The calendar year the document covers.
    pub year: i32,
    /// The month the document covers; `None` for the 13º-salário
    /// installments, which are annual.
    pub month: Option<u32>,
    /// The document category.
    pub kind: DocumentKind,
    /// Opaque HTML payload returned by the remote service.
    pub content: String,
}

impl PayrollDocument {
    /// Builds a document from a successful fetch.
    ///
    /// For the 13º-salário installments the id embeds the installment's
    /// fixed period month (11 or 12) and the `month` field is `None`.
    pub fn new(kind: DocumentKind, period: Period, content: String) -> Self {
        let id_month = kind.fixed_month().unwrap_or(period.month);
        Self {
            id: format!("{:04}-{:02}-{}", period.year, id_month, kind.slug()),
            period_label: Self::label(kind, period),
            year: period.year,
            month: match kind {
                DocumentKind::Regular | DocumentKind::Vacation => Some(period.month),
                DocumentKind::BonusFirst | DocumentKind::BonusSecond => None,
            },
            kind,
            content,
        }
    }

    /// Derives the display label for a (kind, period) pair.
    fn label(kind: DocumentKind, period: Period) -> String {
        match kind {
            DocumentKind::Regular => period.month_name().to_string(),
            DocumentKind::Vacation => format!("Férias - {}", period.month_name()),
            DocumentKind::BonusFirst => "13º Salário - 1ª Parcela".to_string(),
            DocumentKind::BonusSecond => "13º Salário - 2ª Parcela".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(kind: DocumentKind, year: i32, month: u32) -> PayrollDocument {
        PayrollDocument::new(kind, Period::new(year, month), "<html/>".to_string())
    }

    #[test]
    fn test_regular_document_id_and_label() {
        let d = doc(DocumentKind::Regular, 2025, 1);
        assert_eq!(d.id, "2025-01-normal");
        assert_eq!(d.period_label, "Janeiro");
        assert_eq!(d.year, 2025);
        assert_eq!(d.month, Some(1));
    }

    #[test]
    fn test_vacation_document_label_includes_month() {
        let d = doc(DocumentKind::Vacation, 2024, 6);
        assert_eq!(d.id, "2024-06-ferias");
        assert_eq!(d.period_label, "Férias - Junho");
        assert_eq!(d.month, Some(6));
    }

    #[test]
    fn test_bonus_ids_use_fixed_months() {
        let first = doc(DocumentKind::BonusFirst, 2024, 11);
        assert_eq!(first.id, "2024-11-13_1");
        assert_eq!(first.period_label, "13º Salário - 1ª Parcela");
        assert_eq!(first.month, None);

        let second = doc(DocumentKind::BonusSecond, 2024, 12);
        assert_eq!(second.id, "2024-12-13_2");
        assert_eq!(second.period_label, "13º Salário - 2ª Parcela");
        assert_eq!(second.month, None);
    }

    #[test]
    fn test_ids_are_unique_across_kinds_for_same_period() {
        let ids = [
            doc(DocumentKind::Regular, 2024, 11).id,
            doc(DocumentKind::Vacation, 2024, 11).id,
            doc(DocumentKind::BonusFirst, 2024, 11).id,
            doc(DocumentKind::BonusSecond, 2024, 12).id,
        ];
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_kind_endpoints() {
        assert_eq!(DocumentKind::Regular.endpoint(), "folha_pagamento_html.php");
        assert_eq!(
            DocumentKind::Vacation.endpoint(),
            "folha_pagamento_ferias_html.php"
        );
        assert_eq!(
            DocumentKind::BonusFirst.endpoint(),
            "folha_pagamento13_1_html.php"
        );
        assert_eq!(
            DocumentKind::BonusSecond.endpoint(),
            "folha_pagamento13_2_html.php"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DocumentKind::BonusFirst).unwrap(),
            "\"bonus_first\""
        );
    }

    #[test]
    fn test_document_serialization_roundtrip() {
        let d = doc(DocumentKind::Regular, 2025, 3);
        let json = serde_json::to_string(&d).unwrap();
        let back: PayrollDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
