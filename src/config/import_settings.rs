// ==========================================
// Tire registry - import settings
// ==========================================
// Header matchers per canonical field + destination column limits
// ==========================================

use crate::domain::fields::{CanonicalField, FieldMatchers, HeaderMatcher};
use serde::{Deserialize, Serialize};

// ==========================================
// FieldLimits - destination column length caps (characters)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLimits {
    pub size: usize,
    pub request_ref: usize,
    pub order_ref: usize,
    pub project: usize,
    pub manufacture_date_code: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            size: 20,
            request_ref: 10,
            order_ref: 10,
            project: 100,
            manufacture_date_code: 4,
        }
    }
}

// ==========================================
// ImportSettings
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub column_matchers: Vec<FieldMatchers>,
    pub limits: FieldLimits,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            column_matchers: default_column_matchers(),
            limits: FieldLimits::default(),
        }
    }
}

impl ImportSettings {
    /// Matchers for one field (empty when the field is not configured)
    pub fn matchers_for(&self, field: CanonicalField) -> &[HeaderMatcher] {
        self.column_matchers
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.matchers.as_slice())
            .unwrap_or(&[])
    }
}

/// Recognized header variants of the registry spreadsheet.
///
/// Patterns are written in normalized form (uppercase, no accents).
/// PR / RQ / OC deliberately depart from plain substring matching and
/// only match a whole word: as raw substrings they would also hit
/// PROYECTO, PROVEEDOR, etc.
pub fn default_column_matchers() -> Vec<FieldMatchers> {
    use CanonicalField::*;
    use HeaderMatcher as M;

    vec![
        FieldMatchers::new(Code, vec![M::substring("CODIGO")]),
        FieldMatchers::new(Brand, vec![M::substring("MARCA")]),
        FieldMatchers::new(Size, vec![M::substring("MEDIDA")]),
        FieldMatchers::new(TreadDesign, vec![M::substring("DISENO")]),
        FieldMatchers::new(RemainingTread, vec![M::substring("REMANENTE")]),
        FieldMatchers::new(PlyRating, vec![M::word("PR")]),
        FieldMatchers::new(LoadIndex, vec![M::substring("CARGA")]),
        FieldMatchers::new(SpeedRating, vec![M::substring("VELOCIDAD")]),
        FieldMatchers::new(ManufactureDateCode, vec![M::substring("FECHA FABRICACION")]),
        FieldMatchers::new(RequestRef, vec![M::word("RQ")]),
        FieldMatchers::new(OrderRef, vec![M::word("OC")]),
        FieldMatchers::new(Project, vec![M::substring("PROYECTO")]),
        FieldMatchers::new(Cost, vec![M::substring("COSTO")]),
        FieldMatchers::new(Supplier, vec![M::substring("PROVEEDOR")]),
        FieldMatchers::new(PurchaseDate, vec![M::substring("FECHA COMPRA")]),
        FieldMatchers::new(
            RegistrationDate,
            vec![M::substring("FECHA ENVIO"), M::substring("FECHA REGISTRO")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_matchers() {
        let settings = ImportSettings::default();
        for field in CanonicalField::ALL {
            assert!(
                !settings.matchers_for(field).is_empty(),
                "no matcher configured for {}",
                field
            );
        }
    }

    #[test]
    fn test_short_code_matchers_are_whole_word() {
        let settings = ImportSettings::default();
        let matches = |field, header| {
            settings
                .matchers_for(field)
                .iter()
                .any(|m: &HeaderMatcher| m.matches(header))
        };

        assert!(matches(CanonicalField::PlyRating, "PR"));
        assert!(!matches(CanonicalField::PlyRating, "PROVEEDOR"));
        assert!(!matches(CanonicalField::PlyRating, "PROYECTO"));
        assert!(matches(CanonicalField::RequestRef, "NRO RQ"));
        assert!(!matches(CanonicalField::OrderRef, "CODIGO"));
        assert!(matches(CanonicalField::Cost, "COSTO UNITARIO"));
    }

    #[test]
    fn test_default_limits() {
        let limits = FieldLimits::default();
        assert_eq!(limits.size, 20);
        assert_eq!(limits.request_ref, 10);
        assert_eq!(limits.order_ref, 10);
        assert_eq!(limits.project, 100);
    }
}
