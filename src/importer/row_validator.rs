// ==========================================
// Tire registry - row validator
// ==========================================
// Pure per-row validation against the reference snapshot.
// No I/O: the caller owns the seen-codes set and the insert.
// ==========================================
// Check order: code → brand → size → tread design → supplier
// Every failing check is collected, not just the first
// ==========================================

use crate::config::ImportSettings;
use crate::domain::fields::CanonicalField;
use crate::domain::import::ImportRow;
use crate::domain::reference::ReferenceSnapshot;
use crate::domain::tire::NewTire;
use crate::i18n;
use crate::importer::column_map::ColumnMap;
use crate::importer::data_cleaner::DataCleaner;
use chrono::NaiveDate;
use std::collections::HashSet;

// ==========================================
// RowIssue - one reason for rejecting a row
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    CodeMissing,
    DuplicateCode,
    BrandMissing,
    BrandInvalid(String),
    SizeMissing,
    SizeInvalid(String),
    TreadDesignMissing,
    TreadDesignInvalid(String),
    SupplierMissing,
    SupplierNotFound(String),
}

impl RowIssue {
    pub fn message(&self, locale: &str) -> String {
        let with_value =
            |key: &str, value: &str| i18n::t_with_args(key, locale, &[("value", value)]);

        match self {
            RowIssue::CodeMissing => i18n::t("import.row.code_missing", locale),
            RowIssue::DuplicateCode => i18n::t("import.row.duplicate_code", locale),
            RowIssue::BrandMissing => i18n::t("import.row.brand_missing", locale),
            RowIssue::BrandInvalid(v) => with_value("import.row.brand_invalid", v),
            RowIssue::SizeMissing => i18n::t("import.row.size_missing", locale),
            RowIssue::SizeInvalid(v) => with_value("import.row.size_invalid", v),
            RowIssue::TreadDesignMissing => i18n::t("import.row.tread_design_missing", locale),
            RowIssue::TreadDesignInvalid(v) => with_value("import.row.tread_design_invalid", v),
            RowIssue::SupplierMissing => i18n::t("import.row.supplier_missing", locale),
            RowIssue::SupplierNotFound(v) => with_value("import.row.supplier_not_found", v),
        }
    }
}

/// All issue messages of a row joined by single spaces
pub fn combined_message(issues: &[RowIssue], locale: &str) -> String {
    issues
        .iter()
        .map(|issue| issue.message(locale))
        .collect::<Vec<_>>()
        .join(" ")
}

// ==========================================
// RowValidation - tagged validation result
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RowValidation {
    Valid(NewTire),
    Invalid {
        /// Trimmed code, empty when the row had none
        code: String,
        issues: Vec<RowIssue>,
    },
}

// ==========================================
// RowValidator
// ==========================================
pub struct RowValidator<'a> {
    column_map: &'a ColumnMap,
    references: &'a ReferenceSnapshot,
    settings: &'a ImportSettings,
    /// Registration date used when the row carries none
    today: NaiveDate,
    cleaner: DataCleaner,
}

impl<'a> RowValidator<'a> {
    pub fn new(
        column_map: &'a ColumnMap,
        references: &'a ReferenceSnapshot,
        settings: &'a ImportSettings,
        today: NaiveDate,
    ) -> Self {
        Self {
            column_map,
            references,
            settings,
            today,
            cleaner: DataCleaner,
        }
    }

    /// Validate one row and build its insert payload
    ///
    /// # Arguments
    /// - row: decoded data row
    /// - known_codes: registry codes plus codes inserted earlier in this batch
    pub fn validate(&self, row: &ImportRow, known_codes: &HashSet<String>) -> RowValidation {
        let mut issues = Vec::new();
        let limits = &self.settings.limits;

        // ===== Code =====
        let code = self.text(row, CanonicalField::Code).unwrap_or_default();
        if code.is_empty() {
            issues.push(RowIssue::CodeMissing);
        } else if known_codes.contains(&code) {
            issues.push(RowIssue::DuplicateCode);
        }

        // ===== Brand (case-insensitive) =====
        let brand = self.text(row, CanonicalField::Brand).unwrap_or_default();
        let brand_id = self.lookup(
            &brand,
            &mut issues,
            RowIssue::BrandMissing,
            RowIssue::BrandInvalid,
            |v| self.references.brand_id(v),
        );

        // ===== Size (capped before lookup) =====
        let size = self
            .text(row, CanonicalField::Size)
            .map(|s| self.cleaner.cap(&s, limits.size))
            .unwrap_or_default();
        let size_id = self.lookup(
            &size,
            &mut issues,
            RowIssue::SizeMissing,
            RowIssue::SizeInvalid,
            |v| self.references.size_id(v),
        );

        // ===== Tread design =====
        let tread_design = self
            .text(row, CanonicalField::TreadDesign)
            .unwrap_or_default();
        let tread_design_id = self.lookup(
            &tread_design,
            &mut issues,
            RowIssue::TreadDesignMissing,
            RowIssue::TreadDesignInvalid,
            |v| self.references.tread_design_id(v),
        );

        // ===== Supplier (code → display name) =====
        let supplier_code = self.text(row, CanonicalField::Supplier).unwrap_or_default();
        let supplier_name = self.lookup(
            &supplier_code,
            &mut issues,
            RowIssue::SupplierMissing,
            RowIssue::SupplierNotFound,
            |v| self.references.supplier_name(v).map(str::to_string),
        );

        let (Some(brand_id), Some(size_id), Some(tread_design_id), Some(supplier_name), true) = (
            brand_id,
            size_id,
            tread_design_id,
            supplier_name,
            issues.is_empty(),
        ) else {
            return RowValidation::Invalid { code, issues };
        };

        let cell = |field| self.column_map.cell(row, field);

        RowValidation::Valid(NewTire {
            code,
            brand,
            size,
            tread_design,
            brand_id,
            size_id,
            tread_design_id,
            remaining_tread: self.cleaner.number_or_zero(cell(CanonicalField::RemainingTread)),
            ply_rating: self.cleaner.optional_text(cell(CanonicalField::PlyRating)),
            load_index: self.cleaner.optional_text(cell(CanonicalField::LoadIndex)),
            speed_rating: self.cleaner.optional_text(cell(CanonicalField::SpeedRating)),
            manufacture_date_code: self.cleaner.capped_text(
                cell(CanonicalField::ManufactureDateCode),
                limits.manufacture_date_code,
            ),
            request_ref: self
                .cleaner
                .capped_text(cell(CanonicalField::RequestRef), limits.request_ref),
            order_ref: self
                .cleaner
                .capped_text(cell(CanonicalField::OrderRef), limits.order_ref),
            project: self
                .cleaner
                .capped_text(cell(CanonicalField::Project), limits.project),
            cost: self.cleaner.number_or_zero(cell(CanonicalField::Cost)),
            supplier_name,
            registration_date: self
                .cleaner
                .date(cell(CanonicalField::RegistrationDate))
                .unwrap_or(self.today),
            purchase_date: self.cleaner.date(cell(CanonicalField::PurchaseDate)),
        })
    }

    /// Trimmed text of a mapped field; None when the column is absent
    fn text(&self, row: &ImportRow, field: CanonicalField) -> Option<String> {
        self.cleaner.optional_text(self.column_map.cell(row, field))
    }

    /// Empty → `missing`; no match → `invalid(value)`; otherwise the resolved value
    fn lookup<T, F>(
        &self,
        value: &str,
        issues: &mut Vec<RowIssue>,
        missing: RowIssue,
        invalid: fn(String) -> RowIssue,
        resolve: F,
    ) -> Option<T>
    where
        F: FnOnce(&str) -> Option<T>,
    {
        if value.is_empty() {
            issues.push(missing);
            return None;
        }
        let resolved = resolve(value);
        if resolved.is_none() {
            issues.push(invalid(value.to_string()));
        }
        resolved
    }
}
