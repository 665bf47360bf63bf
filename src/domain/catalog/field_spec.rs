// ============================================================
// FIELD SPECS
// ============================================================
// Column layouts of the supported snapshot exports

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked column of a snapshot export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Location,
    Category,
    Product,
    Price,
    Attributes,
    SubAttributes,
}

impl FieldKind {
    /// Location and category decide whether a row moved
    pub fn is_grouping(&self) -> bool {
        matches!(self, FieldKind::Location | FieldKind::Category)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Location => "location",
            FieldKind::Category => "category",
            FieldKind::Product => "product",
            FieldKind::Price => "price",
            FieldKind::Attributes => "attributes",
            FieldKind::SubAttributes => "sub-attributes",
        }
    }
}

/// Supported export shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    #[default]
    Product,
    Price,
    Attributes,
    SubAttributes,
}

impl ReportKind {
    pub fn field_spec(&self) -> FieldSpec {
        use FieldKind::*;

        let fields: &'static [FieldKind] = match self {
            ReportKind::Product => &[Location, Category, Product],
            ReportKind::Price => &[Location, Category, Product, Price],
            ReportKind::Attributes => &[Location, Category, Product, Attributes],
            ReportKind::SubAttributes => {
                &[Location, Category, Product, Attributes, SubAttributes]
            }
        };

        FieldSpec { fields }
    }

    /// Default cap on non-removed changes forwarded to enrichment
    pub fn default_sample_threshold(&self) -> usize {
        match self {
            ReportKind::Product | ReportKind::Price => 10,
            ReportKind::Attributes | ReportKind::SubAttributes => 15,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Product => "product",
            ReportKind::Price => "price",
            ReportKind::Attributes => "attributes",
            ReportKind::SubAttributes => "sub_attributes",
        };
        write!(f, "{}", name)
    }
}

/// Ordered list of the columns in one half of a row.
///
/// A row holds `width()` "before" cells followed by `width()` "after"
/// cells. Product is always the key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    fields: &'static [FieldKind],
}

impl FieldSpec {
    pub fn fields(&self) -> &'static [FieldKind] {
        self.fields
    }

    /// Number of tracked fields (F)
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Minimum cells a row needs to be considered
    pub fn row_width(&self) -> usize {
        self.fields.len() * 2
    }

    pub fn key_field(&self) -> FieldKind {
        FieldKind::Product
    }
}
