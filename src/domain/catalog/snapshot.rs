// ============================================================
// SNAPSHOTS AND CHANGE RECORDS
// ============================================================
// Before/after entity state and the classification joining them

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::{FieldKind, ParsedAttributesField, ParsedField};

/// One data line of an export: F "before" cells then F "after" cells
pub type RawRow = Vec<String>;

/// State of one catalog entry at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    pub location: String,
    pub category: String,
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_attributes: Option<String>,

    pub location_parsed: ParsedField,
    pub category_parsed: ParsedField,
    pub product_parsed: ParsedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_parsed: Option<ParsedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_parsed: Option<ParsedAttributesField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_attributes_parsed: Option<ParsedAttributesField>,
}

impl EntitySnapshot {
    /// Raw cell for a tracked field, `None` when the export lacks the column
    pub fn value(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Location => Some(&self.location),
            FieldKind::Category => Some(&self.category),
            FieldKind::Product => Some(&self.product),
            FieldKind::Price => self.price.as_deref(),
            FieldKind::Attributes => self.attributes.as_deref(),
            FieldKind::SubAttributes => self.sub_attributes.as_deref(),
        }
    }

    /// Store a raw cell and parse it eagerly
    pub fn set(&mut self, kind: FieldKind, raw: &str) {
        match kind {
            FieldKind::Location => {
                self.location = raw.to_string();
                self.location_parsed = ParsedField::parse(raw);
            }
            FieldKind::Category => {
                self.category = raw.to_string();
                self.category_parsed = ParsedField::parse(raw);
            }
            FieldKind::Product => {
                self.product = raw.to_string();
                self.product_parsed = ParsedField::parse(raw);
            }
            FieldKind::Price => {
                self.price = Some(raw.to_string());
                self.price_parsed = Some(ParsedField::parse(raw));
            }
            FieldKind::Attributes => {
                self.attributes = Some(raw.to_string());
                self.attributes_parsed = Some(ParsedAttributesField::parse(raw));
            }
            FieldKind::SubAttributes => {
                self.sub_attributes = Some(raw.to_string());
                self.sub_attributes_parsed = Some(ParsedAttributesField::parse(raw));
            }
        }
    }

    /// Missing or whitespace-only cell
    pub fn is_blank(&self, kind: FieldKind) -> bool {
        self.value(kind).map_or(true, |value| value.trim().is_empty())
    }
}

/// Row classification, assigned once and never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Moved,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::Modified => "modified",
            ChangeType::Moved => "moved",
        };
        write!(f, "{}", name)
    }
}

/// Catalog metadata returned by the lookup service for one item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemInfo {
    #[serde(rename = "itemId")]
    pub item_id: String,

    /// Everything else the service returned, sorted by key
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

impl MenuItemInfo {
    /// JSON key the identifier is written under
    pub const ID_KEY: &'static str = "itemId";

    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            details: BTreeMap::new(),
        }
    }

    /// `itemId` is reserved for the identifier and is ignored here
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != Self::ID_KEY {
            self.details.insert(key, value.into());
        }
        self
    }
}

/// A before/after pair with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub before: EntitySnapshot,
    pub after: EntitySnapshot,
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item_info: Option<MenuItemInfo>,
}

impl ChangeRecord {
    pub fn new(before: EntitySnapshot, after: EntitySnapshot, change_type: ChangeType) -> Self {
        Self {
            before,
            after,
            change_type,
            menu_item_info: None,
        }
    }

    /// Only added and modified entries are looked up in the catalog
    pub fn wants_enrichment(&self) -> bool {
        matches!(self.change_type, ChangeType::Added | ChangeType::Modified)
    }
}
