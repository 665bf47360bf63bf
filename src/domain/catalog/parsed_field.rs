// ============================================================
// PARSED IDENTIFIER FIELDS
// ============================================================
// Split composite "<id>: <name>" cells into structured parts

use serde::{Deserialize, Serialize};

/// A cell of the form `"<id>: <name>"` split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedField {
    pub id: String,
    pub name: String,

    /// Original cell, untrimmed
    pub raw: String,
}

impl ParsedField {
    /// Split on the first colon. Never fails.
    ///
    /// `"137: Cocktails - 379: Seasonal"` yields id `137` and name
    /// `Cocktails - 379: Seasonal`; a cell without a colon is all name.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self {
                id: String::new(),
                name: String::new(),
                raw: raw.to_string(),
            };
        }

        match trimmed.split_once(':') {
            Some((id, name)) => Self {
                id: id.trim().to_string(),
                name: name.trim().to_string(),
                raw: raw.to_string(),
            },
            None => Self {
                id: String::new(),
                name: trimmed.to_string(),
                raw: raw.to_string(),
            },
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// An attribute cell of the form
/// `"<type> - <category> - <id>: <name> | <extra>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAttributesField {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,

    /// Original cell including anything after `|`
    pub raw: String,
}

impl ParsedAttributesField {
    /// Truncate at the first `|`, then split on the last colon.
    ///
    /// The dash-separated prefix before that colon holds, from the right,
    /// the id, the category and (only with three or more tokens) the type.
    pub fn parse(raw: &str) -> Self {
        let segment = raw.split('|').next().unwrap_or_default().trim();

        let Some((prefix, name)) = segment.rsplit_once(':') else {
            return Self {
                name: segment.to_string(),
                raw: raw.to_string(),
                ..Default::default()
            };
        };

        let tokens: Vec<&str> = prefix
            .split('-')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        let id = tokens.last().copied().unwrap_or_default();
        let category = if tokens.len() >= 2 {
            tokens[tokens.len() - 2]
        } else {
            ""
        };
        let kind = if tokens.len() >= 3 { tokens[0] } else { "" };

        Self {
            id: id.to_string(),
            name: name.trim().to_string(),
            category: category.to_string(),
            kind: kind.to_string(),
            raw: raw.to_string(),
        }
    }
}
