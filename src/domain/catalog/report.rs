// ============================================================
// DIFF REPORT
// ============================================================
// Four-bucket report with summary counts

use serde::{Deserialize, Serialize};

use super::ChangeRecord;
use crate::domain::error::Result;

/// Record counts per bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub moved: usize,
}

/// Records partitioned by change type, each in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportChanges {
    pub added: Vec<ChangeRecord>,
    pub removed: Vec<ChangeRecord>,
    pub modified: Vec<ChangeRecord>,
    pub moved: Vec<ChangeRecord>,
}

impl ReportChanges {
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len() + self.moved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    pub summary: ReportSummary,
    pub changes: ReportChanges,
}

impl DiffReport {
    /// Pretty JSON. Key order follows field declaration order, so equal
    /// reports always serialize to identical bytes.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
