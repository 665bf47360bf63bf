// ============================================================
// REPORT ASSEMBLER
// ============================================================
// Partition classified records into the four report buckets

use crate::domain::catalog::{ChangeRecord, ChangeType, DiffReport, ReportChanges, ReportSummary};

/// Single stable pass; each bucket keeps its records' input order
pub fn assemble(records: Vec<ChangeRecord>) -> DiffReport {
    let mut changes = ReportChanges::default();

    for record in records {
        match record.change_type {
            ChangeType::Added => changes.added.push(record),
            ChangeType::Removed => changes.removed.push(record),
            ChangeType::Modified => changes.modified.push(record),
            ChangeType::Moved => changes.moved.push(record),
        }
    }

    let summary = ReportSummary {
        total: changes.len(),
        added: changes.added.len(),
        removed: changes.removed.len(),
        modified: changes.modified.len(),
        moved: changes.moved.len(),
    };

    DiffReport { summary, changes }
}
