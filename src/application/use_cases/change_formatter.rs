// ============================================================
// CHANGE FORMATTER
// ============================================================
// Human-readable lines for console and notification output

use super::change_classifier::differing_fields;
use crate::domain::catalog::{ChangeRecord, ChangeType, DiffReport, EntitySnapshot, FieldKind};

/// Render one record. Never fails.
pub fn format_change(record: &ChangeRecord) -> String {
    match record.change_type {
        ChangeType::Added => format!("+ ADDED {}", describe(&record.after)),
        ChangeType::Removed => format!("- REMOVED {}", describe(&record.before)),
        ChangeType::Moved => format!(
            "> MOVED {}\n  {} / {} -> {} / {}",
            record.before.product,
            record.before.location,
            record.before.category,
            record.after.location,
            record.after.category
        ),
        ChangeType::Modified => format_modified(record),
    }
}

fn format_modified(record: &ChangeRecord) -> String {
    let mut lines = vec![format!(
        "~ MODIFIED {} / {} / {}",
        record.after.location, record.after.category, record.after.product
    )];

    let changed = differing_fields(&record.before, &record.after);
    if changed.is_empty() {
        lines.push("  (no tracked field changed)".to_string());
    }

    for kind in changed {
        lines.push(format!(
            "  {}: {} -> {}",
            kind.label(),
            record.before.value(kind).unwrap_or_default(),
            record.after.value(kind).unwrap_or_default()
        ));
    }

    lines.join("\n")
}

/// `location / category / product` plus any non-empty optional columns
fn describe(snapshot: &EntitySnapshot) -> String {
    let mut line = format!(
        "{} / {} / {}",
        snapshot.location, snapshot.category, snapshot.product
    );

    for kind in [FieldKind::Price, FieldKind::Attributes, FieldKind::SubAttributes] {
        if let Some(value) = snapshot.value(kind).filter(|v| !v.trim().is_empty()) {
            line.push_str(&format!(" | {}: {}", kind.label(), value));
        }
    }

    line
}

/// Summary line followed by every record, bucket by bucket
pub fn format_report(report: &DiffReport) -> String {
    let summary = &report.summary;
    let mut sections = vec![format!(
        "{} changes: {} added, {} removed, {} modified, {} moved",
        summary.total, summary.added, summary.removed, summary.modified, summary.moved
    )];

    let buckets = [
        &report.changes.added,
        &report.changes.removed,
        &report.changes.modified,
        &report.changes.moved,
    ];
    sections.extend(buckets.into_iter().flatten().map(format_change));

    sections.join("\n")
}
