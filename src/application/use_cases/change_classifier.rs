// ============================================================
// CHANGE CLASSIFIER
// ============================================================
// Decide per row whether an entry was added, removed, moved or modified

use tracing::info;

use super::row_normalizer::NormalizedRow;
use crate::domain::catalog::{ChangeRecord, ChangeType, EntitySnapshot, FieldKind, FieldSpec};

/// Fields whose raw cells differ between the snapshots, excluding the
/// grouping fields. Columns missing from both snapshots never differ.
pub fn differing_fields(before: &EntitySnapshot, after: &EntitySnapshot) -> Vec<FieldKind> {
    [
        FieldKind::Product,
        FieldKind::Price,
        FieldKind::Attributes,
        FieldKind::SubAttributes,
    ]
    .into_iter()
    .filter(|kind| before.value(*kind) != after.value(*kind))
    .collect()
}

pub struct ChangeClassifier {
    spec: FieldSpec,
}

impl ChangeClassifier {
    pub fn new(spec: FieldSpec) -> Self {
        Self { spec }
    }

    /// Key field presence decides added/removed. Otherwise a grouping
    /// change wins over any other difference. Rows where nothing differs
    /// still come out as modified.
    pub fn classify(&self, before: &EntitySnapshot, after: &EntitySnapshot) -> ChangeType {
        let key = self.spec.key_field();
        match (before.is_blank(key), after.is_blank(key)) {
            (true, false) => ChangeType::Added,
            (false, true) => ChangeType::Removed,
            _ if self.grouping_changed(before, after) => ChangeType::Moved,
            _ => ChangeType::Modified,
        }
    }

    /// No tracked field differs, raw cell for raw cell
    pub fn is_unchanged(&self, before: &EntitySnapshot, after: &EntitySnapshot) -> bool {
        self.spec
            .fields()
            .iter()
            .all(|kind| before.value(*kind) == after.value(*kind))
    }

    fn grouping_changed(&self, before: &EntitySnapshot, after: &EntitySnapshot) -> bool {
        self.spec
            .fields()
            .iter()
            .filter(|kind| kind.is_grouping())
            .any(|kind| before.value(*kind) != after.value(*kind))
    }

    pub fn classify_row(&self, row: NormalizedRow) -> ChangeRecord {
        let change_type = self.classify(&row.before, &row.after);
        ChangeRecord::new(row.before, row.after, change_type)
    }

    /// Classify a batch in order. With `drop_unchanged`, rows where no
    /// tracked field differs are left out instead of reported as modified.
    pub fn classify_all(&self, rows: Vec<NormalizedRow>, drop_unchanged: bool) -> Vec<ChangeRecord> {
        let total = rows.len();
        let records: Vec<ChangeRecord> = rows
            .into_iter()
            .filter(|row| !(drop_unchanged && self.is_unchanged(&row.before, &row.after)))
            .map(|row| self.classify_row(row))
            .collect();

        let count = |change_type: ChangeType| {
            records
                .iter()
                .filter(|r| r.change_type == change_type)
                .count()
        };
        info!(
            rows = total,
            unchanged_dropped = total - records.len(),
            added = count(ChangeType::Added),
            removed = count(ChangeType::Removed),
            modified = count(ChangeType::Modified),
            moved = count(ChangeType::Moved),
            "Classified snapshot rows"
        );

        records
    }
}
