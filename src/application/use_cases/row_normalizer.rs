// ============================================================
// ROW NORMALIZER
// ============================================================
// Map flat before/after rows onto two parsed entity snapshots

use tracing::debug;

use crate::domain::catalog::{EntitySnapshot, FieldSpec, RawRow};

/// A row split into its two snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub before: EntitySnapshot,
    pub after: EntitySnapshot,
}

/// Splits raw rows according to a field spec
pub struct RowNormalizer {
    spec: FieldSpec,
}

impl RowNormalizer {
    pub fn new(spec: FieldSpec) -> Self {
        Self { spec }
    }

    /// Cells `0..F` fill the before snapshot, `F..2F` the after snapshot.
    /// Rows shorter than `2F` are rejected; cells past `2F` are ignored.
    pub fn normalize(&self, row: &[String]) -> Option<NormalizedRow> {
        if row.len() < self.spec.row_width() {
            return None;
        }

        let width = self.spec.width();
        let mut before = EntitySnapshot::default();
        let mut after = EntitySnapshot::default();

        for (offset, kind) in self.spec.fields().iter().enumerate() {
            before.set(*kind, &row[offset]);
            after.set(*kind, &row[width + offset]);
        }

        Some(NormalizedRow { before, after })
    }

    /// Normalize a batch, silently dropping short rows
    pub fn normalize_all(&self, rows: Vec<RawRow>) -> Vec<NormalizedRow> {
        let total = rows.len();
        let normalized: Vec<NormalizedRow> =
            rows.iter().filter_map(|row| self.normalize(row)).collect();

        let dropped = total - normalized.len();
        if dropped > 0 {
            debug!(
                dropped,
                min_cells = self.spec.row_width(),
                "Skipped rows with too few cells"
            );
        }

        normalized
    }
}
