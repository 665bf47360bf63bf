// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Row sources feeding the snapshot diff pipeline

mod csv_parser;

pub use csv_parser::CsvRowSource;

use crate::domain::catalog::RawRow;
use crate::domain::error::Result;

/// Supplies already-split data rows to the pipeline
pub trait RowSource {
    fn read_rows(&self) -> Result<Vec<RawRow>>;
}

impl RowSource for Vec<RawRow> {
    fn read_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.clone())
    }
}
