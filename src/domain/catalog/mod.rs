// ============================================================
// CATALOG DOMAIN LAYER
// ============================================================
// Value types for snapshot diffing and enrichment
// No I/O, no async

mod field_spec;
mod parsed_field;
mod pipeline_config;
mod report;
mod snapshot;

pub use field_spec::{FieldKind, FieldSpec, ReportKind};
pub use parsed_field::{ParsedAttributesField, ParsedField};
pub use pipeline_config::{PipelineConfig, SampleScope};
pub use report::{DiffReport, ReportChanges, ReportSummary};
pub use snapshot::{ChangeRecord, ChangeType, EntitySnapshot, MenuItemInfo, RawRow};
