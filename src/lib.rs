//! Compare two snapshots of a catalog export, classify every row as added,
//! removed, modified or moved, enrich new and changed entries from the
//! catalog lookup service, and assemble a stable JSON report.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{format_change, format_report, SnapshotDiffUseCase};
pub use domain::catalog::{
    ChangeRecord, ChangeType, DiffReport, EntitySnapshot, FieldKind, FieldSpec, MenuItemInfo,
    ParsedAttributesField, ParsedField, PipelineConfig, RawRow, ReportKind, SampleScope,
};
pub use domain::error::{AppError, Result};
pub use infrastructure::catalog_clients::{CatalogClientConfig, CatalogLookup, HttpCatalogClient};
pub use infrastructure::csv::{CsvRowSource, RowSource};
