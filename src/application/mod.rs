pub mod use_cases;

pub use use_cases::change_formatter::{format_change, format_report};
pub use use_cases::enrichment::{EnrichmentEngine, EnrichmentStats};
pub use use_cases::report_assembler::assemble;
pub use use_cases::sampler::{sample, Sampler};
pub use use_cases::snapshot_diff::SnapshotDiffUseCase;
