pub mod change_classifier;
pub mod change_formatter;
pub mod enrichment;
pub mod report_assembler;
pub mod row_normalizer;
pub mod sampler;
pub mod snapshot_diff;
