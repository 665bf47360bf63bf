// ============================================================
// PIPELINE CONFIGURATION
// ============================================================
// Knobs for sampling, enrichment and unchanged-row handling

use serde::{Deserialize, Serialize};

use super::ReportKind;

/// What the sampled subset bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleScope {
    /// Report holds every removed record plus the sampled remainder
    #[default]
    Report,

    /// Report holds every record; only the sample is enriched
    EnrichmentOnly,
}

/// Configuration for one diff run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column layout of the input rows
    pub report_kind: ReportKind,

    /// Overrides the report kind's default threshold when set
    pub sample_threshold: Option<usize>,

    pub sample_scope: SampleScope,

    /// Fixed seed for reproducible sampling
    pub sample_seed: Option<u64>,

    /// Run the catalog lookup stage
    pub enrich: bool,

    /// Drop rows where no tracked field differs instead of reporting
    /// them as modified
    pub drop_unchanged: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            report_kind: ReportKind::Product,
            sample_threshold: None,
            sample_scope: SampleScope::Report,
            sample_seed: None,
            enrich: true,
            drop_unchanged: false,
        }
    }
}

impl PipelineConfig {
    pub fn new(report_kind: ReportKind) -> Self {
        Self {
            report_kind,
            ..Default::default()
        }
    }

    pub fn with_sample_threshold(mut self, threshold: usize) -> Self {
        self.sample_threshold = Some(threshold);
        self
    }

    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    pub fn with_sample_scope(mut self, scope: SampleScope) -> Self {
        self.sample_scope = scope;
        self
    }

    pub fn with_enrichment(mut self, enrich: bool) -> Self {
        self.enrich = enrich;
        self
    }

    pub fn with_drop_unchanged(mut self, drop_unchanged: bool) -> Self {
        self.drop_unchanged = drop_unchanged;
        self
    }

    pub fn effective_sample_threshold(&self) -> usize {
        self.sample_threshold
            .unwrap_or_else(|| self.report_kind.default_sample_threshold())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_threshold == Some(0) {
            return Err("sample_threshold must be > 0".to_string());
        }
        Ok(())
    }
}
