// ============================================================
// SNAPSHOT DIFF USE CASE
// ============================================================
// Orchestrate normalization, classification, sampling,
// enrichment and report assembly

use std::sync::Arc;

use tracing::info;

use super::change_classifier::ChangeClassifier;
use super::enrichment::EnrichmentEngine;
use super::report_assembler::assemble;
use super::row_normalizer::RowNormalizer;
use super::sampler::Sampler;
use crate::domain::catalog::{
    ChangeRecord, ChangeType, DiffReport, PipelineConfig, RawRow, SampleScope,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::catalog_clients::CatalogLookup;
use crate::infrastructure::csv::RowSource;

/// Snapshot diff pipeline for one export shape
pub struct SnapshotDiffUseCase {
    config: PipelineConfig,
    normalizer: RowNormalizer,
    classifier: ChangeClassifier,
    enrichment: Option<EnrichmentEngine>,
}

impl SnapshotDiffUseCase {
    /// Rejects invalid configuration before any row is touched, including
    /// enrichment without a lookup service.
    pub fn new(config: PipelineConfig, lookup: Option<Arc<dyn CatalogLookup>>) -> Result<Self> {
        config.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid pipeline config: {}", e))
        })?;

        if config.enrich && lookup.is_none() {
            return Err(AppError::ConfigError(
                "Enrichment is enabled but no catalog lookup was provided".to_string(),
            ));
        }

        let spec = config.report_kind.field_spec();
        let enrichment = if config.enrich {
            lookup.map(EnrichmentEngine::new)
        } else {
            None
        };

        Ok(Self {
            normalizer: RowNormalizer::new(spec),
            classifier: ChangeClassifier::new(spec),
            enrichment,
            config,
        })
    }

    /// Pipeline without the enrichment stage
    pub fn without_enrichment(config: PipelineConfig) -> Result<Self> {
        Self::new(config.with_enrichment(false), None)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalize and classify, no sampling or enrichment
    pub fn classify_rows(&self, rows: Vec<RawRow>) -> Vec<ChangeRecord> {
        let normalized = self.normalizer.normalize_all(rows);
        self.classifier.classify_all(normalized, self.config.drop_unchanged)
    }

    pub async fn run_source(&self, source: &dyn RowSource) -> Result<DiffReport> {
        let rows = source.read_rows()?;
        Ok(self.run(rows).await)
    }

    pub async fn run(&self, rows: Vec<RawRow>) -> DiffReport {
        let records = self.classify_rows(rows);
        let mut sampler = Sampler::new(self.config.sample_seed);
        let threshold = self.config.effective_sample_threshold();

        let records = match self.config.sample_scope {
            SampleScope::Report => {
                let (removed, active): (Vec<_>, Vec<_>) = records
                    .into_iter()
                    .partition(|r| r.change_type == ChangeType::Removed);

                let candidates = active.len();
                let sampled = sampler.sample(active, threshold);
                if sampled.len() < candidates {
                    info!(
                        candidates,
                        kept = sampled.len(),
                        threshold,
                        "Sampled non-removed changes"
                    );
                }

                let enriched = self.enrich(sampled).await;
                removed.into_iter().chain(enriched).collect()
            }
            SampleScope::EnrichmentOnly => {
                let active: Vec<usize> = records
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.change_type != ChangeType::Removed)
                    .map(|(index, _)| index)
                    .collect();

                let candidates = active.len();
                let chosen = sampler.sample(active, threshold);
                if chosen.len() < candidates {
                    info!(
                        candidates,
                        enriched = chosen.len(),
                        threshold,
                        "Sampled changes for enrichment"
                    );
                }

                let mut slots: Vec<Option<ChangeRecord>> =
                    records.into_iter().map(Some).collect();
                let picked: Vec<ChangeRecord> = chosen
                    .iter()
                    .filter_map(|&index| slots[index].take())
                    .collect();

                let enriched = self.enrich(picked).await;
                for (index, record) in chosen.into_iter().zip(enriched) {
                    slots[index] = Some(record);
                }

                slots.into_iter().flatten().collect()
            }
        };

        let report = assemble(records);
        info!(
            report_kind = %self.config.report_kind,
            total = report.summary.total,
            added = report.summary.added,
            removed = report.summary.removed,
            modified = report.summary.modified,
            moved = report.summary.moved,
            "Assembled diff report"
        );

        report
    }

    async fn enrich(&self, records: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
        match &self.enrichment {
            Some(engine) => engine.enrich(records).await,
            None => records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{MenuItemInfo, ReportKind};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns one item per requested product id and counts calls
    #[derive(Default)]
    struct EchoCatalog {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogLookup for EchoCatalog {
        async fn lookup(&self, _category_id: &str, _location_id: &str) -> Result<Vec<MenuItemInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..100)
                .map(|id| MenuItemInfo::new(id.to_string()))
                .collect())
        }
    }

    fn added_row(location: usize, product: usize) -> RawRow {
        vec![
            String::new(),
            String::new(),
            String::new(),
            format!("{}: Loc", location),
            "137: Cocktails".to_string(),
            format!("{}: Item", product),
        ]
    }

    fn removed_row(product: usize) -> RawRow {
        vec![
            "1: Loc".to_string(),
            "137: Cocktails".to_string(),
            format!("{}: Item", product),
            "1: Loc".to_string(),
            "137: Cocktails".to_string(),
            String::new(),
        ]
    }

    #[test]
    fn test_enrichment_without_lookup_is_rejected() {
        let result = SnapshotDiffUseCase::new(PipelineConfig::default(), None);
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        let result = SnapshotDiffUseCase::new(
            PipelineConfig::default().with_sample_threshold(0),
            Some(Arc::new(EchoCatalog::default())),
        );
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_report_scope_keeps_all_removed_and_samples_the_rest() {
        let catalog = Arc::new(EchoCatalog::default());
        let config = PipelineConfig::new(ReportKind::Product)
            .with_sample_threshold(3)
            .with_sample_seed(11);
        let use_case = SnapshotDiffUseCase::new(config, Some(catalog.clone())).unwrap();

        let mut rows: Vec<RawRow> = (0..8).map(|i| added_row(i, i)).collect();
        rows.extend((50..55).map(removed_row));
        let report = use_case.run(rows).await;

        assert_eq!(report.summary.removed, 5);
        assert_eq!(report.summary.added, 3);
        assert_eq!(report.summary.total, 8);
        assert!(report
            .changes
            .added
            .iter()
            .all(|r| r.menu_item_info.is_some()));
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_enrichment_only_scope_reports_everything_in_order() {
        let catalog = Arc::new(EchoCatalog::default());
        let config = PipelineConfig::new(ReportKind::Product)
            .with_sample_threshold(2)
            .with_sample_seed(5)
            .with_sample_scope(SampleScope::EnrichmentOnly);
        let use_case = SnapshotDiffUseCase::new(config, Some(catalog.clone())).unwrap();

        let rows: Vec<RawRow> = (0..6).map(|i| added_row(i, i)).collect();
        let report = use_case.run(rows).await;

        assert_eq!(report.summary.total, 6);
        let products: Vec<_> = report
            .changes
            .added
            .iter()
            .map(|r| r.after.product_parsed.id.clone())
            .collect();
        assert_eq!(products, vec!["0", "1", "2", "3", "4", "5"]);

        let enriched = report
            .changes
            .added
            .iter()
            .filter(|r| r.menu_item_info.is_some())
            .count();
        assert_eq!(enriched, 2);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_seeded_runs_are_byte_identical() {
        let config = PipelineConfig::new(ReportKind::Product)
            .with_sample_threshold(4)
            .with_sample_seed(99);
        let use_case = SnapshotDiffUseCase::without_enrichment(config).unwrap();
        let rows: Vec<RawRow> = (0..20).map(|i| added_row(i, i)).collect();

        let first = use_case.run(rows.clone()).await.to_json().unwrap();
        let second = use_case.run(rows).await.to_json().unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_drop_unchanged_filters_identical_rows() {
        let config = PipelineConfig::new(ReportKind::Product).with_drop_unchanged(true);
        let use_case = SnapshotDiffUseCase::without_enrichment(config).unwrap();

        let same: RawRow = ["1", "2", "3", "1", "2", "3"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let report = use_case.run(vec![same, added_row(1, 1)]).await;

        assert_eq!(report.summary.total, 1);
        assert_eq!(report.summary.modified, 0);
    }
}
