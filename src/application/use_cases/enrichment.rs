// ============================================================
// ENRICHMENT ENGINE
// ============================================================
// Attach catalog metadata to added and modified entries

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::catalog::{ChangeRecord, EntitySnapshot, MenuItemInfo};
use crate::infrastructure::catalog_clients::CatalogLookup;

/// Identifiers needed to look a snapshot up in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LookupKey {
    location_id: String,
    category_id: String,
}

impl LookupKey {
    /// `None` unless location, category and product all carry an id
    fn for_snapshot(snapshot: &EntitySnapshot) -> Option<Self> {
        if !snapshot.location_parsed.has_id()
            || !snapshot.category_parsed.has_id()
            || !snapshot.product_parsed.has_id()
        {
            return None;
        }

        Some(Self {
            location_id: snapshot.location_parsed.id.clone(),
            category_id: snapshot.category_parsed.id.clone(),
        })
    }
}

/// Counters for one `enrich` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub lookups: usize,
    pub failed_lookups: usize,
    pub matched: usize,
    pub skipped_missing_ids: usize,
}

pub struct EnrichmentEngine {
    lookup: Arc<dyn CatalogLookup>,
}

impl EnrichmentEngine {
    pub fn new(lookup: Arc<dyn CatalogLookup>) -> Self {
        Self { lookup }
    }

    pub async fn enrich(&self, records: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
        self.enrich_with_stats(records).await.0
    }

    /// Order and length are preserved. The lookup service is called at most
    /// once per (location, category) pair; a failed call counts as an empty
    /// result for every record sharing the pair.
    pub async fn enrich_with_stats(
        &self,
        records: Vec<ChangeRecord>,
    ) -> (Vec<ChangeRecord>, EnrichmentStats) {
        let mut cache: HashMap<LookupKey, Vec<MenuItemInfo>> = HashMap::new();
        let mut stats = EnrichmentStats::default();
        let mut enriched = Vec::with_capacity(records.len());

        for mut record in records {
            if !record.wants_enrichment() {
                enriched.push(record);
                continue;
            }

            let Some(key) = LookupKey::for_snapshot(&record.after) else {
                stats.skipped_missing_ids += 1;
                enriched.push(record);
                continue;
            };

            if !cache.contains_key(&key) {
                stats.lookups += 1;
                let items = match self.lookup.lookup(&key.category_id, &key.location_id).await {
                    Ok(items) => {
                        debug!(
                            location_id = %key.location_id,
                            category_id = %key.category_id,
                            items = items.len(),
                            "Catalog lookup succeeded"
                        );
                        items
                    }
                    Err(err) => {
                        stats.failed_lookups += 1;
                        warn!(
                            location_id = %key.location_id,
                            category_id = %key.category_id,
                            error = %err,
                            "Catalog lookup failed, continuing without menu info"
                        );
                        Vec::new()
                    }
                };
                cache.insert(key.clone(), items);
            }

            let product_id = &record.after.product_parsed.id;
            record.menu_item_info = cache
                .get(&key)
                .and_then(|items| items.iter().find(|item| &item.item_id == product_id))
                .cloned();

            if record.menu_item_info.is_some() {
                stats.matched += 1;
            }
            enriched.push(record);
        }

        info!(
            records = enriched.len(),
            lookups = stats.lookups,
            failed_lookups = stats.failed_lookups,
            matched = stats.matched,
            skipped_missing_ids = stats.skipped_missing_ids,
            "Enrichment finished"
        );

        (enriched, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::change_classifier::ChangeClassifier;
    use crate::application::use_cases::row_normalizer::RowNormalizer;
    use crate::domain::catalog::{ChangeType, ReportKind};
    use crate::domain::error::{AppError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory catalog that records every call
    #[derive(Default)]
    struct FakeCatalog {
        items: HashMap<(String, String), Vec<MenuItemInfo>>,
        failing_locations: Vec<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeCatalog {
        fn with_items(mut self, category_id: &str, location_id: &str, ids: &[&str]) -> Self {
            self.items.insert(
                (category_id.to_string(), location_id.to_string()),
                ids.iter()
                    .map(|id| MenuItemInfo::new(*id).with_detail("source", "fake"))
                    .collect(),
            );
            self
        }

        fn failing_at(mut self, location_id: &str) -> Self {
            self.failing_locations.push(location_id.to_string());
            self
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogLookup for FakeCatalog {
        async fn lookup(&self, category_id: &str, location_id: &str) -> Result<Vec<MenuItemInfo>> {
            self.calls
                .lock()
                .unwrap()
                .push((category_id.to_string(), location_id.to_string()));

            if self.failing_locations.iter().any(|l| l == location_id) {
                return Err(AppError::LookupError("connection refused".to_string()));
            }

            Ok(self
                .items
                .get(&(category_id.to_string(), location_id.to_string()))
                .cloned()
                .unwrap_or_default())
        }
    }

    fn records(rows: &[[&str; 6]]) -> Vec<ChangeRecord> {
        let spec = ReportKind::Product.field_spec();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        let normalized = RowNormalizer::new(spec).normalize_all(rows);
        ChangeClassifier::new(spec).classify_all(normalized, false)
    }

    #[tokio::test]
    async fn test_one_lookup_per_location_category_pair() {
        let catalog = Arc::new(FakeCatalog::default().with_items("137", "443", &["1", "2", "3"]));
        let engine = EnrichmentEngine::new(catalog.clone());

        let input = records(&[
            ["", "", "", "443: Bar", "137: Cocktails", "1: Mojito"],
            ["", "", "", "443: Bar", "137: Cocktails", "2: Paloma"],
            ["", "", "", "443: Bar", "137: Cocktails", "3: Negroni"],
        ]);
        let (output, stats) = engine.enrich_with_stats(input).await;

        assert_eq!(catalog.calls(), vec![("137".to_string(), "443".to_string())]);
        assert_eq!(stats.lookups, 1);
        assert_eq!(stats.matched, 3);
        assert_eq!(output.len(), 3);
        assert_eq!(output[1].menu_item_info.as_ref().unwrap().item_id, "2");
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_records_unenriched() {
        let catalog = Arc::new(
            FakeCatalog::default()
                .failing_at("443")
                .with_items("137", "555", &["9"]),
        );
        let engine = EnrichmentEngine::new(catalog.clone());

        let input = records(&[
            ["", "", "", "443: Bar", "137: Cocktails", "1: Mojito"],
            ["", "", "", "443: Bar", "137: Cocktails", "2: Paloma"],
            ["", "", "", "555: Patio", "137: Cocktails", "9: Spritz"],
        ]);
        let (output, stats) = engine.enrich_with_stats(input).await;

        assert_eq!(catalog.calls().len(), 2);
        assert_eq!(stats.failed_lookups, 1);
        assert!(output[0].menu_item_info.is_none());
        assert!(output[1].menu_item_info.is_none());
        assert_eq!(output[2].menu_item_info.as_ref().unwrap().item_id, "9");
    }

    #[tokio::test]
    async fn test_removed_moved_and_idless_records_pass_through() {
        let catalog = Arc::new(FakeCatalog::default().with_items("137", "443", &["1"]));
        let engine = EnrichmentEngine::new(catalog.clone());

        let input = records(&[
            ["443: Bar", "137: Cocktails", "1: Mojito", "443: Bar", "137: Cocktails", ""],
            ["443: Bar", "137: Cocktails", "1: Mojito", "555: Patio", "137: Cocktails", "1: Mojito"],
            ["", "", "", "Bar", "137: Cocktails", "1: Mojito"],
        ]);
        assert_eq!(input[0].change_type, ChangeType::Removed);
        assert_eq!(input[1].change_type, ChangeType::Moved);
        assert_eq!(input[2].change_type, ChangeType::Added);

        let (output, stats) = engine.enrich_with_stats(input.clone()).await;

        assert!(catalog.calls().is_empty());
        assert_eq!(stats.skipped_missing_ids, 1);
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_no_match_is_not_an_error() {
        let catalog = Arc::new(FakeCatalog::default().with_items("137", "443", &["7"]));
        let engine = EnrichmentEngine::new(catalog);

        let input = records(&[[
            "443: Bar",
            "137: Cocktails",
            "1: Mojito",
            "443: Bar",
            "137: Cocktails",
            "8: Mojito",
        ]]);
        let output = engine.enrich(input).await;

        assert_eq!(output[0].change_type, ChangeType::Modified);
        assert!(output[0].menu_item_info.is_none());
    }
}
