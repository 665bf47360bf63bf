use crate::domain::catalog::PipelineConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::catalog_clients::CatalogClientConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "CATALOG_DIFF_";

/// Settings for a diff run, layered defaults < TOML file < environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub pipeline: PipelineConfig,
    pub catalog: CatalogClientConfig,
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            figment: Figment::from(Serialized::defaults(AppSettings::default())),
        }
    }

    /// Merge a TOML file if it exists
    pub fn with_file(mut self, path: &Path) -> Self {
        self.figment = self.figment.merge(Toml::file(path));
        self
    }

    /// `CATALOG_DIFF_PIPELINE__SAMPLE_THRESHOLD=5` sets `pipeline.sample_threshold`
    pub fn with_env(mut self) -> Self {
        self.figment = self.figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        self
    }

    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.figment = self.figment.merge(Toml::string(toml));
        self
    }

    pub fn load(&self) -> Result<AppSettings> {
        let settings: AppSettings = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

        settings
            .pipeline
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid pipeline config: {}", e)))?;

        Ok(settings)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ReportKind, SampleScope};

    #[test]
    fn test_defaults() {
        let settings = ConfigService::new().load().unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(settings.pipeline.enrich);
        assert_eq!(settings.catalog.item_id_field, "itemId");
    }

    #[test]
    fn test_toml_overrides() {
        let settings = ConfigService::new()
            .with_toml_str(
                r#"
                [pipeline]
                report_kind = "attributes"
                sample_scope = "enrichment_only"
                sample_seed = 7
                drop_unchanged = true

                [catalog]
                base_url = "https://catalog.example.com/api/"
                timeout_secs = 5
                "#,
            )
            .load()
            .unwrap();

        assert_eq!(settings.pipeline.report_kind, ReportKind::Attributes);
        assert_eq!(settings.pipeline.sample_scope, SampleScope::EnrichmentOnly);
        assert_eq!(settings.pipeline.sample_seed, Some(7));
        assert!(settings.pipeline.drop_unchanged);
        assert_eq!(settings.pipeline.effective_sample_threshold(), 15);
        assert_eq!(settings.catalog.timeout_secs, 5);
        assert_eq!(settings.catalog.path, "menu-items");
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let result = ConfigService::new()
            .with_toml_str("[pipeline]\nsample_threshold = 0\n")
            .load();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_env_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                r#"
                [pipeline]
                sample_threshold = 3

                [catalog]
                base_url = "https://toml.example.com/api/"
                timeout_secs = 5
                "#,
            )?;
            jail.set_env("CATALOG_DIFF_PIPELINE__SAMPLE_THRESHOLD", "5");
            jail.set_env("CATALOG_DIFF_CATALOG__BASE_URL", "https://env.example.com/api/");

            let settings = ConfigService::new()
                .with_file(Path::new("settings.toml"))
                .with_env()
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(settings.pipeline.sample_threshold, Some(5));
            assert_eq!(settings.catalog.base_url, "https://env.example.com/api/");
            assert_eq!(settings.catalog.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_is_a_config_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CATALOG_DIFF_PIPELINE__SAMPLE_THRESHOLD", "many");

            let result = ConfigService::new().with_env().load();
            assert!(matches!(result, Err(AppError::ConfigError(_))));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let settings = ConfigService::new()
            .with_file(Path::new("/definitely/not/here.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.pipeline.report_kind, ReportKind::Product);
    }
}
