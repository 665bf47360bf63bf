use super::CatalogLookup;
use crate::domain::catalog::MenuItemInfo;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Connection settings for the catalog lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogClientConfig {
    pub base_url: String,

    /// Endpoint path, joined onto `base_url`
    pub path: String,

    /// JSON key carrying the item identifier in each returned item
    pub item_id_field: String,

    pub timeout_secs: u64,
    pub api_token: Option<String>,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/".to_string(),
            path: "menu-items".to_string(),
            item_id_field: "itemId".to_string(),
            timeout_secs: 30,
            api_token: None,
        }
    }
}

pub struct HttpCatalogClient {
    client: reqwest::Client,
    endpoint: Url,
    item_id_field: String,
    api_token: Option<String>,
}

impl HttpCatalogClient {
    /// Fails before any request is made when the endpoint is unusable
    pub fn new(config: &CatalogClientConfig) -> Result<Self> {
        let endpoint = Self::endpoint(config)?;

        if config.item_id_field.trim().is_empty() {
            return Err(AppError::ConfigError(
                "catalog item_id_field must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            item_id_field: config.item_id_field.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn endpoint(config: &CatalogClientConfig) -> Result<Url> {
        let base_url = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base = Url::parse(&base_url).map_err(|e| {
            AppError::ConfigError(format!("Invalid catalog base_url '{}': {}", config.base_url, e))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::ConfigError(format!(
                "Unsupported catalog URL scheme: {}",
                base.scheme()
            )));
        }

        base.join(config.path.trim_start_matches('/')).map_err(|e| {
            AppError::ConfigError(format!("Invalid catalog path '{}': {}", config.path, e))
        })
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint
    }

    /// Read `{ "items": [...] }`, skipping items without an identifier
    pub fn parse_items(json: &Value, item_id_field: &str) -> Result<Vec<MenuItemInfo>> {
        let items = json["items"].as_array().ok_or_else(|| {
            AppError::LookupError("Invalid response format: missing items array".to_string())
        })?;

        let parsed = items
            .iter()
            .filter_map(|item| item.as_object())
            .filter_map(|object| {
                let item_id = match object.get(item_id_field)? {
                    Value::String(id) => id.clone(),
                    Value::Number(id) => id.to_string(),
                    _ => return None,
                };

                // The id is serialized under `itemId`, so a stray `itemId`
                // from the service must not land in the details as well
                let details = object
                    .iter()
                    .filter(|(key, _)| {
                        key.as_str() != item_id_field && key.as_str() != MenuItemInfo::ID_KEY
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();

                Some(MenuItemInfo { item_id, details })
            })
            .collect();

        Ok(parsed)
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalogClient {
    async fn lookup(&self, category_id: &str, location_id: &str) -> Result<Vec<MenuItemInfo>> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("categoryId", category_id), ("locationId", location_id)]);

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::LookupError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LookupError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AppError::LookupError(format!("Failed to parse JSON: {}", e)))?;

        Self::parse_items(&json, &self.item_id_field)
    }
}
