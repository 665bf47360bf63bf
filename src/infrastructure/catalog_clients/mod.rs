pub mod http;

use crate::domain::catalog::MenuItemInfo;
use crate::domain::error::Result;
use async_trait::async_trait;

pub use http::{CatalogClientConfig, HttpCatalogClient};

/// Catalog lookup service: every menu item of one category at one location
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn lookup(&self, category_id: &str, location_id: &str) -> Result<Vec<MenuItemInfo>>;
}
