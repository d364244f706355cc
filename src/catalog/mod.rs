//! Resource catalog data sources
//!
//! The catalog is a read-only, insertion-ordered list of resources fetched in
//! full at each query. Implementations differ only in where the JSON document
//! lives (local file or HTTP endpoint).

use crate::{error::AppResult, models::Resource};

pub mod http;
pub mod json_file;

pub use http::HttpCatalog;
pub use json_file::JsonCatalog;

/// Trait for catalog data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full resource catalog
    async fn get_resources(&self) -> AppResult<Vec<Resource>>;

    /// Fetch a single resource by ID
    ///
    /// Default implementation loads the full catalog and scans it, which is
    /// how the file and HTTP sources behave anyway.
    async fn get_resource_by_id(&self, id: u32) -> AppResult<Option<Resource>> {
        let resources = self.get_resources().await?;
        Ok(resources.into_iter().find(|r| r.id == id))
    }
}
