use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::Resource,
};

use super::CatalogSource;

/// Catalog backed by an HTTP endpoint serving the resources JSON document
pub struct HttpCatalog {
    http_client: HttpClient,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalog {
    async fn get_resources(&self) -> AppResult<Vec<Resource>> {
        tracing::debug!(url = %self.url, "Fetching catalog");

        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(url = %self.url, status = %status, "Catalog request failed");
            return Err(AppError::Catalog(format!(
                "Catalog request returned status {}",
                status
            )));
        }

        let resources: Vec<Resource> = response.json().await?;

        tracing::debug!(count = resources.len(), "Loaded catalog over HTTP");

        Ok(resources)
    }
}
