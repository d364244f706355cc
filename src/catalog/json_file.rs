use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::Resource,
};

use super::CatalogSource;

/// Catalog backed by a local JSON file
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonCatalog {
    async fn get_resources(&self) -> AppResult<Vec<Resource>> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read catalog file");
            AppError::Catalog(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let resources: Vec<Resource> = serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Malformed catalog file");
            AppError::Catalog(format!("Malformed catalog JSON: {}", e))
        })?;

        tracing::debug!(count = resources.len(), "Loaded catalog from file");

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Format};
    use std::io::Write;

    fn write_catalog(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("resources.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_resources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            &dir,
            r#"[
                {"id": 2, "title": "B", "description": "", "category": "Nutrition",
                 "format": "Article", "published": "2024-01-02", "tags": []},
                {"id": 1, "title": "A", "description": "", "category": "Productivity",
                 "format": "Video", "published": "2024-01-01", "tags": ["focus"]}
            ]"#,
        );

        let catalog = JsonCatalog::new(path);
        let resources = catalog.get_resources().await.unwrap();

        assert_eq!(resources.len(), 2);
        // Insertion order is preserved, not id order
        assert_eq!(resources[0].id, 2);
        assert_eq!(resources[0].category, Category::Nutrition);
        assert_eq!(resources[1].format, Format::Video);
    }

    #[tokio::test]
    async fn test_get_resource_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            &dir,
            r#"[{"id": 5, "title": "A", "description": "", "category": "Nutrition",
                 "format": "Article", "published": "2024-01-01", "tags": []}]"#,
        );

        let catalog = JsonCatalog::new(path);
        assert!(catalog.get_resource_by_id(5).await.unwrap().is_some());
        assert!(catalog.get_resource_by_id(6).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_error() {
        let catalog = JsonCatalog::new("/nonexistent/resources.json");
        let err = catalog.get_resources().await.unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(&dir, "{not json");

        let catalog = JsonCatalog::new(path);
        let err = catalog.get_resources().await.unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }
}
