use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// URL of the resource catalog JSON document
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Optional local path to the catalog JSON document.
    /// When set, it takes precedence over `catalog_url`.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Directory for the best-effort key-value store (favorites, UI prefs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Quiet period before a filter change triggers a query, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Number of resources per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_catalog_url() -> String {
    "http://localhost:4200/data/library/resources.json".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("resource-library")
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    9
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            catalog_path: None,
            data_dir: default_data_dir(),
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
