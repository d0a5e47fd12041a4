use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
    /// Path to the tab-delimited frequency file.
    #[serde(default)]
    pub corpus: String,
    #[serde(default)]
    pub default_results: usize,
    #[serde(default)]
    pub max_results: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub batch_size: usize,
}
