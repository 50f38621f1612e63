//! Environment configuration for Lienify API

use std::path::PathBuf;

use waiver_engine::storage::DEFAULT_TEMPLATE_FOLDER;
use waiver_engine::GeneratorConfig;

pub const DEFAULT_PORT: u16 = 3002;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    /// Template directory or `.zip` archive
    pub templates: PathBuf,
    /// Folder inside a template archive that holds the Arizona set
    pub template_folder: String,
    pub filename_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            templates: PathBuf::from("./templates"),
            template_folder: DEFAULT_TEMPLATE_FOLDER.to_string(),
            filename_prefix: GeneratorConfig::default().filename_prefix,
        }
    }
}

impl ApiConfig {
    /// Read `PORT`, `LIENIFY_TEMPLATES`, `LIENIFY_TEMPLATE_FOLDER` and
    /// `LIENIFY_FILENAME_PREFIX`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            templates: non_empty("LIENIFY_TEMPLATES")
                .map(PathBuf::from)
                .unwrap_or(defaults.templates),
            template_folder: non_empty("LIENIFY_TEMPLATE_FOLDER").unwrap_or(defaults.template_folder),
            filename_prefix: non_empty("LIENIFY_FILENAME_PREFIX").unwrap_or(defaults.filename_prefix),
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default().with_prefix(self.filename_prefix.clone())
    }
}
