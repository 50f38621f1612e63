//! Generator configuration

use serde::{Deserialize, Serialize};

/// Output naming options for [`crate::WaiverGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First component of generated file names
    pub filename_prefix: String,
    /// Extension of generated files, without the dot
    pub extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "Lienify".to_string(),
            extension: "docx".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = prefix.into();
        self
    }
}
