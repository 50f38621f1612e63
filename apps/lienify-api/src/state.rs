//! Application state for Lienify API

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use waiver_engine::{open_store, DirectoryStore, GeneratorConfig, TemplateStore, WaiverGenerator};

use crate::config::ApiConfig;
use crate::session::WizardSession;

pub type SharedStore = Box<dyn TemplateStore + Send + Sync>;

pub struct AppState {
    pub generator: WaiverGenerator<SharedStore>,
    pub sessions: RwLock<HashMap<Uuid, WizardSession>>,
}

impl AppState {
    pub fn new(store: SharedStore, config: GeneratorConfig) -> Self {
        Self {
            generator: WaiverGenerator::with_config(store, config),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open the configured template source
    ///
    /// A missing source is not fatal; generation reports the templates as
    /// unavailable until it appears.
    pub fn from_config(config: &ApiConfig) -> Self {
        let store = match open_store(&config.templates, Some(config.template_folder.as_str())) {
            Ok(store) => {
                info!("Using templates from {}", config.templates.display());
                store
            }
            Err(e) => {
                warn!(
                    "Template source {} could not be opened: {}",
                    config.templates.display(),
                    e
                );
                Box::new(DirectoryStore::new(&config.templates))
            }
        };
        Self::new(store, config.generator_config())
    }
}
