//! End-to-end waiver generation

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use waiver_types::WaiverRequest;

use crate::config::GeneratorConfig;
use crate::error::EngineError;
use crate::fields::build_placeholder_map;
use crate::output::output_filename;
use crate::placeholder::PlaceholderMap;
use crate::selector::{select_template, TemplateId};
use crate::storage::TemplateStore;
use crate::substitute::{substitute_with_report, unresolved_tokens};

/// A filled-in waiver ready for download
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub template: TemplateId,
    pub filename: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// Tokens left in the output that had no value
    pub unresolved: Vec<String>,
}

/// Selects, fills and serializes waiver templates from a [`TemplateStore`]
pub struct WaiverGenerator<S> {
    store: S,
    config: GeneratorConfig,
}

impl<S: TemplateStore> WaiverGenerator<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, GeneratorConfig::default())
    }

    pub fn with_config(store: S, config: GeneratorConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the waiver for `request`, dated `today`
    pub fn generate(
        &self,
        request: &WaiverRequest,
        today: NaiveDate,
    ) -> Result<GeneratedDocument, EngineError> {
        let template = select_template(request.payment_type, request.payment_received);
        let placeholders = build_placeholder_map(request, today);
        let filename = output_filename(
            &self.config.filename_prefix,
            request.jurisdiction.code(),
            template,
            today,
            &self.config.extension,
        );
        self.render(template, &placeholders, filename)
    }

    /// Fill `template` with an explicit placeholder map
    pub fn render(
        &self,
        template: TemplateId,
        placeholders: &PlaceholderMap,
        filename: String,
    ) -> Result<GeneratedDocument, EngineError> {
        let bytes = self.store.load(template)?;
        let mut document = docx_core::parse(&bytes).map_err(EngineError::DocumentParse)?;

        let report = substitute_with_report(&mut document, placeholders);
        let unresolved = unresolved_tokens(&document);
        if !unresolved.is_empty() {
            warn!(template = template.slug(), tokens = ?unresolved, "Unresolved placeholders in output");
        }

        let bytes = docx_core::serialize(&document)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;

        info!(
            template = template.slug(),
            filename = %filename,
            rewritten = report.total(),
            size = bytes.len(),
            "Generated waiver"
        );

        Ok(GeneratedDocument {
            template,
            filename,
            bytes,
            content_type: docx_core::DOCX_MIME,
            unresolved,
        })
    }
}
