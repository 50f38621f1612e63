//! Lien waiver template selection and generation
//!
//! Picks one of four waiver templates from the payment answers, fills its
//! placeholders from a validated [`waiver_types::WaiverRequest`] and returns
//! the finished document:
//!
//! ```text
//! select → load → parse → substitute → serialize
//! ```
//!
//! Template bytes come from a [`TemplateStore`]; the engine itself does no I/O.

pub mod config;
pub mod error;
pub mod fields;
pub mod generator;
pub mod output;
pub mod placeholder;
pub mod selector;
pub mod storage;
pub mod substitute;

pub use config::GeneratorConfig;
pub use error::EngineError;
pub use fields::build_placeholder_map;
pub use generator::{GeneratedDocument, WaiverGenerator};
pub use output::{output_filename, sanitize_filename};
pub use placeholder::{Placeholder, PlaceholderMap, TokenSyntax};
pub use selector::{list_templates, resolve_selection, select_template, TemplateId, TemplateInfo, TemplateKey};
pub use storage::{open_store, DirectoryStore, MemoryStore, TemplateStore, ZipArchiveStore};
pub use substitute::{substitute, substitute_text, substitute_with_report, unresolved_tokens, SubstitutionReport};
