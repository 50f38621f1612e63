//! Request and response models for Lienify API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use waiver_engine::{GeneratedDocument, TemplateId, TemplateInfo};
use waiver_types::{Role, WaiverDraft, WizardStep};

use crate::session::WizardSession;

/// Template listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateListing {
    #[serde(flatten)]
    pub info: TemplateInfo,
    /// Whether the configured store can load this template
    pub available: bool,
}

/// Generated document metadata (bytes are fetched separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub template: TemplateId,
    pub title: String,
    pub filename: String,
    pub content_type: String,
    pub size: usize,
    pub unresolved: Vec<String>,
}

impl From<&GeneratedDocument> for DocumentInfo {
    fn from(doc: &GeneratedDocument) -> Self {
        Self {
            template: doc.template,
            title: doc.template.title().to_string(),
            filename: doc.filename.clone(),
            content_type: doc.content_type.to_string(),
            size: doc.bytes.len(),
            unresolved: doc.unresolved.clone(),
        }
    }
}

/// Session response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub step: WizardStep,
    /// 1-based position of `step`
    pub step_number: usize,
    pub step_title: String,
    pub total_steps: usize,
    pub draft: WaiverDraft,
    pub document: Option<DocumentInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&WizardSession> for SessionResponse {
    fn from(session: &WizardSession) -> Self {
        Self {
            id: session.id,
            step: session.step,
            step_number: session.step.number(),
            step_title: session.step.title().to_string(),
            total_steps: WizardStep::ALL.len(),
            draft: session.draft.clone(),
            document: session.document.as_ref().map(DocumentInfo::from),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

fn default_state() -> String {
    "Arizona".to_string()
}

/// One-shot generation request
///
/// Payment answers are raw strings (`"Progress"`/`"Final"`,
/// `"Yes"`/`"No"`) and are checked before anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "default_state")]
    pub state: String,
    pub compliance_acknowledged: bool,
    pub role: Role,
    pub payment_type: String,
    pub payment_received: String,
    pub first_delivery_date: NaiveDate,
    pub owner_name: String,
    pub lienor_name: String,
    pub project_address: String,
    pub job_number: String,
    pub property_description: String,
    pub amount: String,
    #[serde(default)]
    pub work_through_date: Option<NaiveDate>,
    pub execution_date: NaiveDate,
    /// Generation date; defaults to today (UTC)
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
