//! Template selection
//!
//! Two answers pick one of four templates:
//!
//! | payment type | received | template                          |
//! |--------------|----------|-----------------------------------|
//! | Progress     | No       | Conditional Waiver — Progress     |
//! | Progress     | Yes      | Unconditional Waiver — Progress   |
//! | Final        | No       | Conditional Waiver — Final        |
//! | Final        | Yes      | Unconditional Waiver — Final      |
//!
//! A received payment is released unconditionally; an outstanding one is
//! released on condition of future evidence of payment.

use serde::{Deserialize, Serialize};
use tracing::debug;
use waiver_types::{PaymentReceived, PaymentType};

use crate::error::EngineError;

/// The four canonical waiver templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    ConditionalProgress,
    UnconditionalProgress,
    ConditionalFinal,
    UnconditionalFinal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::ConditionalProgress,
        TemplateId::UnconditionalProgress,
        TemplateId::ConditionalFinal,
        TemplateId::UnconditionalFinal,
    ];

    /// Human-readable name
    pub fn title(&self) -> &'static str {
        match self {
            TemplateId::ConditionalProgress => "Conditional Waiver — Progress",
            TemplateId::UnconditionalProgress => "Unconditional Waiver — Progress",
            TemplateId::ConditionalFinal => "Conditional Waiver — Final",
            TemplateId::UnconditionalFinal => "Unconditional Waiver — Final",
        }
    }

    /// File name (without extension) of the template in the template set
    pub fn file_stem(&self) -> &'static str {
        match self {
            TemplateId::ConditionalProgress => "CONDITIONAL WAIVER AND RELEASE ON PROGRESS PAYMENT",
            TemplateId::UnconditionalProgress => {
                "UNCONDITIONAL WAIVER AND RELEASE ON PROGRESS PAYMENT"
            }
            TemplateId::ConditionalFinal => "CONDITIONAL WAIVER AND RELEASE ON FINAL PAYMENT",
            TemplateId::UnconditionalFinal => "UNCONDITIONAL WAIVER AND RELEASE ON FINAL PAYMENT",
        }
    }

    /// Stable identifier for URLs and JSON
    pub fn slug(&self) -> &'static str {
        match self {
            TemplateId::ConditionalProgress => "conditional_progress",
            TemplateId::UnconditionalProgress => "unconditional_progress",
            TemplateId::ConditionalFinal => "conditional_final",
            TemplateId::UnconditionalFinal => "unconditional_final",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    pub fn key(&self) -> TemplateKey {
        match self {
            TemplateId::ConditionalProgress => TemplateKey::new(PaymentType::Progress, false),
            TemplateId::UnconditionalProgress => TemplateKey::new(PaymentType::Progress, true),
            TemplateId::ConditionalFinal => TemplateKey::new(PaymentType::Final, false),
            TemplateId::UnconditionalFinal => TemplateKey::new(PaymentType::Final, true),
        }
    }

    pub fn payment_type(&self) -> PaymentType {
        self.key().payment_type
    }

    pub fn is_unconditional(&self) -> bool {
        self.key().unconditional
    }

    /// `Conditional` or `Unconditional`
    pub fn condition_label(&self) -> &'static str {
        if self.is_unconditional() {
            "Unconditional"
        } else {
            "Conditional"
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Lookup key: payment type plus whether the release is unconditional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateKey {
    pub payment_type: PaymentType,
    pub unconditional: bool,
}

impl TemplateKey {
    pub fn new(payment_type: PaymentType, unconditional: bool) -> Self {
        Self {
            payment_type,
            unconditional,
        }
    }

    pub fn from_answers(payment_type: PaymentType, received: PaymentReceived) -> Self {
        Self::new(payment_type, received.is_unconditional())
    }

    pub fn template(&self) -> TemplateId {
        match (self.payment_type, self.unconditional) {
            (PaymentType::Progress, false) => TemplateId::ConditionalProgress,
            (PaymentType::Progress, true) => TemplateId::UnconditionalProgress,
            (PaymentType::Final, false) => TemplateId::ConditionalFinal,
            (PaymentType::Final, true) => TemplateId::UnconditionalFinal,
        }
    }
}

/// Pick the template for a pair of typed answers
pub fn select_template(payment_type: PaymentType, received: PaymentReceived) -> TemplateId {
    let template = TemplateKey::from_answers(payment_type, received).template();
    debug!(%payment_type, %received, template = template.slug(), "Selected template");
    template
}

/// Pick the template from raw answer strings
///
/// Fails with [`EngineError::InvalidSelection`] when either answer is not one
/// of its two recognized values.
pub fn resolve_selection(payment_type: &str, received: &str) -> Result<TemplateId, EngineError> {
    let payment_type: PaymentType = payment_type
        .parse()
        .map_err(|e: waiver_types::ValidationError| EngineError::InvalidSelection(e.to_string()))?;
    let received: PaymentReceived = received
        .parse()
        .map_err(|e: waiver_types::ValidationError| EngineError::InvalidSelection(e.to_string()))?;
    Ok(select_template(payment_type, received))
}

/// Information about an available template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Stable identifier (used in URLs)
    pub name: String,
    /// Human-readable title
    pub title: String,
    /// Template file name without extension
    pub file_stem: String,
    pub payment_type: PaymentType,
    pub unconditional: bool,
}

impl From<TemplateId> for TemplateInfo {
    fn from(id: TemplateId) -> Self {
        Self {
            name: id.slug().to_string(),
            title: id.title().to_string(),
            file_stem: id.file_stem().to_string(),
            payment_type: id.payment_type(),
            unconditional: id.is_unconditional(),
        }
    }
}

/// List all templates
pub fn list_templates() -> Vec<TemplateInfo> {
    TemplateId::ALL.into_iter().map(TemplateInfo::from).collect()
}
