use thiserror::Error;

use crate::wizard::WizardStep;

/// User input that is incomplete or invalid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("Unrecognized value for {field}: {value}")]
    UnrecognizedAnswer { field: &'static str, value: String },

    #[error("Only Arizona templates are available (got '{0}')")]
    UnsupportedJurisdiction(String),

    #[error("Compliance notes must be acknowledged before continuing")]
    ComplianceNotAcknowledged,

    #[error("Input for step '{got}' does not match current step '{expected}'")]
    StepMismatch {
        expected: WizardStep,
        got: WizardStep,
    },
}
