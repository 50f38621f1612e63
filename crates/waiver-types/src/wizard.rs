//! Wizard steps and the per-step answers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{PaymentReceived, PaymentType, Role};

/// Steps of the waiver wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Welcome,
    StateSelection,
    Compliance,
    Role,
    PaymentType,
    PaymentReceived,
    FirstDelivery,
    ProjectDetails,
    Review,
    Download,
}

impl WizardStep {
    pub const ALL: [WizardStep; 10] = [
        WizardStep::Welcome,
        WizardStep::StateSelection,
        WizardStep::Compliance,
        WizardStep::Role,
        WizardStep::PaymentType,
        WizardStep::PaymentReceived,
        WizardStep::FirstDelivery,
        WizardStep::ProjectDetails,
        WizardStep::Review,
        WizardStep::Download,
    ];

    /// 1-based position for "Step N of M" indicators
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "Welcome",
            WizardStep::StateSelection => "State Selection",
            WizardStep::Compliance => "Compliance",
            WizardStep::Role => "Role",
            WizardStep::PaymentType => "Payment Type",
            WizardStep::PaymentReceived => "Payment Received",
            WizardStep::FirstDelivery => "First Delivery",
            WizardStep::ProjectDetails => "Project Details",
            WizardStep::Review => "Review & Generate",
            WizardStep::Download => "Download",
        }
    }

    /// The following step; Download is terminal
    pub fn next(&self) -> WizardStep {
        let idx = self.number() - 1;
        Self::ALL.get(idx + 1).copied().unwrap_or(WizardStep::Download)
    }

    /// The preceding step; Welcome is the floor
    pub fn previous(&self) -> WizardStep {
        let idx = self.number() - 1;
        idx.checked_sub(1)
            .map(|i| Self::ALL[i])
            .unwrap_or(WizardStep::Welcome)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Project and payment details collected on one screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub owner_name: String,
    pub lienor_name: String,
    pub project_address: String,
    pub job_number: String,
    pub property_description: String,
    /// Raw amount as typed; `$` and separators are allowed
    pub amount: String,
    #[serde(default)]
    pub work_through_date: Option<NaiveDate>,
    pub execution_date: NaiveDate,
}

/// The answer submitted for a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    Welcome,
    StateSelection { state: String },
    Compliance { acknowledged: bool },
    Role { role: Role },
    PaymentType { payment_type: PaymentType },
    PaymentReceived { payment_received: PaymentReceived },
    FirstDelivery { first_delivery_date: NaiveDate },
    ProjectDetails(ProjectDetails),
    Review,
}

impl StepInput {
    /// The step this input answers
    pub fn step(&self) -> WizardStep {
        match self {
            StepInput::Welcome => WizardStep::Welcome,
            StepInput::StateSelection { .. } => WizardStep::StateSelection,
            StepInput::Compliance { .. } => WizardStep::Compliance,
            StepInput::Role { .. } => WizardStep::Role,
            StepInput::PaymentType { .. } => WizardStep::PaymentType,
            StepInput::PaymentReceived { .. } => WizardStep::PaymentReceived,
            StepInput::FirstDelivery { .. } => WizardStep::FirstDelivery,
            StepInput::ProjectDetails(_) => WizardStep::ProjectDetails,
            StepInput::Review => WizardStep::Review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers_are_sequential() {
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.number(), i + 1);
        }
    }

    #[test]
    fn test_navigation_is_clamped() {
        assert_eq!(WizardStep::Welcome.previous(), WizardStep::Welcome);
        assert_eq!(WizardStep::Download.next(), WizardStep::Download);
        assert_eq!(WizardStep::Role.next(), WizardStep::PaymentType);
        assert_eq!(WizardStep::Role.previous(), WizardStep::Compliance);
    }

    #[test]
    fn test_step_input_deserializes_tagged() {
        let json = r#"{"step":"payment_type","payment_type":"Progress"}"#;
        let input: StepInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            input,
            StepInput::PaymentType {
                payment_type: PaymentType::Progress
            }
        );
        assert_eq!(input.step(), WizardStep::PaymentType);
    }

    #[test]
    fn test_project_details_input_is_flattened() {
        let json = r#"{
            "step": "project_details",
            "owner_name": "Jane Doe",
            "lienor_name": "Desert Framing LLC",
            "project_address": "100 Main St",
            "job_number": "J-42",
            "property_description": "Lot 7",
            "amount": "1,000",
            "execution_date": "2025-11-19"
        }"#;
        let input: StepInput = serde_json::from_str(json).unwrap();
        match input {
            StepInput::ProjectDetails(details) => {
                assert_eq!(details.owner_name, "Jane Doe");
                assert_eq!(details.work_through_date, None);
            }
            other => panic!("unexpected input: {:?}", other),
        }
    }
}
