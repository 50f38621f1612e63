//! Waiver answers: the step-wise draft and the validated request
//!
//! A [`WaiverDraft`] is threaded through the wizard: every step consumes the
//! previous draft and returns an updated one. Only [`WaiverDraft::validate`]
//! produces a [`WaiverRequest`], which is what generation accepts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::parse_amount;
use crate::error::ValidationError;
use crate::types::{Jurisdiction, PaymentReceived, PaymentType, Role};
use crate::wizard::{ProjectDetails, StepInput, WizardStep};

/// Partially collected answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaiverDraft {
    pub jurisdiction: Option<Jurisdiction>,
    pub compliance_acknowledged: bool,
    pub role: Option<Role>,
    pub payment_type: Option<PaymentType>,
    pub payment_received: Option<PaymentReceived>,
    pub first_delivery_date: Option<NaiveDate>,
    pub owner_name: Option<String>,
    pub lienor_name: Option<String>,
    pub project_address: Option<String>,
    pub job_number: Option<String>,
    pub property_description: Option<String>,
    pub amount: Option<Decimal>,
    pub work_through_date: Option<NaiveDate>,
    pub execution_date: Option<NaiveDate>,
}

/// Complete, validated answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverRequest {
    pub jurisdiction: Jurisdiction,
    pub role: Role,
    pub payment_type: PaymentType,
    pub payment_received: PaymentReceived,
    pub amount: Decimal,
    pub first_delivery_date: NaiveDate,
    /// Present only for progress payments
    pub work_through_date: Option<NaiveDate>,
    pub execution_date: NaiveDate,
    pub owner_name: String,
    pub lienor_name: String,
    pub project_address: String,
    pub job_number: String,
    pub property_description: String,
}

impl WaiverRequest {
    pub fn is_unconditional(&self) -> bool {
        self.payment_received.is_unconditional()
    }
}

impl WaiverDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the answer for one wizard step, returning the updated draft
    pub fn apply(self, input: StepInput) -> Result<Self, ValidationError> {
        let mut next = self;
        match input {
            StepInput::Welcome => {}
            StepInput::StateSelection { state } => {
                next.jurisdiction = Some(Jurisdiction::from_name(&state)?);
            }
            StepInput::Compliance { acknowledged } => {
                if !acknowledged {
                    return Err(ValidationError::ComplianceNotAcknowledged);
                }
                next.compliance_acknowledged = true;
            }
            StepInput::Role { role } => next.role = Some(role),
            StepInput::PaymentType { payment_type } => next.payment_type = Some(payment_type),
            StepInput::PaymentReceived { payment_received } => {
                next.payment_received = Some(payment_received)
            }
            StepInput::FirstDelivery {
                first_delivery_date,
            } => next.first_delivery_date = Some(first_delivery_date),
            StepInput::ProjectDetails(details) => next.apply_project_details(details)?,
            StepInput::Review => {
                next.validate()?;
            }
        }
        Ok(next)
    }

    fn apply_project_details(&mut self, details: ProjectDetails) -> Result<(), ValidationError> {
        let owner_name = required_text(details.owner_name, "owner_name")?;
        let lienor_name = required_text(details.lienor_name, "lienor_name")?;
        let project_address = required_text(details.project_address, "project_address")?;
        let job_number = required_text(details.job_number, "job_number")?;
        let property_description =
            required_text(details.property_description, "property_description")?;
        let amount = parse_amount(&details.amount)?;

        if self.payment_type == Some(PaymentType::Progress) && details.work_through_date.is_none()
        {
            return Err(ValidationError::MissingField("work_through_date"));
        }

        self.owner_name = Some(owner_name);
        self.lienor_name = Some(lienor_name);
        self.project_address = Some(project_address);
        self.job_number = Some(job_number);
        self.property_description = Some(property_description);
        self.amount = Some(amount);
        self.work_through_date = details.work_through_date;
        self.execution_date = Some(details.execution_date);
        Ok(())
    }

    /// Whether the answer for `step` has been collected
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Welcome => true,
            WizardStep::StateSelection => self.jurisdiction.is_some(),
            WizardStep::Compliance => self.compliance_acknowledged,
            WizardStep::Role => self.role.is_some(),
            WizardStep::PaymentType => self.payment_type.is_some(),
            WizardStep::PaymentReceived => self.payment_received.is_some(),
            WizardStep::FirstDelivery => self.first_delivery_date.is_some(),
            WizardStep::ProjectDetails => {
                self.owner_name.is_some()
                    && self.lienor_name.is_some()
                    && self.project_address.is_some()
                    && self.job_number.is_some()
                    && self.property_description.is_some()
                    && self.amount.is_some()
                    && self.execution_date.is_some()
            }
            WizardStep::Review | WizardStep::Download => self.validate().is_ok(),
        }
    }

    /// Check every field and produce the complete request
    pub fn validate(&self) -> Result<WaiverRequest, ValidationError> {
        let jurisdiction = self
            .jurisdiction
            .ok_or(ValidationError::MissingField("jurisdiction"))?;
        if !self.compliance_acknowledged {
            return Err(ValidationError::ComplianceNotAcknowledged);
        }
        let role = self.role.ok_or(ValidationError::MissingField("role"))?;
        let payment_type = self
            .payment_type
            .ok_or(ValidationError::MissingField("payment_type"))?;
        let payment_received = self
            .payment_received
            .ok_or(ValidationError::MissingField("payment_received"))?;
        let first_delivery_date = self
            .first_delivery_date
            .ok_or(ValidationError::MissingField("first_delivery_date"))?;
        let owner_name = present(&self.owner_name, "owner_name")?;
        let lienor_name = present(&self.lienor_name, "lienor_name")?;
        let project_address = present(&self.project_address, "project_address")?;
        let job_number = present(&self.job_number, "job_number")?;
        let property_description = present(&self.property_description, "property_description")?;
        let amount = self.amount.ok_or(ValidationError::MissingField("amount"))?;
        let execution_date = self
            .execution_date
            .ok_or(ValidationError::MissingField("execution_date"))?;

        let work_through_date = match payment_type {
            PaymentType::Progress => Some(
                self.work_through_date
                    .ok_or(ValidationError::MissingField("work_through_date"))?,
            ),
            PaymentType::Final => None,
        };

        Ok(WaiverRequest {
            jurisdiction,
            role,
            payment_type,
            payment_received,
            amount,
            first_delivery_date,
            work_through_date,
            execution_date,
            owner_name,
            lienor_name,
            project_address,
            job_number,
            property_description,
        })
    }
}

fn required_text(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn present(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn details(work_through: Option<NaiveDate>) -> ProjectDetails {
        ProjectDetails {
            owner_name: "Jane Doe".to_string(),
            lienor_name: "Desert Framing LLC".to_string(),
            project_address: "100 Main St, Phoenix, AZ".to_string(),
            job_number: "J-42".to_string(),
            property_description: "Lot 7, Block 3".to_string(),
            amount: "$12,500".to_string(),
            work_through_date: work_through,
            execution_date: date(2025, 11, 19),
        }
    }

    fn draft_through_first_delivery(payment_type: PaymentType) -> WaiverDraft {
        WaiverDraft::new()
            .apply(StepInput::StateSelection {
                state: "Arizona".to_string(),
            })
            .and_then(|d| d.apply(StepInput::Compliance { acknowledged: true }))
            .and_then(|d| d.apply(StepInput::Role { role: Role::Subcontractor }))
            .and_then(|d| d.apply(StepInput::PaymentType { payment_type }))
            .and_then(|d| {
                d.apply(StepInput::PaymentReceived {
                    payment_received: PaymentReceived::No,
                })
            })
            .and_then(|d| {
                d.apply(StepInput::FirstDelivery {
                    first_delivery_date: date(2025, 6, 1),
                })
            })
            .unwrap()
    }

    #[test]
    fn test_complete_progress_draft_validates() {
        let draft = draft_through_first_delivery(PaymentType::Progress)
            .apply(StepInput::ProjectDetails(details(Some(date(2025, 10, 31)))))
            .unwrap();

        let request = draft.validate().unwrap();
        assert_eq!(request.payment_type, PaymentType::Progress);
        assert_eq!(request.work_through_date, Some(date(2025, 10, 31)));
        assert_eq!(request.amount, Decimal::new(12500, 0));
        assert!(!request.is_unconditional());
    }

    #[test]
    fn test_progress_requires_work_through_date() {
        let result = draft_through_first_delivery(PaymentType::Progress)
            .apply(StepInput::ProjectDetails(details(None)));
        assert_eq!(
            result.unwrap_err(),
            ValidationError::MissingField("work_through_date")
        );
    }

    #[test]
    fn test_final_ignores_work_through_date() {
        let request = draft_through_first_delivery(PaymentType::Final)
            .apply(StepInput::ProjectDetails(details(Some(date(2025, 10, 31)))))
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(request.work_through_date, None);
    }

    #[test]
    fn test_blank_text_is_missing() {
        let mut bad = details(None);
        bad.owner_name = "   ".to_string();
        let result =
            draft_through_first_delivery(PaymentType::Final).apply(StepInput::ProjectDetails(bad));
        assert_eq!(result.unwrap_err(), ValidationError::MissingField("owner_name"));
    }

    #[test]
    fn test_failed_step_leaves_previous_draft_usable() {
        let draft = draft_through_first_delivery(PaymentType::Final);
        let before = draft.clone();
        let mut bad = details(None);
        bad.amount = "abc".to_string();

        assert!(matches!(
            draft.clone().apply(StepInput::ProjectDetails(bad)),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert_eq!(draft, before);
    }

    #[test]
    fn test_compliance_must_be_acknowledged() {
        let result = WaiverDraft::new().apply(StepInput::Compliance {
            acknowledged: false,
        });
        assert_eq!(result.unwrap_err(), ValidationError::ComplianceNotAcknowledged);
    }

    #[test]
    fn test_empty_draft_reports_first_missing_field() {
        assert_eq!(
            WaiverDraft::new().validate().unwrap_err(),
            ValidationError::MissingField("jurisdiction")
        );
    }

    #[test]
    fn test_step_completion_tracks_answers() {
        let draft = draft_through_first_delivery(PaymentType::Final);
        assert!(draft.is_step_complete(WizardStep::FirstDelivery));
        assert!(!draft.is_step_complete(WizardStep::ProjectDetails));
        assert!(!draft.is_step_complete(WizardStep::Review));
    }
}
