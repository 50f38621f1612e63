//! Wizard sessions
//!
//! A session walks the steps in order, carrying an explicit [`WaiverDraft`].
//! Answers are accepted only for the current step; Download is reached only
//! through a successful generation, and any change to the answers drops the
//! generated document.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use waiver_engine::GeneratedDocument;
use waiver_types::{StepInput, ValidationError, WaiverDraft, WaiverRequest, WizardStep};

#[derive(Debug, Clone)]
pub struct WizardSession {
    pub id: Uuid,
    pub step: WizardStep,
    pub draft: WaiverDraft,
    pub document: Option<GeneratedDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WizardSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            step: WizardStep::Welcome,
            draft: WaiverDraft::new(),
            document: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the answer for the current step and advance
    ///
    /// The session is unchanged when the answer is rejected. Review validates
    /// the whole draft but does not advance.
    pub fn apply(&mut self, input: StepInput) -> Result<(), ValidationError> {
        let got = input.step();
        if got != self.step {
            return Err(ValidationError::StepMismatch {
                expected: self.step,
                got,
            });
        }

        let draft = self.draft.clone().apply(input)?;
        if draft != self.draft {
            self.document = None;
        }
        self.draft = draft;
        if self.step < WizardStep::Review {
            self.step = self.step.next();
        }
        self.touch();
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = self.step.previous();
        self.touch();
    }

    /// The complete request, if the session is ready to generate
    pub fn ready_request(&self) -> Result<WaiverRequest, ValidationError> {
        if self.step < WizardStep::Review {
            return Err(ValidationError::StepMismatch {
                expected: self.step,
                got: WizardStep::Review,
            });
        }
        self.draft.validate()
    }

    pub fn complete(&mut self, document: GeneratedDocument) {
        self.document = Some(document);
        self.step = WizardStep::Download;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use waiver_engine::TemplateId;
    use waiver_types::{PaymentReceived, PaymentType, ProjectDetails, Role};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn answers() -> Vec<StepInput> {
        vec![
            StepInput::Welcome,
            StepInput::StateSelection {
                state: "Arizona".into(),
            },
            StepInput::Compliance { acknowledged: true },
            StepInput::Role {
                role: Role::Contractor,
            },
            StepInput::PaymentType {
                payment_type: PaymentType::Final,
            },
            StepInput::PaymentReceived {
                payment_received: PaymentReceived::Yes,
            },
            StepInput::FirstDelivery {
                first_delivery_date: date(2025, 1, 6),
            },
            StepInput::ProjectDetails(ProjectDetails {
                owner_name: "Jane Doe".into(),
                lienor_name: "Desert Framing LLC".into(),
                project_address: "100 Main St".into(),
                job_number: "J-42".into(),
                property_description: "Lot 7".into(),
                amount: "$5,000".into(),
                work_through_date: None,
                execution_date: date(2025, 11, 19),
            }),
        ]
    }

    #[test]
    fn test_walks_to_review() {
        let mut session = WizardSession::new();
        for input in answers() {
            session.apply(input).unwrap();
        }
        assert_eq!(session.step, WizardStep::Review);

        session.apply(StepInput::Review).unwrap();
        assert_eq!(session.step, WizardStep::Review);
        assert!(session.ready_request().is_ok());
    }

    #[test]
    fn test_out_of_order_input_is_rejected() {
        let mut session = WizardSession::new();
        let err = session
            .apply(StepInput::Compliance { acknowledged: true })
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::StepMismatch {
                expected: WizardStep::Welcome,
                got: WizardStep::Compliance,
            }
        );
        assert_eq!(session.step, WizardStep::Welcome);
    }

    #[test]
    fn test_rejected_answer_keeps_step() {
        let mut session = WizardSession::new();
        session.apply(StepInput::Welcome).unwrap();
        assert!(session
            .apply(StepInput::StateSelection {
                state: "Nevada".into()
            })
            .is_err());
        assert_eq!(session.step, WizardStep::StateSelection);
        assert!(session.draft.jurisdiction.is_none());
    }

    #[test]
    fn test_back_stops_at_welcome() {
        let mut session = WizardSession::new();
        session.back();
        assert_eq!(session.step, WizardStep::Welcome);
    }

    #[test]
    fn test_changed_answer_drops_generated_document() {
        let mut session = WizardSession::new();
        for input in answers() {
            session.apply(input).unwrap();
        }
        session.complete(GeneratedDocument {
            template: TemplateId::UnconditionalFinal,
            filename: "Lienify_AZ_Final_Unconditional_20251119.docx".into(),
            bytes: vec![1, 2, 3],
            content_type: "application/octet-stream",
            unresolved: Vec::new(),
        });

        // Step back to the payment answer without touching the draft
        while session.step > WizardStep::PaymentReceived {
            session.back();
        }
        assert!(session.document.is_some());

        session
            .apply(StepInput::PaymentReceived {
                payment_received: PaymentReceived::No,
            })
            .unwrap();
        assert!(session.document.is_none());
    }

    #[test]
    fn test_same_answer_keeps_generated_document() {
        let mut session = WizardSession::new();
        for input in answers() {
            session.apply(input).unwrap();
        }
        session.complete(GeneratedDocument {
            template: TemplateId::UnconditionalFinal,
            filename: "x.docx".into(),
            bytes: Vec::new(),
            content_type: "application/octet-stream",
            unresolved: Vec::new(),
        });
        session.back();
        session.apply(StepInput::Review).unwrap();
        assert!(session.document.is_some());
    }

    #[test]
    fn test_cannot_generate_before_review() {
        let session = WizardSession::new();
        assert!(matches!(
            session.ready_request(),
            Err(ValidationError::StepMismatch { .. })
        ));
    }
}
