pub mod amount;
pub mod error;
pub mod request;
pub mod types;
pub mod wizard;

pub use amount::{format_currency, parse_amount};
pub use error::ValidationError;
pub use request::{WaiverDraft, WaiverRequest};
pub use types::{Jurisdiction, PaymentReceived, PaymentType, Role};
pub use wizard::{ProjectDetails, StepInput, WizardStep};
