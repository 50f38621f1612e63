use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Kind of payment the waiver releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PaymentType {
    /// Interim/partial payment during an ongoing project
    Progress,
    /// Payment marking project completion
    Final,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Progress => "Progress",
            PaymentType::Final => "Final",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "progress" => Ok(PaymentType::Progress),
            "final" => Ok(PaymentType::Final),
            _ => Err(ValidationError::UnrecognizedAnswer {
                field: "payment_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the payment has already been received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PaymentReceived {
    Yes,
    No,
}

impl PaymentReceived {
    /// Received payments are released unconditionally
    pub fn is_unconditional(&self) -> bool {
        matches!(self, PaymentReceived::Yes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentReceived::Yes => "Yes",
            PaymentReceived::No => "No",
        }
    }
}

impl From<bool> for PaymentReceived {
    fn from(received: bool) -> Self {
        if received {
            PaymentReceived::Yes
        } else {
            PaymentReceived::No
        }
    }
}

impl fmt::Display for PaymentReceived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentReceived {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" => Ok(PaymentReceived::Yes),
            "no" | "false" => Ok(PaymentReceived::No),
            _ => Err(ValidationError::UnrecognizedAnswer {
                field: "payment_received",
                value: s.to_string(),
            }),
        }
    }
}

/// Role of the person filling out the waiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Owner,
    Contractor,
    Subcontractor,
    Supplier,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Contractor => "Contractor",
            Role::Subcontractor => "Subcontractor",
            Role::Supplier => "Supplier",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jurisdictions with an active template set
///
/// Only Arizona ships templates; any other state is rejected at the
/// state-selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Jurisdiction {
    Arizona,
}

impl Jurisdiction {
    /// Full state name
    pub fn name(&self) -> &'static str {
        match self {
            Jurisdiction::Arizona => "Arizona",
        }
    }

    /// Two-letter postal code, used in output filenames
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::Arizona => "AZ",
        }
    }

    /// Resolve a user-facing state name or code
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "arizona" | "az" => Ok(Jurisdiction::Arizona),
            _ => Err(ValidationError::UnsupportedJurisdiction(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_parses_case_insensitively() {
        assert_eq!("Progress".parse::<PaymentType>().unwrap(), PaymentType::Progress);
        assert_eq!(" final ".parse::<PaymentType>().unwrap(), PaymentType::Final);
        assert!("partial".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_payment_received_accepts_booleans() {
        assert_eq!("true".parse::<PaymentReceived>().unwrap(), PaymentReceived::Yes);
        assert_eq!("No".parse::<PaymentReceived>().unwrap(), PaymentReceived::No);
        assert!("maybe".parse::<PaymentReceived>().is_err());
    }

    #[test]
    fn test_received_means_unconditional() {
        assert!(PaymentReceived::Yes.is_unconditional());
        assert!(!PaymentReceived::No.is_unconditional());
        assert_eq!(PaymentReceived::from(true), PaymentReceived::Yes);
    }

    #[test]
    fn test_only_arizona_is_supported() {
        assert_eq!(Jurisdiction::from_name("Arizona").unwrap(), Jurisdiction::Arizona);
        assert_eq!(Jurisdiction::from_name("az").unwrap().code(), "AZ");
        assert!(matches!(
            Jurisdiction::from_name("Other"),
            Err(ValidationError::UnsupportedJurisdiction(_))
        ));
    }
}
