//! Mapping a validated request onto template placeholder keys

use chrono::NaiveDate;
use waiver_types::{format_currency, WaiverRequest};

use crate::placeholder::{PlaceholderMap, TokenSyntax};

/// Display format for dates written into a waiver, e.g. `November 19, 2025`
pub const DATE_FORMAT: &str = "%B %d, %Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `OWNER_NAME` → `OwnerName`
pub fn camel_case(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Build the placeholder map for `request`
///
/// Every value is registered under its uppercase key and aliases, plus a
/// CamelCase variant of each (`OwnerName`, `Owner`) for templates that use
/// `{{OwnerName}}` style fields. Words common in statutory text (`STATE`,
/// `CLAIMANT`, `ROLE`, `JOB`, ...) are registered in wrapped forms only.
/// `today` fills `DATE`.
pub fn build_placeholder_map(request: &WaiverRequest, today: NaiveDate) -> PlaceholderMap {
    let mut fields = vec![
        field(&["OWNER_NAME", "OWNER"], &request.owner_name),
        field(
            &["LIENOR_NAME", "LIENOR", "CONTRACTOR_NAME", "CONTRACTOR"],
            &request.lienor_name,
        ),
        wrapped(&["CLAIMANT"], &request.lienor_name),
        field(&["PROJECT_ADDRESS", "ADDRESS"], &request.project_address),
        field(
            &["PROPERTY_DESCRIPTION", "JOB_DESCRIPTION"],
            &request.property_description,
        ),
        wrapped(&["JOB"], &request.property_description),
        field(&["JOB_NUMBER", "INVOICE_NUMBER"], &request.job_number),
        wrapped(&["INVOICE"], &request.job_number),
        field(&["PAYMENT_AMOUNT", "AMOUNT"], format_currency(request.amount)),
        wrapped(&["ROLE"], request.role.as_str()),
        wrapped(&["PAYMENT_TYPE"], request.payment_type.as_str()),
        wrapped(&["STATE"], request.jurisdiction.name()),
        field(&["FIRST_DELIVERY_DATE"], format_date(request.first_delivery_date)),
        field(&["EXECUTION_DATE"], format_date(request.execution_date)),
        field(&["DATE"], format_date(today)),
    ];
    if let Some(through) = request.work_through_date {
        fields.push(field(&["WORK_THROUGH_DATE"], format_date(through)));
    }

    let mut map = PlaceholderMap::new();
    for f in &fields {
        for key in f.keys {
            if f.bare {
                map.insert(*key, f.value.as_str());
            } else {
                for syntax in WRAPPED {
                    map.insert(syntax.wrap(key), f.value.as_str());
                }
            }
        }
    }
    for f in &fields {
        for key in f.keys {
            map.insert(camel_case(key), f.value.as_str());
        }
    }
    map
}

const WRAPPED: [TokenSyntax; 3] = [
    TokenSyntax::Bracketed,
    TokenSyntax::DoubleBraced,
    TokenSyntax::Braced,
];

struct Field {
    keys: &'static [&'static str],
    value: String,
    bare: bool,
}

fn field(keys: &'static [&'static str], value: impl Into<String>) -> Field {
    Field {
        keys,
        value: value.into(),
        bare: true,
    }
}

fn wrapped(keys: &'static [&'static str], value: impl Into<String>) -> Field {
    Field {
        bare: false,
        ..field(keys, value)
    }
}
