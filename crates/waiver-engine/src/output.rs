//! Output file naming

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::selector::TemplateId;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]").unwrap();
}

/// Make `name` safe to use as a download file name
///
/// Spaces become `_`; anything outside ASCII alphanumerics, `-`, `_` and
/// `.` is dropped. Leading dots are stripped so the result is never hidden.
pub fn sanitize_filename(name: &str) -> String {
    let spaced = name.trim().replace(' ', "_");
    let cleaned = UNSAFE_CHARS.replace_all(&spaced, "");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<Prefix>_<State>_<PaymentType>_<Conditional|Unconditional>_<YYYYMMDD>.<ext>`
pub fn output_filename(
    prefix: &str,
    state_code: &str,
    template: TemplateId,
    date: NaiveDate,
    extension: &str,
) -> String {
    let name = format!(
        "{}_{}_{}_{}_{}.{}",
        prefix,
        state_code,
        template.payment_type(),
        template.condition_label(),
        date.format("%Y%m%d"),
        extension.trim_start_matches('.')
    );
    sanitize_filename(&name)
}
