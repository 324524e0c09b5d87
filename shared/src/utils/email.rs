//! Email address validation, normalization and masking.
//!
//! Login identifiers are treated strictly as scalar strings. Anything that
//! could be interpreted as a structured query fragment (braces, `$`, quotes,
//! control characters) is rejected before the identifier reaches a data
//! store.

use once_cell::sync::Lazy;
use regex::Regex;

/// Plain scalar address shape: local part, a single `@`, dotted domain.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex is valid")
});

/// Check that an email address has a plain, well-formed shape.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Normalize a login identifier to a scalar lowercase address.
///
/// Returns `None` when the input is not a plain address, including any
/// attempt at structural injection.
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().any(|c| c.is_control()) {
        return None;
    }
    if trimmed.contains(['{', '}', '$', '"', '\'', '\\']) {
        return None;
    }
    let normalized = trimmed.to_ascii_lowercase();
    if is_valid_email(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

/// Mask an email address for log output, keeping the first character of the
/// local part and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let head: String = local.chars().take(1).collect();
            format!("{head}***@{domain}")
        }
        _ => "***".to_string(),
    }
}
