/// Substrings that identify a questionnaire link. Matching is case-sensitive.
pub const FORM_URL_PATTERNS: &[&str] = &["docs.google.com/forms", "forms.gle"];

/// Whether `url` looks like a form link. A mismatch is a warning for the
/// caller to confirm, not an error.
pub fn is_form_url(url: &str) -> bool {
    FORM_URL_PATTERNS.iter().any(|pattern| url.contains(pattern))
}
