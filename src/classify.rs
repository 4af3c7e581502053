use serde::Serialize;

/// Inferred intent of a field, derived from its question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticType {
    Email,
    Phone,
    Name,
    Age,
    ShortText,
    Paragraph,
    Unclassified,
}

/// Ordered keyword rules; the first rule with a matching keyword wins.
///
/// "number" on its own also selects phone, so questions like "Room Number"
/// get a phone-shaped answer.
const RULES: &[(&[&str], SemanticType)] = &[
    (&["email", "mail", "e-mail"], SemanticType::Email),
    (&["phone", "mobile", "contact", "number"], SemanticType::Phone),
    (&["name"], SemanticType::Name),
    (&["age"], SemanticType::Age),
];

/// Classify a single-line field by its question text.
///
/// Empty text is `Unclassified`; text matching no rule is `ShortText`.
pub fn classify(question: &str) -> SemanticType {
    let question = question.trim().to_lowercase();
    if question.is_empty() {
        return SemanticType::Unclassified;
    }
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| question.contains(k)))
        .map(|(_, ty)| *ty)
        .unwrap_or(SemanticType::ShortText)
}
