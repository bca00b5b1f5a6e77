//! Query input capture and normalization.
//!
//! The search field is an injected anchor; the panel reads it through
//! `QueryField` and never looks it up globally.

use crate::constants::QUERY_MAX_LENGTH;
use crate::{LookupError, Result};

/// Text input the panel reads its query from
pub trait QueryField {
    /// Current raw text
    fn value(&self) -> &str;

    /// Replace the text
    fn set_value(&mut self, value: &str);

    /// Clear the text after a completed search
    fn clear(&mut self) {
        self.set_value("");
    }
}

/// Plain in-memory text field, edited character by character by the TUI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            text: value.to_string(),
        }
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }
}

impl QueryField for TextField {
    fn value(&self) -> &str {
        &self.text
    }

    fn set_value(&mut self, value: &str) {
        self.text = value.to_string();
    }
}

/// Trim, lowercase and sanitize a raw query.
///
/// Blank input is `EmptyQuery`; nothing should be requested for it.
pub fn normalize_query(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyQuery);
    }

    if trimmed.chars().count() > QUERY_MAX_LENGTH {
        return Err(LookupError::InvalidInput(format!(
            "Query cannot be longer than {} characters",
            QUERY_MAX_LENGTH
        )));
    }

    let sanitized: String = trimmed
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .to_lowercase();

    // A query made only of control characters is blank once they are gone
    if sanitized.trim().is_empty() {
        return Err(LookupError::EmptyQuery);
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  Blockchain ").unwrap(), "blockchain");
        assert_eq!(normalize_query("Chaîne De Blocs").unwrap(), "chaîne de blocs");
        assert_eq!(normalize_query("IA").unwrap(), "ia");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        for raw in ["", "   ", "\t\n", "\u{7}"] {
            assert!(
                matches!(normalize_query(raw), Err(LookupError::EmptyQuery)),
                "Failed for: {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_rejects_overlong() {
        let long = "a".repeat(QUERY_MAX_LENGTH + 1);
        assert!(matches!(
            normalize_query(&long),
            Err(LookupError::InvalidInput(_))
        ));
        let max = "a".repeat(QUERY_MAX_LENGTH);
        assert!(normalize_query(&max).is_ok());
    }

    #[test]
    fn test_normalize_strips_control_chars() {
        assert_eq!(normalize_query("bl\u{0}ock").unwrap(), "block");
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::new();
        field.push('I');
        field.push('A');
        assert_eq!(field.value(), "IA");
        assert_eq!(field.pop(), Some('A'));
        field.clear();
        assert_eq!(field.value(), "");

        let field = TextField::with_value("token");
        assert_eq!(field.value(), "token");
    }
}
