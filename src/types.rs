//! Core type definitions shared by the locator and the extraction engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Translation identifier (e.g. "KJV"), stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationCode(String);

impl TranslationCode {
    /// Create a new `TranslationCode`, trimming and upper-casing the input.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TranslationCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TranslationCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for TranslationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single verse extracted from marked-up text, with markup stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Book code the caller asked for (e.g. "GEN").
    pub book: String,
    /// Chapter number.
    pub chapter: u32,
    /// Verse number.
    pub number: u32,
    /// Plain text.
    pub text: String,
    /// Set when the verse starts on a poetry line.
    pub is_poetry: bool,
    /// Poetry indentation, 0 for prose and 1-4 for poetry.
    pub poetry_level: u8,
    /// Set when a paragraph break precedes the verse.
    pub is_new_paragraph: bool,
}

impl Verse {
    /// Stand-in verse returned when the backing text is unavailable.
    pub fn placeholder(book: impl Into<String>, chapter: u32, number: u32, text: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter,
            number,
            text: text.into(),
            is_poetry: false,
            poetry_level: 0,
            is_new_paragraph: false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn translation_code_normalizes() {
        let code = TranslationCode::from(" kjv ");
        assert_eq!(code.as_str(), "KJV");
        assert_eq!(code, TranslationCode::new("KJV"));
    }

    #[test]
    fn placeholder_is_plain_prose() {
        let v = Verse::placeholder("GEN", 1, 1, "[Missing translation: XYZ]");
        assert!(!v.is_poetry);
        assert_eq!(v.poetry_level, 0);
        assert!(!v.is_new_paragraph);
        assert_eq!(v.text, "[Missing translation: XYZ]");
    }
}
