//! The word a card is being built for

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::language::{
    DEFAULT_LANGUAGE_CODE, language_code_for, normalize_language_name,
};

/// A word together with its source language
///
/// The language code is derived from the name once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    word: String,
    language_name: String,
    language_code: String,
}

impl WordRecord {
    /// Create a record for `word` in the language called `language`
    ///
    /// The word is trimmed and the language name normalized. Words containing
    /// path separators are rejected because they become part of file names.
    pub fn new(word: &str, language: &str) -> Result<Self, DomainError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(DomainError::EmptyWord);
        }
        if word.contains(['/', '\\']) {
            return Err(DomainError::ValidationError(format!(
                "word '{word}' contains a path separator"
            )));
        }

        let language_name = normalize_language_name(language);
        let language_code = language_code_for(&language_name).to_string();

        Ok(Self {
            word: word.to_string(),
            language_name,
            language_code,
        })
    }

    /// The word itself
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Normalized language name, also the deck name
    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    /// Resolved language code
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Whether the language resolved to the default code
    pub fn is_default_language(&self) -> bool {
        self.language_code == DEFAULT_LANGUAGE_CODE
    }
}
