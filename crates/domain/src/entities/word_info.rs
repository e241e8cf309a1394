//! Structured word information parsed from generated text

use serde::{Deserialize, Serialize};

/// Definition, synonyms and example for one word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedWordInfo {
    pub definition: String,
    pub synonyms: String,
    pub example: String,
}

impl ParsedWordInfo {
    /// Parse a free-text reply
    ///
    /// Non-blank trimmed lines are assigned by position: first to
    /// `definition`, second to `synonyms`, third to `example`. Labels such as
    /// "Définition :" are kept verbatim. Missing lines leave the slot empty;
    /// this never fails.
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.lines().map(str::trim).filter(|line| !line.is_empty());
        let mut next = || lines.next().unwrap_or_default().to_string();

        Self {
            definition: next(),
            synonyms: next(),
            example: next(),
        }
    }

    /// Whether no line could be extracted at all
    pub fn is_empty(&self) -> bool {
        self.definition.is_empty() && self.synonyms.is_empty() && self.example.is_empty()
    }
}
