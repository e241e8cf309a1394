//! Synthesized audio living on disk for the duration of one card

use std::path::{Path, PathBuf};

/// An audio file together with what it was synthesized from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    path: PathBuf,
    text: String,
    language_code: String,
}

impl AudioArtifact {
    pub fn new(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            language_code: language_code.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }
}
