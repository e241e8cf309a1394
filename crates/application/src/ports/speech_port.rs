//! Speech port - Interface for text-to-speech into audio files

use std::path::Path;

use async_trait::async_trait;
use domain::AudioArtifact;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Speak `text` in the voice for `language_code` into `destination`
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        destination: &Path,
    ) -> Result<AudioArtifact, ApplicationError>;
}
