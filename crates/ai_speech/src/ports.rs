//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that speech synthesis adapters must implement.

use std::path::Path;

use async_trait::async_trait;

use crate::error::SpeechError;

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to an audio file on disk.
///
/// # Example
///
/// ```ignore
/// use ai_speech::TextToSpeech;
///
/// async fn speak_word(tts: &impl TextToSpeech, word: &str) -> Result<(), SpeechError> {
///     tts.synthesize_to_file(word, "en", Path::new("temp_word.mp3")).await
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` spoken in `language_code` into `destination`
    ///
    /// A leading "Exemple :" label is removed before synthesis. An existing
    /// file at `destination` is replaced.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the voice cannot be loaded, the text is empty
    /// or the audio cannot be written.
    async fn synthesize_to_file(
        &self,
        text: &str,
        language_code: &str,
        destination: &Path,
    ) -> Result<(), SpeechError>;

    /// Check if the TTS engine is installed and usable
    async fn is_available(&self) -> bool;
}
