//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur while assembling a card
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No launchable executable was found for a service that is down
    #[error("{service} is not running and no executable was found to start it")]
    ServiceNotFound { service: String },

    /// A service never became ready within the polling budget
    #[error("{service} did not become ready after {attempts} attempts")]
    ServiceUnavailable { service: String, attempts: u32 },

    /// Generation service reachable but the call failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Voice model load or audio write failed
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Deck, media or note rejected by the flashcard store
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Whether the error stems from a service that could not be brought up
    pub const fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::ServiceNotFound { .. } | Self::ServiceUnavailable { .. }
        )
    }
}

/// A failed card, tagged with the word it was for
#[derive(Debug, Error)]
#[error("Failed to create card for '{word}': {source}")]
pub struct CardError {
    pub word: String,
    #[source]
    pub source: ApplicationError,
}

impl CardError {
    pub fn new(word: impl Into<String>, source: ApplicationError) -> Self {
        Self {
            word: word.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_name_the_service() {
        let err = ApplicationError::ServiceUnavailable {
            service: "Ollama".to_string(),
            attempts: 30,
        };
        assert_eq!(
            err.to_string(),
            "Ollama did not become ready after 30 attempts"
        );
        assert!(err.is_service_failure());

        let err = ApplicationError::ServiceNotFound {
            service: "Anki".to_string(),
        };
        assert!(err.to_string().starts_with("Anki is not running"));
        assert!(err.is_service_failure());
    }

    #[test]
    fn step_errors_are_not_service_failures() {
        assert!(!ApplicationError::Store("duplicate".to_string()).is_service_failure());
        assert!(!ApplicationError::Generation("500".to_string()).is_service_failure());
    }

    #[test]
    fn card_error_carries_word_and_source() {
        let err = CardError::new("hello", ApplicationError::Synthesis("no voice".to_string()));
        assert_eq!(err.word, "hello");
        assert_eq!(
            err.to_string(),
            "Failed to create card for 'hello': Synthesis error: no voice"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::EmptyWord.into();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }
}
