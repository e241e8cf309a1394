//! Anki store adapter - Implements FlashcardStorePort using integration_anki

use std::path::Path;

use application::error::ApplicationError;
use application::ports::FlashcardStorePort;
use async_trait::async_trait;
use domain::FlashcardRecord;
use integration_anki::{AnkiConfig, AnkiConnectClient, AnkiError};
use tracing::instrument;

/// Adapter for the Anki flashcard store
#[derive(Debug)]
pub struct AnkiStoreAdapter {
    client: AnkiConnectClient,
}

impl AnkiStoreAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: AnkiConfig) -> Result<Self, ApplicationError> {
        let client = AnkiConnectClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

fn store_error(err: &AnkiError) -> ApplicationError {
    ApplicationError::Store(err.to_string())
}

#[async_trait]
impl FlashcardStorePort for AnkiStoreAdapter {
    async fn ensure_deck(&self, deck_name: &str) -> Result<(), ApplicationError> {
        self.client
            .create_deck(deck_name)
            .await
            .map_err(|e| store_error(&e))
    }

    async fn store_media(&self, filename: &str, path: &Path) -> Result<(), ApplicationError> {
        self.client
            .store_media_file(filename, path)
            .await
            .map_err(|e| store_error(&e))
    }

    #[instrument(skip(self, card), fields(deck = %card.deck_name))]
    async fn add_note(&self, card: &FlashcardRecord) -> Result<u64, ApplicationError> {
        self.client
            .add_note(&card.deck_name, &card.front, &card.back, &card.tags)
            .await
            .map_err(|e| store_error(&e))
    }
}
