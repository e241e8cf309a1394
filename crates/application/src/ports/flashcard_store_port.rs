//! Flashcard store port - Interface for decks, media and notes

use std::path::Path;

use async_trait::async_trait;
use domain::FlashcardRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the flashcard store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FlashcardStorePort: Send + Sync {
    /// Create the deck if it does not exist yet
    async fn ensure_deck(&self, deck_name: &str) -> Result<(), ApplicationError>;

    /// Upload the file at `path` as media named `filename`, overwriting
    async fn store_media(&self, filename: &str, path: &Path) -> Result<(), ApplicationError>;

    /// Add the note and return the store's identifier for it
    async fn add_note(&self, card: &FlashcardRecord) -> Result<u64, ApplicationError>;
}
