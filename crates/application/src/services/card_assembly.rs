//! Card assembly service
//!
//! Turns one word into one flashcard: make sure the store and the generation
//! service are up, generate and review the word information, synthesize the
//! word and example audio, upload both files and add the note. Temporary
//! audio is removed whatever the outcome.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use domain::{FlashcardRecord, MediaNames, ParsedWordInfo, WordRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{ApplicationError, CardError};
use crate::ports::{
    FlashcardStorePort, GenerationPort, ResponseReviewPort, ReviewDecision, ServiceControlPort,
    SpeechPort,
};

/// Card assembly configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardAssemblyConfig {
    /// Directory for temporary audio files (default: current directory)
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Marker tag added to every note
    #[serde(default = "default_marker_tag")]
    pub marker_tag: String,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_marker_tag() -> String {
    "auto-llm".to_string()
}

impl Default for CardAssemblyConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            marker_tag: default_marker_tag(),
        }
    }
}

/// The collaborators a card is assembled from
pub struct CardAssemblyPorts {
    pub generation: Arc<dyn GenerationPort>,
    pub speech: Arc<dyn SpeechPort>,
    pub store: Arc<dyn FlashcardStorePort>,
    /// Brings up the application hosting the flashcard store
    pub store_service: Arc<dyn ServiceControlPort>,
    /// Brings up the generation service
    pub generation_service: Arc<dyn ServiceControlPort>,
    pub reviewer: Arc<dyn ResponseReviewPort>,
}

/// A card that was written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardResult {
    pub word: String,
    pub deck: String,
    pub note_id: u64,
    /// Media file names as stored, word audio first
    pub media: Vec<String>,
}

/// How one word ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Created(CardResult),
    /// The reviewer declined the generated content
    Skipped { word: String },
}

/// Orchestrates the creation of one flashcard per call
pub struct CardAssemblyService {
    ports: CardAssemblyPorts,
    config: CardAssemblyConfig,
}

impl fmt::Debug for CardAssemblyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardAssemblyService")
            .field("config", &self.config)
            .field("store_service", &self.ports.store_service.service_name())
            .field(
                "generation_service",
                &self.ports.generation_service.service_name(),
            )
            .finish_non_exhaustive()
    }
}

/// Temporary audio paths for one word
struct TempAudio {
    word: PathBuf,
    example: PathBuf,
}

impl CardAssemblyService {
    pub fn new(ports: CardAssemblyPorts, config: CardAssemblyConfig) -> Self {
        Self { ports, config }
    }

    /// Assemble and store the card for `record`
    ///
    /// Steps run strictly in order and the first failure ends the card.
    /// Temporary audio is deleted before returning, on every path.
    #[instrument(skip(self, record), fields(word = %record.word(), language = %record.language_name()))]
    pub async fn create_card(&self, record: &WordRecord) -> Result<CardOutcome, CardError> {
        let names = MediaNames::for_word(record.word());
        let temp = TempAudio {
            word: self.config.work_dir.join(names.temp_word_audio()),
            example: self.config.work_dir.join(names.temp_example_audio()),
        };

        let result = self.assemble(record, &names, &temp).await;

        remove_temp_file(&temp.word).await;
        remove_temp_file(&temp.example).await;

        match &result {
            Ok(CardOutcome::Created(card)) => {
                info!(note_id = card.note_id, deck = %card.deck, "Card created");
            },
            Ok(CardOutcome::Skipped { .. }) => info!("Card skipped"),
            Err(e) => warn!(error = %e, "Card failed"),
        }

        result.map_err(|source| CardError::new(record.word(), source))
    }

    async fn assemble(
        &self,
        record: &WordRecord,
        names: &MediaNames,
        temp: &TempAudio,
    ) -> Result<CardOutcome, ApplicationError> {
        self.ports.store_service.ensure_running().await?;
        self.ports.generation_service.ensure_running().await?;

        let Some(reply) = self.generate_reviewed(record).await? else {
            return Ok(CardOutcome::Skipped {
                word: record.word().to_string(),
            });
        };

        let info = ParsedWordInfo::parse(&reply);
        if info.is_empty() {
            return Err(ApplicationError::Generation(
                "Reply contained no usable lines".to_string(),
            ));
        }
        debug!(definition = %info.definition, "Parsed word information");

        let code = record.language_code();
        let word_audio = self
            .ports
            .speech
            .synthesize(record.word(), code, &temp.word)
            .await?;
        let example_audio = self
            .ports
            .speech
            .synthesize(&info.example, code, &temp.example)
            .await?;

        let deck = record.language_name();
        self.ports.store.ensure_deck(deck).await?;

        let word_media = names.word_audio();
        let example_media = names.example_audio();
        self.ports
            .store
            .store_media(&word_media, word_audio.path())
            .await?;
        self.ports
            .store
            .store_media(&example_media, example_audio.path())
            .await?;

        let card = FlashcardRecord::compose(record, &info, &self.config.marker_tag);
        let note_id = self.ports.store.add_note(&card).await?;

        Ok(CardOutcome::Created(CardResult {
            word: record.word().to_string(),
            deck: card.deck_name,
            note_id,
            media: vec![word_media, example_media],
        }))
    }

    /// Generate until the reviewer accepts; `None` when it skips
    async fn generate_reviewed(
        &self,
        record: &WordRecord,
    ) -> Result<Option<String>, ApplicationError> {
        loop {
            let reply = self
                .ports
                .generation
                .generate_word_info(record.word(), record.language_name())
                .await?;

            match self.ports.reviewer.review(record.word(), &reply).await {
                ReviewDecision::Accept => return Ok(Some(reply)),
                ReviewDecision::Skip => return Ok(None),
                ReviewDecision::Regenerate => {
                    debug!(model = %self.ports.generation.model_name(), "Regenerating reply");
                },
            }
        }
    }
}

async fn remove_temp_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed temporary audio"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove temporary audio"),
    }
}
