//! Flashcard content as written to the store

use serde::{Deserialize, Serialize};

use crate::entities::{ParsedWordInfo, WordRecord};
use crate::value_objects::media_names::{MediaNames, sound_tag};

/// A two-sided note ready to be added to a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    pub deck_name: String,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
}

impl FlashcardRecord {
    /// Compose the card for `record` from its parsed information
    ///
    /// The deck is the language name. The front carries the word's audio only
    /// when the language resolved to the default code; other languages get the
    /// bare word. The back lists the three parsed lines separated by `<br>`,
    /// followed by the example audio.
    pub fn compose(record: &WordRecord, info: &ParsedWordInfo, marker_tag: &str) -> Self {
        let names = MediaNames::for_word(record.word());

        let front = if record.is_default_language() {
            format!("{} {}", record.word(), sound_tag(&names.word_audio()))
        } else {
            record.word().to_string()
        };

        let back = format!(
            "{}<br>{}<br>{} {}",
            info.definition,
            info.synonyms,
            info.example,
            sound_tag(&names.example_audio())
        );

        Self {
            deck_name: record.language_name().to_string(),
            front,
            back,
            tags: vec![
                marker_tag.to_string(),
                record.language_name().to_lowercase(),
            ],
        }
    }
}
