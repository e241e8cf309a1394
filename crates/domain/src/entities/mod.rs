//! Domain entities

pub mod audio_artifact;
pub mod flashcard;
pub mod word_info;
pub mod word_record;

pub use audio_artifact::AudioArtifact;
pub use flashcard::FlashcardRecord;
pub use word_info::ParsedWordInfo;
pub use word_record::WordRecord;
