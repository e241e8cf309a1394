//! Adapters implementing the application ports

mod anki_store_adapter;
mod generation_adapter;
mod speech_adapter;

pub use anki_store_adapter::AnkiStoreAdapter;
pub use generation_adapter::GenerationAdapter;
pub use speech_adapter::SpeechAdapter;
