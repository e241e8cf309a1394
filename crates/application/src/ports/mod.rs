//! Port definitions for application layer
//!
//! Ports are interfaces that define how the card assembly use case reaches
//! the generation service, the speech engine, the flashcard store and the
//! user. Adapters in the infrastructure and presentation layers implement them.

mod flashcard_store_port;
mod generation_port;
mod review_port;
mod service_control_port;
mod speech_port;

pub use flashcard_store_port::FlashcardStorePort;
#[cfg(test)]
pub use flashcard_store_port::MockFlashcardStorePort;
pub use generation_port::GenerationPort;
#[cfg(test)]
pub use generation_port::MockGenerationPort;
#[cfg(test)]
pub use review_port::MockResponseReviewPort;
pub use review_port::{AcceptAll, ResponseReviewPort, ReviewDecision};
#[cfg(test)]
pub use service_control_port::MockServiceControlPort;
pub use service_control_port::ServiceControlPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::SpeechPort;
