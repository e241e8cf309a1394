//! Domain layer for vocabforge
//!
//! Contains the vocabulary card model: the word being studied, the
//! information generated for it, its audio artifacts and the flashcard that is
//! finally written to the store. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
