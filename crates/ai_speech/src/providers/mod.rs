//! Speech synthesis provider implementations
//!
//! Contains concrete implementations of the `TextToSpeech` trait.

pub mod piper;

pub use piper::PiperSynthesizer;
