//! AI Speech - Text-to-Speech for vocabulary cards
//!
//! Provides the `TextToSpeech` port and a Piper-backed implementation that
//! keeps one loaded voice per model for the lifetime of the process.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains the concrete implementation (adapter)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{PiperSynthesizer, SpeechConfig, TextToSpeech};
//!
//! let tts = PiperSynthesizer::new(SpeechConfig::default())?;
//! tts.synthesize_to_file("Hello, how are you?", "en", Path::new("temp_example_hello.mp3")).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod text;
pub mod voices;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::piper::PiperSynthesizer;
pub use text::strip_example_prefix;
pub use voices::{VOICE_MODELS, voice_for_language};
