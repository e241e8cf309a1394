//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: generation through
//! Ollama, speech through Piper and the flashcard store through AnkiConnect.
//! Also owns the liveness probes, on-demand service launching and
//! configuration loading.

pub mod adapters;
pub mod config;
pub mod service;

pub use adapters::*;
pub use config::{AppConfig, CardsConfig};
pub use service::{
    AvailabilityProbe, HttpProbe, LaunchError, LauncherConfig, ServiceDescriptor, ServiceLauncher,
};
