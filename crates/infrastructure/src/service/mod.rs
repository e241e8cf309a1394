//! Local service lifecycle: liveness probes and on-demand launching

pub mod known;
pub mod launcher;
pub mod probe;

pub use known::{AnkiVersionProbe, anki_descriptor, anki_probe, ollama_descriptor, ollama_probe};
pub use launcher::{
    DetachedSpawner, LaunchError, LauncherConfig, ProcessSpawner, ServiceDescriptor,
    ServiceLauncher,
};
pub use probe::{AvailabilityProbe, HttpProbe};
