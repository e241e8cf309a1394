//! Descriptors and probes for the services vocabforge relies on

use std::path::PathBuf;
use std::time::Duration;

use ai_core::GenerationConfig;
use async_trait::async_trait;
use integration_anki::{AnkiConfig, AnkiConnectClient, AnkiError};
use tracing::{debug, instrument};

use super::launcher::ServiceDescriptor;
use super::probe::{AvailabilityProbe, HttpProbe};

/// Ollama, started with `ollama serve`
pub fn ollama_descriptor() -> ServiceDescriptor {
    let mut candidates = vec![PathBuf::from("ollama")];
    if cfg!(windows) {
        candidates.push(PathBuf::from("ollama.exe"));
    }

    ServiceDescriptor {
        name: "Ollama".to_string(),
        candidates,
        args: vec!["serve".to_string()],
    }
}

/// Ollama is up when its model list answers
pub fn ollama_probe(config: &GenerationConfig) -> HttpProbe {
    HttpProbe::get(
        config.tags_url(),
        Duration::from_millis(config.probe_timeout_ms),
    )
}

/// The Anki desktop application, which hosts AnkiConnect
pub fn anki_descriptor() -> ServiceDescriptor {
    ServiceDescriptor {
        name: "Anki".to_string(),
        candidates: anki_candidates(
            cfg!(windows),
            std::env::var_os("LOCALAPPDATA").map(PathBuf::from),
        ),
        args: Vec::new(),
    }
}

/// AnkiConnect is up when it answers the `version` action
#[derive(Debug)]
pub struct AnkiVersionProbe {
    client: AnkiConnectClient,
}

#[async_trait]
impl AvailabilityProbe for AnkiVersionProbe {
    #[instrument(skip(self))]
    async fn is_up(&self) -> bool {
        match self.client.version().await {
            Ok(version) => {
                debug!(version, "AnkiConnect answered");
                true
            },
            Err(e) => {
                debug!(error = %e, "AnkiConnect probe failed");
                false
            },
        }
    }
}

/// Probe for AnkiConnect, bounded by the probe timeout
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialized.
pub fn anki_probe(config: &AnkiConfig) -> Result<AnkiVersionProbe, AnkiError> {
    let client = AnkiConnectClient::with_timeout(
        config.clone(),
        Duration::from_millis(config.probe_timeout_ms),
    )?;
    Ok(AnkiVersionProbe { client })
}

/// Usual install locations, then the search path
fn anki_candidates(windows: bool, local_app_data: Option<PathBuf>) -> Vec<PathBuf> {
    if windows {
        let mut candidates = vec![
            PathBuf::from(r"C:\Program Files\Anki\anki.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Anki\anki.exe"),
        ];
        if let Some(local) = local_app_data {
            candidates.push(local.join("Programs").join("Anki").join("anki.exe"));
        }
        candidates.push(PathBuf::from("anki.exe"));
        candidates.push(PathBuf::from("anki"));
        candidates
    } else {
        vec![
            PathBuf::from("/usr/bin/anki"),
            PathBuf::from("/usr/local/bin/anki"),
            PathBuf::from("/opt/anki/anki"),
            PathBuf::from("/Applications/Anki.app/Contents/MacOS/anki"),
            PathBuf::from("anki"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_is_served() {
        let descriptor = ollama_descriptor();
        assert_eq!(descriptor.name, "Ollama");
        assert_eq!(descriptor.candidates[0], PathBuf::from("ollama"));
        assert_eq!(descriptor.args, vec!["serve"]);
    }

    #[test]
    fn unix_candidates_end_with_search_path_lookup() {
        let candidates = anki_candidates(false, None);
        assert_eq!(candidates.first(), Some(&PathBuf::from("/usr/bin/anki")));
        assert!(candidates.contains(&PathBuf::from(
            "/Applications/Anki.app/Contents/MacOS/anki"
        )));
        assert_eq!(candidates.last(), Some(&PathBuf::from("anki")));
    }

    #[test]
    fn windows_candidates_include_local_app_data() {
        let candidates = anki_candidates(true, Some(PathBuf::from("/users/me/AppData/Local")));
        assert_eq!(
            candidates[2],
            PathBuf::from("/users/me/AppData/Local")
                .join("Programs")
                .join("Anki")
                .join("anki.exe")
        );
        assert_eq!(candidates.len(), 5);

        let without_local = anki_candidates(true, None);
        assert_eq!(without_local.len(), 4);
    }
}
