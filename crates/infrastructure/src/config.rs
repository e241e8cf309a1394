//! Application configuration
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults (every field has one)
//! 2. `vocabforge.toml` in the working directory, if present
//! 3. an explicit file passed on the command line
//! 4. environment variables such as `VOCABFORGE_ANKI__URL`

use std::path::{Path, PathBuf};

use ai_core::GenerationConfig;
use ai_speech::SpeechConfig;
use application::error::ApplicationError;
use application::services::CardAssemblyConfig;
use integration_anki::AnkiConfig;
use serde::{Deserialize, Serialize};

use crate::service::LauncherConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "VOCABFORGE";

/// Base name of the optional configuration file in the working directory
pub const CONFIG_FILE_NAME: &str = "vocabforge";

/// Where cards are put together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsConfig {
    /// Directory for temporary audio files (default: current directory)
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub anki: AnkiConfig,

    #[serde(default)]
    pub launcher: LauncherConfig,

    #[serde(default)]
    pub cards: CardsConfig,
}

impl AppConfig {
    /// Load configuration from the optional files and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing or any source
    /// fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.generation
            .validate()
            .and_then(|()| self.speech.validate())
            .and_then(|()| self.anki.validate())
            .and_then(|()| self.launcher.validate())
            .map_err(ApplicationError::Configuration)
    }

    /// Switch generation to the lite model
    #[must_use]
    pub fn with_lite_model(mut self) -> Self {
        self.generation = self.generation.lite();
        self
    }

    /// Settings for the card assembly service
    pub fn card_assembly(&self) -> CardAssemblyConfig {
        CardAssemblyConfig {
            work_dir: self.cards.work_dir.clone(),
            marker_tag: self.anki.tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn empty_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generation.model, "gemma3:12b");
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.launcher.max_attempts, 30);
        assert_eq!(config.launcher.poll_interval_ms, 2_000);
        assert_eq!(config.cards.work_dir, PathBuf::from("."));
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[generation]\nmodel = \"llama3\"\n\n[anki]\ntag = \"vocab\"\n\n[cards]\nwork_dir = \"/tmp/cards\""
        )
        .unwrap();

        let config = AppConfig::load_with_env(Some(file.path()), empty_env()).unwrap();

        assert_eq!(config.generation.model, "llama3");
        assert_eq!(config.generation.lite_model, "gemma3:4b");
        assert_eq!(config.anki.tag, "vocab");
        assert_eq!(config.anki.model_name, "Basic");
        assert_eq!(config.cards.work_dir, PathBuf::from("/tmp/cards"));
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[anki]\nurl = \"http://from-file:8765\"").unwrap();

        let mut env = config::Map::new();
        env.insert(
            "VOCABFORGE_ANKI__URL".to_string(),
            "http://from-env:8765".to_string(),
        );
        env.insert(
            "VOCABFORGE_LAUNCHER__MAX_ATTEMPTS".to_string(),
            "5".to_string(),
        );

        let config = AppConfig::load_with_env(Some(file.path()), Some(env)).unwrap();

        assert_eq!(config.anki.url, "http://from-env:8765");
        assert_eq!(config.launcher.max_attempts, 5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_with_env(Some(&dir.path().join("nope.toml")), empty_env());
        assert!(result.is_err());
    }

    #[test]
    fn invalid_section_fails_validation() {
        let mut config = AppConfig::default();
        config.launcher.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn lite_model_replaces_default() {
        let config = AppConfig::default().with_lite_model();
        assert_eq!(config.generation.model, "gemma3:4b");
    }

    #[test]
    fn card_assembly_uses_anki_tag() {
        let mut config = AppConfig::default();
        config.anki.tag = "vocab".to_string();
        config.cards.work_dir = PathBuf::from("/tmp/cards");

        let cards = config.card_assembly();
        assert_eq!(cards.marker_tag, "vocab");
        assert_eq!(cards.work_dir, PathBuf::from("/tmp/cards"));
    }
}
