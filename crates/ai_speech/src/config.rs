//! Configuration for speech synthesis

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the Piper speech engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Piper executable (name on PATH or full path)
    #[serde(default = "default_executable")]
    pub piper_executable: PathBuf,

    /// Extra arguments placed before the generated ones
    #[serde(default)]
    pub piper_args: Vec<String>,

    /// Directory holding `<voice>.onnx` and `<voice>.onnx.json` files
    #[serde(default = "default_voices_dir")]
    pub voices_dir: PathBuf,

    /// Voice used for languages without a dedicated model
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Language code to voice overrides, consulted before the built-in table
    #[serde(default)]
    pub voices: HashMap<String, String>,

    /// Phoneme length multiplier (> 1.0 speaks slower)
    #[serde(default = "default_length_scale")]
    pub length_scale: f32,

    /// Per-utterance timeout in milliseconds, model load included
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_executable() -> PathBuf {
    PathBuf::from("piper")
}

fn default_voices_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("piper")
        .join("voices")
}

fn default_voice() -> String {
    "en_US-lessac-medium".to_string()
}

const fn default_length_scale() -> f32 {
    1.0
}

const fn default_timeout_ms() -> u64 {
    60_000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            piper_executable: default_executable(),
            piper_args: Vec::new(),
            voices_dir: default_voices_dir(),
            default_voice: default_voice(),
            voices: HashMap::new(),
            length_scale: default_length_scale(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SpeechConfig {
    /// Path of the ONNX model for a voice
    pub fn model_path(&self, voice: &str) -> PathBuf {
        self.voices_dir.join(format!("{voice}.onnx"))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.piper_executable.as_os_str().is_empty() {
            return Err("Piper executable must not be empty".to_string());
        }

        if self.default_voice.trim().is_empty() {
            return Err("Default voice must not be empty".to_string());
        }

        if !(0.1..=5.0).contains(&self.length_scale) {
            return Err(format!(
                "Length scale must be between 0.1 and 5.0, got {}",
                self.length_scale
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = SpeechConfig::default();

        assert_eq!(config.piper_executable, PathBuf::from("piper"));
        assert!(config.piper_args.is_empty());
        assert!(config.voices_dir.ends_with("piper/voices"));
        assert_eq!(config.default_voice, "en_US-lessac-medium");
        assert!(config.voices.is_empty());
        assert!((config.length_scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.timeout_ms, 60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn model_path_appends_onnx() {
        let config = SpeechConfig {
            voices_dir: PathBuf::from("/models"),
            ..Default::default()
        };
        assert_eq!(
            config.model_path("fr_FR-siwis-medium"),
            PathBuf::from("/models/fr_FR-siwis-medium.onnx")
        );
    }

    #[test]
    fn validate_rejects_length_scale_out_of_range() {
        let config = SpeechConfig {
            length_scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SpeechConfig {
            length_scale: 6.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = SpeechConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("Timeout"));
    }

    #[test]
    fn validate_rejects_empty_default_voice() {
        let config = SpeechConfig {
            default_voice: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_from_toml_with_overrides() {
        let toml_str = r#"
            voices_dir = "/srv/voices"
            default_voice = "en_GB-alan-medium"

            [voices]
            es = "es_MX-claude-high"
        "#;

        let config: SpeechConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voices_dir, PathBuf::from("/srv/voices"));
        assert_eq!(config.default_voice, "en_GB-alan-medium");
        assert_eq!(config.voices.get("es").map(String::as_str), Some("es_MX-claude-high"));
        assert_eq!(config.timeout_ms, 60_000);
    }
}
