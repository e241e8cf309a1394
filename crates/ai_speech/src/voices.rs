//! Language code to Piper voice mapping

use crate::config::SpeechConfig;

/// Built-in voices, one lightweight single-speaker model per language
pub const VOICE_MODELS: &[(&str, &str)] = &[
    ("en", "en_US-lessac-medium"),
    ("es", "es_ES-davefx-medium"),
    ("fr", "fr_FR-siwis-medium"),
    ("ru", "ru_RU-irina-medium"),
    ("pt", "pt_BR-faber-medium"),
    ("ar", "ar_JO-kareem-medium"),
    ("zh-cn", "zh_CN-huayan-medium"),
];

/// Resolve the voice for a language code
///
/// Configured overrides win over the built-in table; codes found in neither
/// use the configured default voice.
pub fn voice_for_language<'a>(config: &'a SpeechConfig, language_code: &str) -> &'a str {
    let code = language_code.to_lowercase();

    if let Some(voice) = config.voices.get(&code) {
        return voice;
    }

    VOICE_MODELS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(config.default_voice.as_str(), |(_, voice)| *voice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_uses_table() {
        let config = SpeechConfig::default();
        assert_eq!(voice_for_language(&config, "fr"), "fr_FR-siwis-medium");
        assert_eq!(voice_for_language(&config, "zh-cn"), "zh_CN-huayan-medium");
    }

    #[test]
    fn code_match_ignores_case() {
        let config = SpeechConfig::default();
        assert_eq!(voice_for_language(&config, "ZH-CN"), "zh_CN-huayan-medium");
    }

    #[test]
    fn unknown_code_uses_default_voice() {
        let config = SpeechConfig {
            default_voice: "en_GB-alan-medium".to_string(),
            ..Default::default()
        };
        assert_eq!(voice_for_language(&config, "bn"), "en_GB-alan-medium");
        assert_eq!(voice_for_language(&config, "ja"), "en_GB-alan-medium");
    }

    #[test]
    fn override_beats_table() {
        let mut config = SpeechConfig::default();
        config
            .voices
            .insert("es".to_string(), "es_MX-claude-high".to_string());
        assert_eq!(voice_for_language(&config, "es"), "es_MX-claude-high");
        assert_eq!(voice_for_language(&config, "fr"), "fr_FR-siwis-medium");
    }
}
