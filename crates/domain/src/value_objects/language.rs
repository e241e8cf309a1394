//! Supported source languages
//!
//! Language names double as deck names, so they are kept in the same form the
//! user types them on the command line.

/// Code used when a language name is not in the table
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Language assumed when none is given
pub const DEFAULT_LANGUAGE_NAME: &str = "Anglais";

/// A source language known to the card generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code (with region suffix where the voice needs one)
    pub code: &'static str,
    /// Display name, also used as the deck name
    pub name: &'static str,
}

/// The most widely spoken languages
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "Anglais" },
    Language { code: "zh-cn", name: "Chinois" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "es", name: "Espagnol" },
    Language { code: "fr", name: "Français" },
    Language { code: "ar", name: "Arabe" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "ru", name: "Russe" },
    Language { code: "pt", name: "Portugais" },
    Language { code: "id", name: "Indonésien" },
];

/// Resolve a language name to its code, ignoring case
///
/// Unknown names resolve to [`DEFAULT_LANGUAGE_CODE`].
pub fn language_code_for(name: &str) -> &'static str {
    let wanted = name.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|lang| lang.name.to_lowercase() == wanted)
        .map_or(DEFAULT_LANGUAGE_CODE, |lang| lang.code)
}

/// Capitalize the first character and lowercase the rest
///
/// `"espagnol"` and `"ESPAGNOL"` both become `"Espagnol"`.
pub fn normalize_language_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
