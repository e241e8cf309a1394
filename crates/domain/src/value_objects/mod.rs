//! Value objects - immutable lookup data and naming conventions

pub mod language;
pub mod media_names;

pub use language::{
    DEFAULT_LANGUAGE_CODE, DEFAULT_LANGUAGE_NAME, LANGUAGES, Language, language_code_for,
    normalize_language_name,
};
pub use media_names::{MediaNames, sound_tag};
