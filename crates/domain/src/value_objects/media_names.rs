//! File naming for per-word audio
//!
//! Temporary files live next to the process while a card is assembled; the
//! stored names are what the card content refers to.

/// Audio file names derived from a single word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaNames {
    word: String,
}

impl MediaNames {
    /// Names for the given word
    pub fn for_word(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }

    /// Temporary file holding the word's pronunciation
    pub fn temp_word_audio(&self) -> String {
        format!("temp_word_{}.mp3", self.word)
    }

    /// Temporary file holding the example sentence
    pub fn temp_example_audio(&self) -> String {
        format!("temp_example_{}.mp3", self.word)
    }

    /// Media name of the word's pronunciation in the store
    pub fn word_audio(&self) -> String {
        format!("word_{}.mp3", self.word)
    }

    /// Media name of the example sentence in the store
    pub fn example_audio(&self) -> String {
        format!("example_{}.mp3", self.word)
    }
}

/// Inline audio reference understood by the flashcard store
pub fn sound_tag(filename: &str) -> String {
    format!("[sound:{filename}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_convention() {
        let names = MediaNames::for_word("hello");
        assert_eq!(names.temp_word_audio(), "temp_word_hello.mp3");
        assert_eq!(names.temp_example_audio(), "temp_example_hello.mp3");
        assert_eq!(names.word_audio(), "word_hello.mp3");
        assert_eq!(names.example_audio(), "example_hello.mp3");
    }

    #[test]
    fn names_keep_spaces() {
        let names = MediaNames::for_word("you nail it!");
        assert_eq!(names.word_audio(), "word_you nail it!.mp3");
    }

    #[test]
    fn sound_tag_wraps_filename() {
        assert_eq!(sound_tag("word_hello.mp3"), "[sound:word_hello.mp3]");
    }
}
