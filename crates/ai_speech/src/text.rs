//! Text clean-up before synthesis

/// Label the generator puts in front of the example sentence
const EXAMPLE_PREFIX: &str = "exemple :";

/// Remove a leading "Exemple :" label (any case) and surrounding whitespace
pub fn strip_example_prefix(text: &str) -> &str {
    let text = text.trim();
    match text.get(..EXAMPLE_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(EXAMPLE_PREFIX) => {
            text[EXAMPLE_PREFIX.len()..].trim()
        },
        _ => text,
    }
}
