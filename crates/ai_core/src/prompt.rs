//! Prompt asking for the three-line word summary
//!
//! The definition is requested in French, the pivot language of the decks;
//! synonyms and example stay in the word's own language.

/// Build the prompt for `word` in `language`
pub fn word_info_prompt(word: &str, language: &str) -> String {
    let language = language.to_lowercase();
    format!(
        "Donne-moi des infos sur le mot {language} « {word} » :\n\
         \n\
         - Définition en français (courte phrase)\n\
         - Synonymes en {language}\n\
         - Exemple en {language}\n\
         \n\
         Supprime tout ce qui est entre parenthèses. Répond exactement dans ce format :\n\
         \n\
         Définition : …\n\
         Synonymes : …\n\
         Exemple : …\n"
    )
}
