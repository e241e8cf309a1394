//! Generation port - Interface for producing word information text

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the text generation service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Ask for definition, synonyms and example of `word` in `language`
    ///
    /// Returns the raw reply; parsing is left to the caller.
    async fn generate_word_info(
        &self,
        word: &str,
        language: &str,
    ) -> Result<String, ApplicationError>;

    /// Name of the model replies come from
    fn model_name(&self) -> String;
}
