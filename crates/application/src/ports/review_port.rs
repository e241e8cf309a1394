//! Review port - Let the user vet generated content

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// What to do with a generated reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Use the reply for the card
    Accept,
    /// Drop this word without creating a card
    Skip,
    /// Ask the generation service again
    Regenerate,
}

/// Port for reviewing generated replies before they become a card
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResponseReviewPort: Send + Sync {
    async fn review(&self, word: &str, reply: &str) -> ReviewDecision;
}

/// Reviewer that accepts every reply
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl ResponseReviewPort for AcceptAll {
    async fn review(&self, _word: &str, _reply: &str) -> ReviewDecision {
        ReviewDecision::Accept
    }
}
