//! Processing a list of words one card at a time

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::{CardAssemblyService, CardError, CardOutcome};
use async_trait::async_trait;
use domain::WordRecord;
use tracing::{info, warn};

/// Split the `;`-separated word list, dropping empty entries
pub fn split_words(input: &str) -> Vec<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Decides whether a batch goes on after a failed word
#[async_trait]
pub trait FailurePolicy: Send + Sync {
    async fn continue_after(&self, error: &CardError) -> bool;
}

/// Always goes on
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepGoing;

#[async_trait]
impl FailurePolicy for KeepGoing {
    async fn continue_after(&self, _error: &CardError) -> bool {
        true
    }
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Why a batch stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEnd {
    /// Every word was processed
    Completed,
    /// Interrupted by the user between two words
    Cancelled,
    /// The user chose not to continue after a failure
    Aborted,
}

/// Runs the card assembly for each word in turn
pub struct Batch {
    service: CardAssemblyService,
    policy: Arc<dyn FailurePolicy>,
    cancelled: Arc<AtomicBool>,
}

impl std::fmt::Debug for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("service", &self.service)
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

impl Batch {
    pub fn new(
        service: CardAssemblyService,
        policy: Arc<dyn FailurePolicy>,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        Self {
            service,
            policy,
            cancelled,
        }
    }

    /// Create the cards for `words` in `language`, strictly one after another
    pub async fn run(&self, words: &[String], language: &str) -> (BatchSummary, BatchEnd) {
        let total = words.len();
        let mut summary = BatchSummary::default();

        if total > 1 {
            println!("\n🚀 Processing {total} words...");
        }

        for (index, word) in words.iter().enumerate() {
            if self.cancelled.load(Ordering::SeqCst) {
                println!("⏹️  Cancelled before '{word}'");
                info!(remaining = total - index, "Batch cancelled");
                return (summary, BatchEnd::Cancelled);
            }

            let position = index + 1;
            println!("\n[{position}/{total}] {word}");

            let result = match WordRecord::new(word, language) {
                Ok(record) => self.service.create_card(&record).await,
                Err(e) => Err(CardError::new(word.clone(), e.into())),
            };

            match result {
                Ok(CardOutcome::Created(card)) => {
                    summary.created += 1;
                    println!(
                        "✅ [{position}/{total}] Card created for '{}' in deck '{}'",
                        card.word, card.deck
                    );
                },
                Ok(CardOutcome::Skipped { word }) => {
                    summary.skipped += 1;
                    println!("⏭️  '{word}' skipped");
                },
                Err(e) => {
                    summary.failed += 1;
                    println!("❌ '{}': {}", e.word, e.source);
                    if e.source.is_service_failure() {
                        println!("   Check that Anki (with AnkiConnect) and Ollama are installed.");
                    }
                    warn!(word = %e.word, error = %e.source, "Card failed");

                    if !self.policy.continue_after(&e).await {
                        return (summary, BatchEnd::Aborted);
                    }
                },
            }
        }

        (summary, BatchEnd::Completed)
    }
}
