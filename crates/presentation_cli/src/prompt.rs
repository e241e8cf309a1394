//! Interactive questions asked on the terminal

use std::io::{self, BufRead, Write};

use application::CardError;
use application::ports::{ResponseReviewPort, ReviewDecision};
use async_trait::async_trait;
use tracing::warn;

use crate::batch::FailurePolicy;

/// Map a review answer to a decision
pub fn parse_review_answer(answer: &str) -> Option<ReviewDecision> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "o" | "oui" => Some(ReviewDecision::Accept),
        "n" | "no" | "non" => Some(ReviewDecision::Skip),
        "r" => Some(ReviewDecision::Regenerate),
        _ => None,
    }
}

/// Map a yes/no answer
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "o" | "oui" => Some(true),
        "n" | "no" | "non" => Some(false),
        _ => None,
    }
}

/// Ask `question` until `parse` accepts the answer
///
/// Returns `None` once stdin is closed or unreadable.
fn ask<T>(question: &str, hint: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{question}");
        if stdout.flush().is_err() {
            return None;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return None,
            Ok(_) => {},
            Err(e) => {
                warn!(error = %e, "Failed to read answer");
                return None;
            },
        }

        if let Some(value) = parse(&line) {
            return Some(value);
        }
        println!("{hint}");
    }
}

/// Shows each generated reply and asks what to do with it
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinReviewer;

#[async_trait]
impl ResponseReviewPort for StdinReviewer {
    async fn review(&self, word: &str, reply: &str) -> ReviewDecision {
        println!("\n=== Generated content for '{word}' ===");
        println!("{reply}");
        println!("\n  y - accept and create the card");
        println!("  n - skip this word");
        println!("  r - ask again");

        let answer = tokio::task::spawn_blocking(|| {
            ask(
                "Your choice (y/n/r): ",
                "Please answer y, n or r.",
                parse_review_answer,
            )
        })
        .await;

        match answer {
            Ok(Some(decision)) => decision,
            Ok(None) => ReviewDecision::Skip,
            Err(e) => {
                warn!(error = %e, "Review prompt failed");
                ReviewDecision::Skip
            },
        }
    }
}

/// Asks whether to go on after a failed word
#[derive(Debug, Clone, Copy, Default)]
pub struct AskUser;

#[async_trait]
impl FailurePolicy for AskUser {
    async fn continue_after(&self, _error: &CardError) -> bool {
        tokio::task::spawn_blocking(|| {
            ask(
                "Continue with the remaining words? (y/n): ",
                "Please answer y or n.",
                parse_yes_no,
            )
        })
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_answers() {
        assert_eq!(parse_review_answer("y\n"), Some(ReviewDecision::Accept));
        assert_eq!(parse_review_answer(" Oui "), Some(ReviewDecision::Accept));
        assert_eq!(parse_review_answer("N"), Some(ReviewDecision::Skip));
        assert_eq!(parse_review_answer("r"), Some(ReviewDecision::Regenerate));
        assert_eq!(parse_review_answer(""), None);
        assert_eq!(parse_review_answer("maybe"), None);
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(parse_yes_no("yes\n"), Some(true));
        assert_eq!(parse_yes_no("o"), Some(true));
        assert_eq!(parse_yes_no("non"), Some(false));
        assert_eq!(parse_yes_no("r"), None);
    }
}
