//! vocabforge CLI
//!
//! Creates vocabulary flashcards with generated definitions, synonyms,
//! examples and pronunciation audio.

#![allow(clippy::print_stdout)]

mod batch;
mod prompt;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::ports::{AcceptAll, ResponseReviewPort};
use application::{CardAssemblyPorts, CardAssemblyService};
use batch::{Batch, BatchEnd, BatchSummary, FailurePolicy, KeepGoing, split_words};
use clap::Parser;
use domain::{DEFAULT_LANGUAGE_NAME, LANGUAGES, normalize_language_name};
use infrastructure::service::{anki_descriptor, anki_probe, ollama_descriptor, ollama_probe};
use infrastructure::{
    AnkiStoreAdapter, AppConfig, GenerationAdapter, ServiceLauncher, SpeechAdapter,
};
use prompt::{AskUser, StdinReviewer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// vocabforge CLI
#[derive(Parser)]
#[command(name = "vocabforge")]
#[command(author, version, about = "Create Anki vocabulary cards with definitions, synonyms and audio", long_about = None)]
#[command(after_help = "Examples:
  vocabforge \"hello\"
  vocabforge \"hello; goodbye; you nail it!\"
  vocabforge \"hola\" \"espagnol\"
  vocabforge \"hello; goodbye\" -y")]
struct Cli {
    /// Word(s) to create cards for, separated by semicolons
    words: Option<String>,

    /// Language of the words, also the deck name
    #[arg(default_value = DEFAULT_LANGUAGE_NAME)]
    language: String,

    /// Accept generated content and keep going after failures without asking
    #[arg(short, long)]
    yes: bool,

    /// Use the lighter generation model
    #[arg(long)]
    lite: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Map the `-v` count to a log filter
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn print_languages() {
    println!("Please give at least one word. Use --help for more information.");
    println!("\nAvailable languages:");
    for language in LANGUAGES {
        println!("  - {} ({})", language.name, language.code);
    }
}

fn print_summary(summary: BatchSummary) {
    println!(
        "\n🎉 Done: {} created, {} skipped, {} failed",
        summary.created, summary.skipped, summary.failed
    );
}

/// Wire the adapters into a card assembly service
fn build_service(
    config: &AppConfig,
    speech: Arc<SpeechAdapter>,
    auto_accept: bool,
) -> anyhow::Result<CardAssemblyService> {
    let ollama = Arc::new(ServiceLauncher::new(
        ollama_descriptor(),
        Arc::new(ollama_probe(&config.generation)),
        config.launcher.clone(),
    ));
    let anki = Arc::new(ServiceLauncher::new(
        anki_descriptor(),
        Arc::new(anki_probe(&config.anki)?),
        config.launcher.clone(),
    ));

    let reviewer: Arc<dyn ResponseReviewPort> = if auto_accept {
        Arc::new(AcceptAll)
    } else {
        Arc::new(StdinReviewer)
    };

    let ports = CardAssemblyPorts {
        generation: Arc::new(GenerationAdapter::new(
            config.generation.clone(),
            ollama.clone(),
        )?),
        speech,
        store: Arc::new(AnkiStoreAdapter::new(config.anki.clone())?),
        store_service: anki,
        generation_service: ollama,
        reviewer,
    };

    Ok(CardAssemblyService::new(ports, config.card_assembly()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt::layer())
        .init();

    let Some(words) = cli.words.as_deref() else {
        print_languages();
        return Ok(ExitCode::FAILURE);
    };

    let words = split_words(words);
    let language = normalize_language_name(&cli.language);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.lite {
        config = config.with_lite_model();
    }
    config.validate()?;
    info!(model = %config.generation.model, language = %language, words = words.len(), "Starting");

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n⏹️  Stopping after the current word...");
            flag.store(true, Ordering::SeqCst);
        } else {
            warn!("Could not listen for Ctrl-C");
        }
    });

    let policy: Arc<dyn FailurePolicy> = if cli.yes {
        Arc::new(KeepGoing)
    } else {
        Arc::new(AskUser)
    };

    let speech = Arc::new(SpeechAdapter::piper(config.speech.clone())?);
    if !speech.is_available().await {
        println!("⚠️  Piper or its default voice was not found, audio synthesis will fail");
        warn!(voices_dir = %config.speech.voices_dir.display(), "Speech engine unavailable");
    }

    println!("🔗 Checking the connection to Anki...");
    let batch = Batch::new(build_service(&config, speech, cli.yes)?, policy, cancelled);
    let (summary, end) = batch.run(&words, &language).await;
    print_summary(summary);

    Ok(match end {
        BatchEnd::Completed | BatchEnd::Cancelled => ExitCode::SUCCESS,
        BatchEnd::Aborted => ExitCode::FAILURE,
    })
}
