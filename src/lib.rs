// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod util;

use crate::application::reconciler::{extract_candidates, in_input_order, pending};
use crate::application::{BuildOutcome, CardSource, DeckBuilder, LookupHistory};
use crate::cli::args::{Args, Command};
use crate::domain::{Card, Language};
use crate::infrastructure::deck_store::{write_deck, write_rows};
use crate::infrastructure::{Config, GeminiClient, KindleLookups};
use crate::util::text::clean_word;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a built deck goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    pub fn from_path(path: &Path) -> Self {
        if path == Path::new("-") {
            Output::Stdout
        } else {
            Output::File(path.to_path_buf())
        }
    }
}

/// Effective options after merging CLI flags, environment and config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub lang: Language,
    pub model: String,
    pub output: Output,
}

impl Settings {
    pub fn resolve(args: &Args, config: &Config) -> Self {
        let file = args
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.defaults.file));
        Self {
            lang: args.lang.unwrap_or(config.defaults.lang),
            model: args
                .model
                .clone()
                .unwrap_or_else(|| config.defaults.model.clone()),
            output: Output::from_path(&file),
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    debug!(command = ?args.command, "Starting karten");

    let config = match args.command {
        Command::InitConfig { .. } => Config::default(),
        _ => Config::load_or_default(args.config.as_deref())?,
    };
    let settings = Settings::resolve(&args, &config);
    debug!(?settings, "Resolved settings");

    match args.command {
        Command::Card { word } => {
            let client = GeminiClient::new(args.key.as_deref(), &settings.model)?;
            let card = lookup_card(&client, settings.lang, &word)?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        Command::Deck { words } => {
            let client = GeminiClient::new(args.key.as_deref(), &settings.model)?;
            let outcome = build_deck(&client, settings.lang, &words, &settings.output)?;
            report(&outcome);
        }
        Command::KindleDeck {
            kindle_dir,
            date_from,
        } => {
            let history = KindleLookups::new(resolve_kindle_dir(kindle_dir, &config)?);
            let client = GeminiClient::new(args.key.as_deref(), &settings.model)?;
            let outcome = build_kindle_deck(
                &client,
                &history,
                settings.lang,
                date_from,
                &settings.output,
            )?;
            report(&outcome);
        }
        Command::KindleWords {
            kindle_dir,
            date_from,
        } => {
            let history = KindleLookups::new(resolve_kindle_dir(kindle_dir, &config)?);
            let words = history.lookups(settings.lang, date_from)?;
            info!(
                count = words.len(),
                "{} words looked up since {date_from}",
                settings.lang.name()
            );
            for word in words {
                println!("{word}");
            }
        }
        Command::InitConfig { force } => {
            let path = init_config(args.config.as_deref(), force)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Write a default config file to `explicit`, else the default location
fn init_config(explicit: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(Config::default_path)
        .context("No config directory on this system, pass --config")?;
    Config::create_default(&path, force)?;
    info!(path = %path.display(), "Wrote default config");
    Ok(path)
}

fn resolve_kindle_dir(arg: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    arg.or_else(|| config.kindle_dir())
        .context("No Kindle directory given and none configured in [kindle] dir")
}

fn report(outcome: &BuildOutcome) {
    if let Some(summary) = outcome.failure_summary() {
        eprintln!("{summary}");
    }
    for failure in &outcome.failures {
        debug!(word = %failure.word, error = %failure.error, "Failure detail");
    }
}

/// Generate and normalize a single card
pub fn lookup_card(source: impl CardSource, lang: Language, word: &str) -> Result<Card> {
    let word = clean_word(word).context("Word must not be empty")?;
    let card = DeckBuilder::new(source, lang)
        .collect(&word)
        .with_context(|| format!("Failed to create card for '{word}'"))?;
    Ok(card)
}

/// Build cards for explicit words, processed in input order.
///
/// With a file output, words already on file are skipped and new cards are
/// appended.
pub fn build_deck(
    source: impl CardSource,
    lang: Language,
    words: &[String],
    output: &Output,
) -> Result<BuildOutcome> {
    let words: Vec<String> = words.iter().filter_map(|w| clean_word(w)).collect();
    let candidates: HashSet<String> = words.iter().cloned().collect();
    let todo = in_input_order(&words, &reconcile(candidates, output)?);
    generate_and_persist(source, lang, todo, output)
}

/// Build cards for words looked up on the Kindle since `date_from`.
///
/// Candidates are processed in sorted order.
pub fn build_kindle_deck(
    source: impl CardSource,
    history: &impl LookupHistory,
    lang: Language,
    date_from: NaiveDate,
    output: &Output,
) -> Result<BuildOutcome> {
    let candidates = extract_candidates(history, lang, date_from)
        .context("Failed to read Kindle lookups")?;
    let mut todo: Vec<String> = reconcile(candidates, output)?.into_iter().collect();
    todo.sort();
    generate_and_persist(source, lang, todo, output)
}

fn reconcile(candidates: HashSet<String>, output: &Output) -> Result<HashSet<String>> {
    let total = candidates.len();
    let todo = match output {
        Output::File(path) => pending(candidates, path)
            .with_context(|| format!("Failed to read existing deck {}", path.display()))?,
        Output::Stdout => candidates,
    };
    info!(
        candidates = total,
        skipped = total - todo.len(),
        "Words to generate: {}",
        todo.len()
    );
    Ok(todo)
}

fn generate_and_persist(
    source: impl CardSource,
    lang: Language,
    words: Vec<String>,
    output: &Output,
) -> Result<BuildOutcome> {
    let outcome = DeckBuilder::new(source, lang).build(words);

    match output {
        Output::File(path) => write_deck(&outcome.deck, path, true)?,
        Output::Stdout => {
            if !outcome.deck.is_empty() {
                write_rows(&outcome.deck, std::io::stdout().lock())
                    .context("Failed to write deck to stdout")?;
            }
        }
    }

    Ok(outcome)
}
