// src/application/deck_builder.rs
use crate::application::CardSource;
use crate::domain::normalizer::normalize;
use crate::domain::{Card, Deck, Language, WordError};
use tracing::{debug, info, instrument, warn};

/// A word that produced no card, with the reason.
#[derive(Debug)]
pub struct WordFailure {
    pub word: String,
    pub error: WordError,
}

/// Result of a batch run: the cards that succeeded and the words that did not.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub deck: Deck,
    pub failures: Vec<WordFailure>,
}

impl BuildOutcome {
    /// One-line report naming every failed word, `None` if all succeeded
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let words: Vec<&str> = self.failures.iter().map(|f| f.word.as_str()).collect();
        Some(format!("Failed to create cards for: {}", words.join(", ")))
    }
}

/// Generates cards word by word through a [`CardSource`].
pub struct DeckBuilder<S: CardSource> {
    source: S,
    lang: Language,
}

impl<S: CardSource> DeckBuilder<S> {
    pub fn new(source: S, lang: Language) -> Self {
        Self { source, lang }
    }

    /// Fetch and normalize the card for a single word
    #[instrument(level = "debug", skip(self))]
    pub fn collect(&self, word: &str) -> Result<Card, WordError> {
        let raw = self.source.fetch(word, self.lang)?;
        let card = normalize(&raw)?;
        Ok(card)
    }

    /// Build a deck from `words`, one at a time and in order.
    ///
    /// A failing word is recorded and the batch moves on to the next one.
    pub fn build<I>(&self, words: I) -> BuildOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let outcome = words
            .into_iter()
            .fold(BuildOutcome::default(), |mut outcome, word| {
                let result = self.collect(&word).and_then(|card| {
                    outcome
                        .deck
                        .push(card)
                        .map_err(|dup| WordError::Duplicate(dup.word))
                });
                match result {
                    Ok(()) => debug!(%word, "Card created"),
                    Err(error) => {
                        warn!(%word, %error, "Failed to create card");
                        outcome.failures.push(WordFailure { word, error });
                    }
                }
                outcome
            });

        info!(
            cards = outcome.deck.len(),
            failures = outcome.failures.len(),
            "Finished building deck"
        );
        outcome
    }
}
