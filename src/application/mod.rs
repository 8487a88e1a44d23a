// src/application/mod.rs
pub mod deck_builder;
pub mod reconciler;

use crate::domain::{GenerationError, Language, StoreError};
use chrono::NaiveDate;

pub use deck_builder::{BuildOutcome, DeckBuilder, WordFailure};

/// Produces raw card JSON for a word. The text is untrusted.
pub trait CardSource {
    fn fetch(&self, word: &str, lang: Language) -> Result<String, GenerationError>;
}

/// Read-only history of words the user looked up.
pub trait LookupHistory {
    /// Distinct words looked up in `lang` on or after `since`, most recent first
    fn lookups(&self, lang: Language, since: NaiveDate) -> Result<Vec<String>, StoreError>;
}

impl<S: CardSource + ?Sized> CardSource for &S {
    fn fetch(&self, word: &str, lang: Language) -> Result<String, GenerationError> {
        (**self).fetch(word, lang)
    }
}
