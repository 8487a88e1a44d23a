// src/application/reconciler.rs
use crate::application::LookupHistory;
use crate::domain::{Language, StoreError};
use crate::infrastructure::deck_store;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Words from `candidates` that have no card in the deck file at `store_path` yet.
///
/// A missing deck file means nothing is on file, so all candidates are pending.
/// Any other read failure is propagated.
#[instrument(level = "debug", skip(candidates), fields(candidates = candidates.len()))]
pub fn pending(
    candidates: HashSet<String>,
    store_path: &Path,
) -> Result<HashSet<String>, StoreError> {
    if !store_path.exists() {
        debug!(?store_path, "No deck file yet, all candidates pending");
        return Ok(candidates);
    }

    let existing = deck_store::read_deck(store_path)?;
    let on_file = existing.words();
    let pending: HashSet<String> = candidates
        .into_iter()
        .filter(|word| !on_file.contains(word.as_str()))
        .collect();

    info!(
        on_file = on_file.len(),
        pending = pending.len(),
        "Reconciled candidates against deck"
    );
    Ok(pending)
}

/// Distinct words looked up in `lang` on or after `date_from`.
pub fn extract_candidates(
    history: &impl LookupHistory,
    lang: Language,
    date_from: NaiveDate,
) -> Result<HashSet<String>, StoreError> {
    let words = history.lookups(lang, date_from)?;
    Ok(words.into_iter().collect())
}

/// Pending words in the order they were given, each at most once.
pub fn in_input_order(words: &[String], pending: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .filter(|w| pending.contains(*w) && seen.insert(w.as_str()))
        .cloned()
        .collect()
}
