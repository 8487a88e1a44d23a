use anyhow::{Context, Result};
use chrono::NaiveDate;
use karten::domain::normalizer::normalize;
use karten::domain::Deck;
use karten::infrastructure::deck_store::{read_deck, write_deck};
use karten::infrastructure::kindle::start_of_day_millis;
use karten::util::testing::card_json;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Deck file in a temporary directory, removed on drop
#[allow(dead_code)]
pub struct TestDeckFile {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDeckFile {
    /// Path to a deck file that does not exist yet
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("deck.csv");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Deck file already holding cards for `words`
    pub fn with_words(words: &[&str]) -> Result<Self> {
        let file = Self::new()?;
        write_deck(&deck_of(words)?, &file.path, false)?;
        Ok(file)
    }

    /// Headwords on file, in file order
    pub fn words(&self) -> Result<Vec<String>> {
        let deck = read_deck(&self.path)?;
        Ok(deck.iter().map(|c| c.word.clone()).collect())
    }
}

/// Deck with the canned test card for every word
#[allow(dead_code)]
pub fn deck_of(words: &[&str]) -> Result<Deck> {
    let mut deck = Deck::new();
    for word in words {
        deck.push(normalize(&card_json(word))?)
            .map_err(|c| anyhow::anyhow!("duplicate word {}", c.word))?;
    }
    Ok(deck)
}

/// Mounted Kindle with a `vocab.db` holding the given lookups
#[allow(dead_code)]
pub struct TestKindle {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestKindle {
    /// Lookups as `(stem, lang, date)`; later entries on the same day are more recent
    pub fn new(lookups: &[(&str, &str, NaiveDate)]) -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let vocab_dir = temp_dir.path().join("system").join("vocabulary");
        std::fs::create_dir_all(&vocab_dir).context("Failed to create vocabulary directory")?;

        let conn = Connection::open(vocab_dir.join("vocab.db"))?;
        conn.execute_batch(
            "CREATE TABLE WORDS (id TEXT PRIMARY KEY NOT NULL UNIQUE, word TEXT, stem TEXT, \
             lang TEXT, category INTEGER DEFAULT 0, timestamp INTEGER DEFAULT 0, profileid TEXT);",
        )?;
        for (i, (stem, lang, date)) in lookups.iter().enumerate() {
            conn.execute(
                "INSERT INTO WORDS (id, word, stem, lang, timestamp) VALUES (?1, ?2, ?2, ?3, ?4)",
                params![
                    format!("{lang}:{stem}:{i}"),
                    stem,
                    lang,
                    start_of_day_millis(*date) + i as i64
                ],
            )?;
        }

        Ok(Self { temp_dir })
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
