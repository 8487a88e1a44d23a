// src/domain/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// A raw record could not be turned into a [`Card`](crate::domain::Card).
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Failed to parse card JSON ({source}): {raw}")]
    Malformed {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
    #[error("Card JSON is not an object: {raw}")]
    NotAnObject { raw: String },
    #[error("Card is missing field '{field}': {raw}")]
    MissingField { field: &'static str, raw: String },
    #[error("Card field '{field}' must be {expected}, got {found}: {raw}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
        raw: String,
    },
}

impl CardError {
    /// Name of the offending field, if the error concerns a single field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CardError::MissingField { field, .. } | CardError::InvalidField { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

/// Failures of the deck file and the lookup-history database.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error(
        "Malformed row {row} in {}: expected {expected} columns, found {found}",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        row: u64,
        expected: usize,
        found: usize,
    },
    #[error("Invalid card in row {row} of {}: {source}", path.display())]
    InvalidRow {
        path: PathBuf,
        row: u64,
        #[source]
        source: CardError,
    },
    #[error("Word '{word}' appears again in row {row} of {}", path.display())]
    DuplicateRow { path: PathBuf, row: u64, word: String },
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to process CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to query lookup history {}: {source}", path.display())]
    Sqlite {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Failures of the card-generation collaborator.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key must be provided (--key or GOOGLE_API_KEY)")]
    MissingApiKey,
    #[error("Request to model failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Model API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("No response text from model")]
    EmptyResponse,
}

/// Why a single word did not end up in the deck.
#[derive(Error, Debug)]
pub enum WordError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("A card for '{0}' is already in the deck")]
    Duplicate(String),
}
