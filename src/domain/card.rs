// src/domain/card.rs
use serde::Serialize;

/// Column order of the persisted deck file.
///
/// There is no header row, so this order is the file schema.
pub const CARD_FIELDS: [&str; 6] = [
    "word",
    "category",
    "definition",
    "forms",
    "example",
    "reverse",
];

/// Canonical flashcard record for one headword.
///
/// [`normalize`](crate::domain::normalizer::normalize) and
/// [`parse_from_storage`](crate::domain::normalizer::parse_from_storage) only
/// produce cards with a non-empty `word`. Fields are public, so a card built
/// by hand carries no such guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub word: String,
    pub category: String,
    pub definition: Vec<String>,
    pub forms: Vec<String>,
    pub example: Vec<String>,
    pub reverse: Vec<String>,
}

/// Flat shape of a card as stored in one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct CardRow {
    pub word: String,
    pub category: String,
    pub definition: String,
    pub forms: String,
    pub example: String,
    pub reverse: String,
}
