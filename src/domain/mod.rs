// src/domain/mod.rs
pub mod card;
pub mod deck;
pub mod error;
pub mod language;
pub mod normalizer;

pub use card::{Card, CardRow, CARD_FIELDS};
pub use deck::Deck;
pub use error::{CardError, GenerationError, StoreError, WordError};
pub use language::Language;
