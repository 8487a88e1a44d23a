// src/domain/deck.rs
use crate::domain::card::Card;
use std::collections::HashSet;

/// Ordered collection of cards, the unit written to a deck file.
///
/// Insertion order becomes file order. A word can appear at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    words: HashSet<String>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card unless a card with the same word is already present.
    ///
    /// Returns the rejected card on a duplicate.
    pub fn push(&mut self, card: Card) -> Result<(), Card> {
        if !self.words.insert(card.word.clone()) {
            return Err(card);
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Set of headwords in the deck
    pub fn words(&self) -> HashSet<&str> {
        self.words.iter().map(String::as_str).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(word: &str) -> Card {
        Card {
            word: word.to_string(),
            category: "noun".to_string(),
            definition: vec![],
            forms: vec![],
            example: vec![],
            reverse: vec![],
        }
    }

    #[test]
    fn given_cards_when_pushing_then_preserves_insertion_order() {
        let mut deck = Deck::new();
        deck.push(card("Zug")).unwrap();
        deck.push(card("Auto")).unwrap();

        let words: Vec<_> = deck.iter().map(|c| c.word.as_str()).collect();

        assert_eq!(words, vec!["Zug", "Auto"]);
    }

    #[test]
    fn given_duplicate_word_when_pushing_then_rejects_card() {
        let mut deck = Deck::new();
        deck.push(card("Haus")).unwrap();

        let rejected = deck.push(card("Haus"));

        assert_eq!(rejected, Err(card("Haus")));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn given_words_differing_in_case_when_pushing_then_both_kept() {
        let mut deck = Deck::new();
        deck.push(card("essen")).unwrap();

        assert!(deck.push(card("Essen")).is_ok());
        assert_eq!(deck.words(), HashSet::from(["essen", "Essen"]));
    }

    #[test]
    fn given_many_cards_when_checking_membership_then_finds_each_word() {
        let mut deck = Deck::new();
        for i in 0..1000 {
            deck.push(card(&format!("Wort{i}"))).unwrap();
        }

        assert_eq!(deck.len(), 1000);
        assert!(deck.contains("Wort0"));
        assert!(deck.contains("Wort999"));
        assert!(!deck.contains("Wort1000"));
        assert!(deck.push(card("Wort500")).is_err());
    }

    #[test]
    fn given_new_deck_when_checking_then_is_empty() {
        let deck = Deck::new();

        assert!(deck.is_empty());
        assert!(!deck.contains("Haus"));
    }
}
