// src/domain/language.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target language of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    Es,
}

impl Language {
    /// ISO 639-1 code, lowercase, as stored in the Kindle lookup database
    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::Es => "es",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::De => "German",
            Language::Es => "Spanish",
        }
    }

    /// Full request text for one word
    pub fn prompt_for(self, word: &str) -> String {
        format!("{}\n\nWord: {}", self.prompt(), word)
    }

    fn prompt(self) -> &'static str {
        match self {
            Language::De => GERMAN_PROMPT,
            Language::Es => SPANISH_PROMPT,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const GERMAN_PROMPT: &str = r#"I'm learning German and need help making flashcards.

I will give you a word and you give me a card formatted as a JSON object with these fields:

- word: the dictionary form of the word in German, with the article if it is a noun
- category: the part of speech
- definition: the meanings in English
- forms: the plural if it's a noun; the simple past and the past participle with its auxiliary if it's a verb; the comparative and superlative if it's an adjective
- example: a few German sentences using the word, showing the common prepositions and cases
- reverse: the example sentences translated into English, in the same order

Example:

{
  "word": "abholen",
  "category": "verb",
  "definition": ["to pick up", "to collect"],
  "forms": ["holte ab", "hat abgeholt"],
  "example": [
    "Ich hole dich am Bahnhof ab.",
    "Er hat das Paket bei der Post abgeholt."
  ],
  "reverse": [
    "I will pick you up at the train station.",
    "He picked up the package at the post office."
  ]
}"#;

const SPANISH_PROMPT: &str = r#"I'm learning Spanish and need help making flashcards.

I will give you a word and you give me a card formatted as a JSON object with these fields:

- word: the dictionary form of the word in Spanish, with the article if it is a noun
- category: the part of speech
- definition: the meanings in English
- forms: the plural if it's a noun; the first person preterite and the past participle if it's a verb; the feminine form if it's an adjective
- example: a few Spanish sentences using the word in common contexts
- reverse: the example sentences translated into English, in the same order

Example:

{
  "word": "recoger",
  "category": "verb",
  "definition": ["to pick up", "to collect"],
  "forms": ["recogí", "recogido"],
  "example": [
    "Te recojo en la estación.",
    "Recogió el paquete en correos."
  ],
  "reverse": [
    "I'll pick you up at the station.",
    "He picked up the package at the post office."
  ]
}"#;
