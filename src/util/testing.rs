// src/util/testing.rs

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CardSource, LookupHistory};
use crate::domain::{GenerationError, Language, StoreError};

/// Well-formed model response for `word`, with two of everything
pub fn card_json(word: &str) -> String {
    json!({
        "word": word,
        "category": "cat",
        "definition": ["def1", "def2", "def3"],
        "forms": ["form1", "form2"],
        "example": ["ex1", "ex2"],
        "reverse": ["rev1", "rev2"],
    })
    .to_string()
}

enum Response {
    Raw(String),
    Empty,
    Api(u16, String),
}

/// Canned card source for testing deck building without a model
///
/// Words without a configured response fail with an API error (404).
/// Every call is recorded and available through [`MockCardSource::calls`].
///
/// # Examples
///
/// ```
/// use karten::util::testing::MockCardSource;
///
/// let source = MockCardSource::builder()
///     .with_card("Haus")
///     .with_raw("kaputt", "not json")
///     .build();
/// ```
pub struct MockCardSource {
    responses: HashMap<String, Response>,
    calls: RefCell<Vec<String>>,
}

impl MockCardSource {
    pub fn builder() -> MockCardSourceBuilder {
        MockCardSourceBuilder::new()
    }

    /// Words fetched so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CardSource for MockCardSource {
    fn fetch(&self, word: &str, _lang: Language) -> Result<String, GenerationError> {
        self.calls.borrow_mut().push(word.to_string());
        match self.responses.get(word) {
            Some(Response::Raw(raw)) => Ok(raw.clone()),
            Some(Response::Empty) => Err(GenerationError::EmptyResponse),
            Some(Response::Api(status, message)) => Err(GenerationError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Err(GenerationError::Api {
                status: 404,
                message: format!("no canned response for '{word}'"),
            }),
        }
    }
}

/// Builder for MockCardSource
pub struct MockCardSourceBuilder {
    responses: HashMap<String, Response>,
}

impl MockCardSourceBuilder {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Answer `word` with a well-formed card for the same word
    pub fn with_card(self, word: &str) -> Self {
        let raw = card_json(word);
        self.with_raw(word, &raw)
    }

    /// Answer `word` with arbitrary text
    pub fn with_raw(mut self, word: &str, raw: &str) -> Self {
        self.responses
            .insert(word.to_string(), Response::Raw(raw.to_string()));
        self
    }

    /// Answer `word` with a response that carries no text
    pub fn with_empty_response(mut self, word: &str) -> Self {
        self.responses.insert(word.to_string(), Response::Empty);
        self
    }

    /// Answer `word` with an API error
    pub fn with_api_error(mut self, word: &str, status: u16, message: &str) -> Self {
        self.responses
            .insert(word.to_string(), Response::Api(status, message.to_string()));
        self
    }

    pub fn build(self) -> MockCardSource {
        MockCardSource {
            responses: self.responses,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Default for MockCardSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory lookup history, ignoring dates
pub struct MockLookupHistory {
    lookups: HashMap<Language, Vec<String>>,
    unavailable: bool,
}

impl MockLookupHistory {
    pub fn builder() -> MockLookupHistoryBuilder {
        MockLookupHistoryBuilder::new()
    }
}

impl LookupHistory for MockLookupHistory {
    fn lookups(&self, lang: Language, _since: NaiveDate) -> Result<Vec<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::NotFound("vocab.db".into()));
        }
        Ok(self.lookups.get(&lang).cloned().unwrap_or_default())
    }
}

/// Builder for MockLookupHistory
pub struct MockLookupHistoryBuilder {
    lookups: HashMap<Language, Vec<String>>,
    unavailable: bool,
}

impl MockLookupHistoryBuilder {
    pub fn new() -> Self {
        Self {
            lookups: HashMap::new(),
            unavailable: false,
        }
    }

    /// Words returned for `lang`, as given (duplicates kept)
    pub fn with_lookups(mut self, lang: Language, words: &[&str]) -> Self {
        self.lookups
            .entry(lang)
            .or_default()
            .extend(words.iter().map(|w| w.to_string()));
        self
    }

    /// Make every query fail as if the database were missing
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn build(self) -> MockLookupHistory {
        MockLookupHistory {
            lookups: self.lookups,
            unavailable: self.unavailable,
        }
    }
}

impl Default for MockLookupHistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["reqwest", "hyper", "rustls", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
