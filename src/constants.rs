// src/constants.rs
//
// Application-wide constants: storage separators, defaults and limits.

/// Maximum number of characters of a raw model response echoed in error messages.
///
/// Responses longer than this are cut on a character boundary and suffixed
/// with `...`.
///
/// Used in: `domain/normalizer.rs`
pub const RAW_ECHO_LIMIT: usize = 500;

/// Separator between definitions in the `definition` column.
pub const DEFINITION_SEPARATOR: &str = "; ";

/// Separator between inflected forms in the `forms` column.
pub const FORMS_SEPARATOR: &str = " | ";

/// Separator between sentences in the `example` and `reverse` columns.
///
/// Anki renders it as a blank line between sentences.
pub const SENTENCE_SEPARATOR: &str = "<br/><br/>";

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Earliest lookup date considered when `--date-from` is omitted.
pub const DEFAULT_DATE_FROM: &str = "2000-01-01";

/// Base URL of the Gemini REST API.
///
/// Used in: `infrastructure/gemini.rs`
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Location of the lookup database relative to the Kindle mount point.
///
/// Used in: `infrastructure/kindle.rs`
pub const KINDLE_VOCAB_DB: &str = "system/vocabulary/vocab.db";

/// Upper bound for a single generation request. There are no retries.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;
