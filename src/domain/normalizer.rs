// src/domain/normalizer.rs
//
// Turns untrusted model output and persisted CSV rows into canonical cards.
use crate::constants::{
    DEFINITION_SEPARATOR, FORMS_SEPARATOR, RAW_ECHO_LIMIT, SENTENCE_SEPARATOR,
};
use crate::domain::card::{Card, CardRow};
use crate::domain::error::CardError;
use crate::util::text::truncate_chars;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// A JSON value did not have a shape coercible to the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

/// Coerce a JSON value into a text field.
///
/// `null` becomes the empty string, strings pass through, anything else is
/// rejected.
pub fn coerce_text(value: &Value) -> Result<String, ShapeMismatch> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => Err(ShapeMismatch {
            expected: "a string",
            found: json_kind(other),
        }),
    }
}

/// Coerce a JSON value into a list field.
///
/// `null` becomes an empty list, a bare string becomes a one-element list,
/// a list of strings passes through. Numbers, booleans, objects and lists
/// holding anything but strings are rejected.
pub fn coerce_list(value: &Value) -> Result<Vec<String>, ShapeMismatch> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ShapeMismatch {
                    expected: "a list of strings",
                    found: json_kind(other),
                }),
            })
            .collect(),
        other => Err(ShapeMismatch {
            expected: "a string or a list of strings",
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Field accessor that attaches the field name and the raw input to failures.
struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
    raw: &'a str,
}

impl RawRecord<'_> {
    fn get(&self, field: &'static str) -> Result<&Value, CardError> {
        self.fields.get(field).ok_or_else(|| CardError::MissingField {
            field,
            raw: echo(self.raw),
        })
    }

    fn text(&self, field: &'static str) -> Result<String, CardError> {
        coerce_text(self.get(field)?).map_err(|m| self.invalid(field, m))
    }

    fn list(&self, field: &'static str) -> Result<Vec<String>, CardError> {
        coerce_list(self.get(field)?).map_err(|m| self.invalid(field, m))
    }

    fn invalid(&self, field: &'static str, mismatch: ShapeMismatch) -> CardError {
        CardError::InvalidField {
            field,
            expected: mismatch.expected,
            found: mismatch.found,
            raw: echo(self.raw),
        }
    }
}

fn echo(raw: &str) -> String {
    truncate_chars(raw.trim(), RAW_ECHO_LIMIT)
}

/// Parse raw model output into a [`Card`].
///
/// All six fields must be present. Values are coerced with [`coerce_text`]
/// and [`coerce_list`]; an empty `word` after coercion counts as missing.
#[instrument(level = "debug", skip(raw), fields(len = raw.len()))]
pub fn normalize(raw: &str) -> Result<Card, CardError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| CardError::Malformed {
        source,
        raw: echo(raw),
    })?;

    let Value::Object(fields) = &value else {
        return Err(CardError::NotAnObject { raw: echo(raw) });
    };
    let record = RawRecord { fields, raw };

    let card = Card {
        word: record.text("word")?,
        category: record.text("category")?,
        definition: record.list("definition")?,
        forms: record.list("forms")?,
        example: record.list("example")?,
        reverse: record.list("reverse")?,
    };

    if card.word.is_empty() {
        return Err(CardError::MissingField {
            field: "word",
            raw: echo(raw),
        });
    }

    debug!(word = %card.word, "Normalized card");
    Ok(card)
}

/// Flatten a card into the row stored in the deck file.
pub fn render_for_storage(card: &Card) -> CardRow {
    CardRow {
        word: card.word.clone(),
        category: card.category.clone(),
        definition: card.definition.join(DEFINITION_SEPARATOR),
        forms: card.forms.join(FORMS_SEPARATOR),
        example: card.example.join(SENTENCE_SEPARATOR),
        reverse: card.reverse.join(SENTENCE_SEPARATOR),
    }
}

/// Rebuild a card from a stored row by re-splitting on the storage separators.
///
/// Separators are not escaped on write, so a value that itself contains one
/// comes back split into several elements. Empty cells become empty lists.
pub fn parse_from_storage(row: CardRow) -> Result<Card, CardError> {
    if row.word.is_empty() {
        return Err(CardError::MissingField {
            field: "word",
            raw: echo(&format!("{:?}", row)),
        });
    }

    Ok(Card {
        definition: split_cell(&row.definition, DEFINITION_SEPARATOR),
        forms: split_cell(&row.forms, FORMS_SEPARATOR),
        example: split_cell(&row.example, SENTENCE_SEPARATOR),
        reverse: split_cell(&row.reverse, SENTENCE_SEPARATOR),
        word: row.word,
        category: row.category,
    })
}

fn split_cell(cell: &str, separator: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(separator).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AUF_ANHIEB: &str = r#"
{
  "word": "auf Anhieb",
  "category": "adverbial phrase",
  "definition": "at once",
  "forms": null,
  "example": [
    "Das hat auf Anhieb funktioniert!",
    "Leider habe ich den richtigen Weg nicht auf Anhieb gefunden."
  ],
  "reverse": [
    "That worked immediately!",
    "Unfortunately, I didn't find the right way immediately."
  ]
}
"#;

    fn sample_card() -> Card {
        Card {
            word: "abholen".to_string(),
            category: "verb".to_string(),
            definition: vec!["to pick up".to_string(), "to collect".to_string()],
            forms: vec!["hat abgeholt".to_string(), "holte ab".to_string()],
            example: vec![
                "Ich hole dich am Bahnhof ab.".to_string(),
                "Er hat das Paket abgeholt.".to_string(),
            ],
            reverse: vec![
                "I will pick you up at the station.".to_string(),
                "He picked up the package.".to_string(),
            ],
        }
    }

    #[test]
    fn given_null_forms_when_normalizing_then_forms_is_empty() {
        let card = normalize(AUF_ANHIEB).unwrap();

        assert!(card.forms.is_empty());
        assert_eq!(render_for_storage(&card).forms, "");
    }

    #[test]
    fn given_scalar_definition_when_normalizing_then_wraps_in_list() {
        let card = normalize(AUF_ANHIEB).unwrap();

        assert_eq!(card.definition, vec!["at once"]);
        assert_eq!(render_for_storage(&card).definition, "at once");
    }

    #[test]
    fn given_list_fields_when_normalizing_then_keeps_order() {
        let card = normalize(AUF_ANHIEB).unwrap();

        assert_eq!(card.word, "auf Anhieb");
        assert_eq!(card.category, "adverbial phrase");
        assert_eq!(card.example.len(), 2);
        assert_eq!(card.reverse[0], "That worked immediately!");
    }

    #[test]
    fn given_null_category_when_normalizing_then_category_is_empty_string() {
        let raw = json!({
            "word": "Haus", "category": null, "definition": "house",
            "forms": "Häuser", "example": [], "reverse": []
        })
        .to_string();

        let card = normalize(&raw).unwrap();

        assert_eq!(card.category, "");
        assert_eq!(card.forms, vec!["Häuser"]);
    }

    #[test]
    fn given_missing_word_when_normalizing_then_fails_naming_word() {
        let raw = r#"{"category": "noun", "definition": "house", "forms": [], "example": [], "reverse": []}"#;

        let err = normalize(raw).unwrap_err();

        assert!(matches!(err, CardError::MissingField { field: "word", .. }));
        assert!(err.to_string().contains("'word'"));
        assert!(err.to_string().contains("\"definition\": \"house\""));
    }

    #[test]
    fn given_empty_or_null_word_when_normalizing_then_fails_as_missing() {
        for word in [json!(""), Value::Null] {
            let raw = json!({
                "word": word, "category": "", "definition": [],
                "forms": [], "example": [], "reverse": []
            })
            .to_string();

            let err = normalize(&raw).unwrap_err();

            assert_eq!(err.field(), Some("word"));
        }
    }

    #[test]
    fn given_missing_list_field_when_normalizing_then_names_that_field() {
        let raw = r#"{"word": "Haus", "category": "noun", "definition": "house", "forms": [], "example": []}"#;

        let err = normalize(raw).unwrap_err();

        assert!(matches!(err, CardError::MissingField { field: "reverse", .. }));
    }

    #[test]
    fn given_malformed_text_when_normalizing_then_fails_with_malformed() {
        let err = normalize("{\"word\": \"Haus\", ").unwrap_err();

        assert!(matches!(err, CardError::Malformed { .. }));
    }

    #[test]
    fn given_json_array_when_normalizing_then_fails_with_not_an_object() {
        let err = normalize(r#"["Haus"]"#).unwrap_err();

        assert!(matches!(err, CardError::NotAnObject { .. }));
    }

    #[test]
    fn given_number_in_list_field_when_normalizing_then_fails_with_invalid_field() {
        let raw = json!({
            "word": "Haus", "category": "noun", "definition": 42,
            "forms": [], "example": [], "reverse": []
        })
        .to_string();

        let err = normalize(&raw).unwrap_err();

        match err {
            CardError::InvalidField { field, found, .. } => {
                assert_eq!(field, "definition");
                assert_eq!(found, "a number");
            }
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn given_nested_object_in_list_when_normalizing_then_fails_with_invalid_field() {
        let raw = json!({
            "word": "Haus", "category": "noun", "definition": [],
            "forms": [{"plural": "Häuser"}], "example": [], "reverse": []
        })
        .to_string();

        let err = normalize(&raw).unwrap_err();

        assert!(matches!(
            err,
            CardError::InvalidField { field: "forms", found: "an object", .. }
        ));
    }

    #[test]
    fn given_list_category_when_normalizing_then_fails_with_invalid_field() {
        let raw = json!({
            "word": "Haus", "category": ["noun"], "definition": [],
            "forms": [], "example": [], "reverse": []
        })
        .to_string();

        let err = normalize(&raw).unwrap_err();

        assert_eq!(err.field(), Some("category"));
    }

    #[test]
    fn given_long_raw_input_when_failing_then_echo_is_truncated() {
        let raw = format!(r#"{{"category": "{}"}}"#, "x".repeat(2000));

        let err = normalize(&raw).unwrap_err();

        let message = err.to_string();
        assert!(message.ends_with("..."));
        assert!(message.len() < 700);
    }

    #[test]
    fn given_canonical_card_when_normalizing_twice_then_unchanged() {
        let once = normalize(AUF_ANHIEB).unwrap();
        let json = serde_json::to_string(&once).unwrap();

        let twice = normalize(&json).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn given_coercion_inputs_when_coercing_then_returns_tagged_results() {
        assert_eq!(coerce_list(&json!("a")), Ok(vec!["a".to_string()]));
        assert_eq!(coerce_list(&Value::Null), Ok(vec![]));
        assert_eq!(coerce_text(&Value::Null), Ok(String::new()));
        assert_eq!(
            coerce_text(&json!(true)),
            Err(ShapeMismatch {
                expected: "a string",
                found: "a boolean"
            })
        );
        assert!(coerce_list(&json!(["a", 1])).is_err());
    }

    #[test]
    fn given_card_when_rendering_then_uses_field_separators() {
        let row = render_for_storage(&sample_card());

        assert_eq!(row.definition, "to pick up; to collect");
        assert_eq!(row.forms, "hat abgeholt | holte ab");
        assert_eq!(
            row.example,
            "Ich hole dich am Bahnhof ab.<br/><br/>Er hat das Paket abgeholt."
        );
    }

    #[test]
    fn given_card_without_separators_when_round_tripping_then_equal() {
        let card = sample_card();

        let parsed = parse_from_storage(render_for_storage(&card)).unwrap();

        assert_eq!(parsed, card);
    }

    #[test]
    fn given_card_with_empty_lists_when_round_tripping_then_equal() {
        let card = Card {
            forms: vec![],
            reverse: vec![],
            ..sample_card()
        };

        let parsed = parse_from_storage(render_for_storage(&card)).unwrap();

        assert_eq!(parsed, card);
    }

    #[test]
    fn given_separator_inside_value_when_round_tripping_then_value_is_split() {
        let card = Card {
            definition: vec!["to fetch; to collect".to_string()],
            ..sample_card()
        };

        let parsed = parse_from_storage(render_for_storage(&card)).unwrap();

        assert_eq!(parsed.definition, vec!["to fetch", "to collect"]);
    }

    #[test]
    fn given_row_with_empty_word_when_parsing_then_fails() {
        let row = CardRow {
            word: String::new(),
            ..render_for_storage(&sample_card())
        };

        let err = parse_from_storage(row).unwrap_err();

        assert_eq!(err.field(), Some("word"));
    }
}
