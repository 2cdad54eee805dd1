//! Record Normalizer
//!
//! Turns one untrusted record into a `NormalizedWord`, or rejects it.
//! Rejection is an ordinary outcome, not an error: a bad record never takes
//! its siblings down with it.
//!
//! Meaning precedence: a non-null `meanings` always wins; the legacy
//! singular `meaning` is only consulted when `meanings` is absent or null.

use crate::language::Language;
use crate::loader::RawWordRecord;
use crate::word_id::WordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a record sits, for id synthesis and diagnostics
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    pub language: Language,
    pub source_key: &'a str,
    pub position: usize,
}

/// Canonical word shape shared by every source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWord {
    pub id: String,
    pub word: String,
    /// Never empty
    pub meanings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflection: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

impl NormalizedWord {
    /// The record's own group, if it names a non-blank one
    pub fn declared_group(&self) -> Option<&str> {
        self.semantic_group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    pub fn transliteration_text(&self) -> Option<&str> {
        self.transliteration.as_ref().and_then(Value::as_str)
    }

    /// Case-insensitive substring match over headword, transliteration and meanings
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.word.to_lowercase().contains(needle_lower)
            || self
                .transliteration_text()
                .is_some_and(|t| t.to_lowercase().contains(needle_lower))
            || self
                .meanings
                .iter()
                .any(|m| m.to_lowercase().contains(needle_lower))
    }
}

/// Why a record was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no non-empty 'word'")]
    MissingWord,

    #[error("record has no non-empty 'meanings' or 'meaning'")]
    MissingMeanings,
}

/// Outcome of normalizing one record
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Accepted(NormalizedWord),
    Rejected(Rejection),
}

impl Normalized {
    pub fn accepted(self) -> Option<NormalizedWord> {
        match self {
            Normalized::Accepted(word) => Some(word),
            Normalized::Rejected(_) => None,
        }
    }
}

/// Validate and canonicalize one raw record
pub fn normalize(raw: &RawWordRecord, context: &NormalizeContext<'_>) -> Normalized {
    let Some(fields) = raw.as_value().as_object() else {
        return Normalized::Rejected(Rejection::NotAnObject);
    };

    let word = match fields.get("word") {
        Some(Value::String(w)) if !w.trim().is_empty() => w.trim().to_string(),
        _ => return Normalized::Rejected(Rejection::MissingWord),
    };

    let meanings = collect_meanings(fields);
    if meanings.is_empty() {
        return Normalized::Rejected(Rejection::MissingMeanings);
    }

    let id = source_id(fields).unwrap_or_else(|| {
        WordId::new(context.language, context.source_key, word.as_str(), context.position).to_id_string()
    });

    Normalized::Accepted(NormalizedWord {
        id,
        word,
        meanings,
        part_of_speech: passthrough_field(fields, "partOfSpeech"),
        root: passthrough_field(fields, "root"),
        transliteration: passthrough_field(fields, "transliteration"),
        inflection: passthrough_field(fields, "inflection"),
        semantic_group: group_field(fields),
        frequency: frequency_field(fields),
    })
}

fn collect_meanings(fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("meanings") {
        Some(value) if !value.is_null() => meaning_values(value),
        _ => match fields.get("meaning") {
            Some(value) if !value.is_null() => meaning_values(value),
            _ => Vec::new(),
        },
    }
}

fn meaning_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => clean_text(s).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(clean_text)
            .collect(),
        _ => Vec::new(),
    }
}

/// Trim and collapse internal whitespace; `None` if nothing is left
fn clean_text(s: &str) -> Option<String> {
    let cleaned = s.split_whitespace().collect::<Vec<_>>().join(" ");
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Descriptive fields are kept exactly as the source wrote them
fn passthrough_field(fields: &Map<String, Value>, name: &str) -> Option<Value> {
    fields.get(name).filter(|v| !v.is_null()).cloned()
}

/// `semanticGroup` picks a group key, so only scalars count
fn group_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("semanticGroup")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn frequency_field(fields: &Map<String, Value>) -> Option<f64> {
    match fields.get("frequency")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|f: &f64| f.is_finite())
}

fn source_id(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
