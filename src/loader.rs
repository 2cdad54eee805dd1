//! Record Loader
//!
//! Fetches one source document and flattens it into `(group, record)` pairs
//! in document order. No validation happens here; records stay untrusted
//! until they pass through `normalize`.
//!
//! Two document shapes are accepted:
//! - object: group key → array of records
//! - array: records with no document-level group

use crate::diagnostics::{Diagnostic, DiagnosticSink, Operation};
use crate::language::Language;
use crate::store::{DocumentAddress, DocumentStore};
use crate::Result;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// An untrusted record exactly as it appeared in the source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawWordRecord(pub Value);

impl RawWordRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a field, if the record is an object
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|o| o.get(name))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A raw record tagged with where it came from in its document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRecord {
    /// Group key the document filed this record under, if any
    pub group: Option<String>,
    /// Zero-based position across the whole document
    pub position: usize,
    pub record: RawWordRecord,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceDocument {
    Grouped(GroupEntries),
    Flat(Vec<Value>),
}

/// Group entries in document order; a repeated key keeps every occurrence
struct GroupEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for GroupEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = GroupEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of group key to records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<GroupEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(GroupEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Flatten a source document into grouped records.
///
/// Groups whose value is not an array are skipped and reported; the rest of
/// the document still loads. Anything that is not an object or array fails.
pub fn flatten_document(
    text: &str,
    language: Language,
    source_key: &str,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<GroupedRecord>> {
    let document: SourceDocument = serde_json::from_str(text)?;
    let mut records = Vec::new();

    match document {
        SourceDocument::Flat(items) => {
            for item in items {
                records.push(GroupedRecord {
                    group: None,
                    position: records.len(),
                    record: RawWordRecord(item),
                });
            }
        }
        SourceDocument::Grouped(GroupEntries(groups)) => {
            for (group, value) in groups {
                let Value::Array(items) = value else {
                    sink.report(
                        Diagnostic::new(
                            Operation::LoadRecords,
                            language,
                            format!("group '{}' is not an array of records; skipped", group),
                        )
                        .with_source(source_key),
                    );
                    continue;
                };

                for item in items {
                    records.push(GroupedRecord {
                        group: Some(group.clone()),
                        position: records.len(),
                        record: RawWordRecord(item),
                    });
                }
            }
        }
    }

    Ok(records)
}

/// Load the raw records of one source.
///
/// Never fails: an unreachable or malformed document is reported once to
/// `sink` and contributes no records.
pub async fn load_records(
    store: &dyn DocumentStore,
    sink: &dyn DiagnosticSink,
    language: Language,
    source_key: &str,
) -> Vec<GroupedRecord> {
    let address = DocumentAddress::Source(language, source_key.to_string());

    let loaded = match store.fetch(&address).await {
        Ok(text) => flatten_document(&text, language, source_key, sink),
        Err(e) => Err(e),
    };

    match loaded {
        Ok(records) => {
            tracing::debug!("Loaded {} raw records from {}", records.len(), address);
            records
        }
        Err(e) => {
            sink.report(
                Diagnostic::new(
                    Operation::LoadRecords,
                    language,
                    format!("failed to load source from {} store: {}", store.name(), e),
                )
                .with_source(source_key),
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_grouped_document_keeps_order_and_positions() {
        let sink = MemorySink::new();
        let text = r#"{
            "verbs": [{"word": "amō"}, {"word": "videō"}],
            "nouns": [{"word": "rēx"}]
        }"#;

        let records = flatten_document(text, Language::Latin, "core", &sink).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.group.as_deref(), r.position, r.record.field("word").cloned()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Some("verbs"), 0, Some(json!("amō"))),
                (Some("verbs"), 1, Some(json!("videō"))),
                (Some("nouns"), 2, Some(json!("rēx"))),
            ]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_repeated_group_key_keeps_every_entry() {
        let sink = MemorySink::new();
        let text = r#"{
            "nouns": [{"word": "rēx"}],
            "verbs": [{"word": "amō"}],
            "nouns": [{"word": "lēx"}]
        }"#;

        let records = flatten_document(text, Language::Latin, "core", &sink).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.group.as_deref(), r.position, r.record.field("word").cloned()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Some("nouns"), 0, Some(json!("rēx"))),
                (Some("verbs"), 1, Some(json!("amō"))),
                (Some("nouns"), 2, Some(json!("lēx"))),
            ]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_flat_document_has_no_group() {
        let sink = MemorySink::new();
        let records = flatten_document(r#"[{"word": "λόγος"}, 42]"#, Language::AncientGreek, "nt", &sink).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.group.is_none()));
        assert_eq!(records[1].record, RawWordRecord(json!(42)));
    }

    #[test]
    fn test_non_array_group_is_skipped() {
        let sink = MemorySink::new();
        let text = r#"{"nouns": [{"word": "rēx"}], "notes": "see appendix"}"#;

        let records = flatten_document(text, Language::Latin, "core", &sink).unwrap();
        assert_eq!(records.len(), 1);

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source.as_deref(), Some("core"));
        assert!(entries[0].message.contains("notes"));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let sink = MemorySink::new();
        assert!(flatten_document("\"words\"", Language::Latin, "core", &sink).is_err());
        assert!(flatten_document("{", Language::Latin, "core", &sink).is_err());
    }

    #[tokio::test]
    async fn test_unknown_source_yields_empty_with_diagnostic() {
        let store = MemoryStore::new();
        let sink = MemorySink::new();

        let records = load_records(&store, &sink, Language::Hebrew, "missing").await;
        assert!(records.is_empty());

        let entries = sink.for_source("missing");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::LoadRecords);
    }
}
