//! Group Index - words grouped by category
//!
//! A `WordGroups` value is an immutable snapshot built in one pass by
//! `WordGroupsBuilder` and then handed to the caller. Group keys keep the
//! order they were first seen in and words keep insertion order, so equal
//! inputs always serialize to identical bytes.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Operation};
use crate::language::Language;
use crate::loader::GroupedRecord;
use crate::normalize::{normalize, NormalizeContext, Normalized, NormalizedWord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Group key for words with no semantic group and no document group
pub const UNGROUPED: &str = "ungrouped";

/// Normalized words grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordGroups {
    groups: IndexMap<String, Vec<NormalizedWord>>,
}

impl WordGroups {
    /// Words in one group
    pub fn get(&self, group: &str) -> Option<&[NormalizedWord]> {
        self.groups.get(group).map(|v| v.as_slice())
    }

    pub fn group_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NormalizedWord])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn word_count(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Find a word and its group by id
    pub fn find_by_id(&self, id: &str) -> Option<(&str, &NormalizedWord)> {
        self.iter()
            .flat_map(|(group, words)| words.iter().map(move |w| (group, w)))
            .find(|(_, w)| w.id == id)
    }

    /// Case-insensitive substring search over headwords, transliterations
    /// and meanings, in index order
    pub fn search(&self, text: &str) -> Vec<(&str, &NormalizedWord)> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.iter()
            .flat_map(|(group, words)| words.iter().map(move |w| (group, w)))
            .filter(|(_, w)| w.matches(&needle))
            .collect()
    }

    /// Get statistics about the index
    pub fn stats(&self) -> IndexStats {
        let largest_group = self
            .iter()
            .max_by_key(|(_, words)| words.len())
            .map(|(group, words)| (group.to_string(), words.len()));

        IndexStats {
            groups: self.group_count(),
            words: self.word_count(),
            ungrouped: self.get(UNGROUPED).map_or(0, |w| w.len()),
            largest_group,
        }
    }

    /// blake3 digest of the canonical JSON form
    ///
    /// Equal snapshots always share a fingerprint, so callers can memoize on it.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(&self.groups).unwrap_or_default();
        blake3::hash(&bytes).to_hex().to_string()
    }
}

/// Statistics about a word index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub groups: usize,
    pub words: usize,
    pub ungrouped: usize,
    pub largest_group: Option<(String, usize)>,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Word Index Statistics:")?;
        writeln!(f, "  Groups: {}", self.groups)?;
        writeln!(f, "  Words: {} (ungrouped: {})", self.words, self.ungrouped)?;
        if let Some((group, count)) = &self.largest_group {
            writeln!(f, "  Largest group: {} ({})", group, count)?;
        }
        Ok(())
    }
}

/// Pick the group a word is filed under
///
/// The record's own `semanticGroup` wins, then the group the document filed
/// it under, then `UNGROUPED`.
pub fn group_key_for<'a>(word: &'a NormalizedWord, document_group: Option<&'a str>) -> &'a str {
    word.declared_group()
        .or_else(|| document_group.map(str::trim).filter(|g| !g.is_empty()))
        .unwrap_or(UNGROUPED)
}

/// Accumulates sources into a fresh `WordGroups`
///
/// Sources must be added in the order the caller requested them.
#[derive(Debug)]
pub struct WordGroupsBuilder {
    language: Language,
    groups: IndexMap<String, Vec<NormalizedWord>>,
}

impl WordGroupsBuilder {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            groups: IndexMap::new(),
        }
    }

    /// Normalize and fold one source's records, returning how many survived
    pub fn add_source(&mut self, source_key: &str, records: Vec<GroupedRecord>, sink: &dyn DiagnosticSink) -> usize {
        let mut accepted = 0;

        for GroupedRecord { group, position, record } in records {
            let context = NormalizeContext {
                language: self.language,
                source_key,
                position,
            };

            match normalize(&record, &context) {
                Normalized::Accepted(word) => {
                    let key = group_key_for(&word, group.as_deref()).to_string();
                    self.groups.entry(key).or_default().push(word);
                    accepted += 1;
                }
                Normalized::Rejected(reason) => {
                    sink.report(
                        Diagnostic::new(Operation::Normalize, self.language, reason.to_string())
                            .with_source(source_key)
                            .with_position(position),
                    );
                }
            }
        }

        accepted
    }

    pub fn finish(self) -> WordGroups {
        WordGroups { groups: self.groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::loader::flatten_document;
    use serde_json::json;

    fn build(language: Language, sources: &[(&str, &str)], sink: &MemorySink) -> WordGroups {
        let mut builder = WordGroupsBuilder::new(language);
        for (key, text) in sources {
            let records = flatten_document(text, language, key, sink).unwrap();
            builder.add_source(key, records, sink);
        }
        builder.finish()
    }

    #[test]
    fn test_semantic_group_overrides_document_group() {
        let sink = MemorySink::new();
        let groups = build(
            Language::Latin,
            &[("core", r#"{"nouns": [
                {"word": "rēx", "meaning": "king"},
                {"word": "deus", "meaning": "god", "semanticGroup": "religion"},
                {"word": "via", "meaning": "road", "semanticGroup": "  "}
            ]}"#)],
            &sink,
        );

        let keys: Vec<_> = groups.group_keys().collect();
        assert_eq!(keys, vec!["nouns", "religion"]);
        assert_eq!(groups.get("nouns").unwrap().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_flat_sources_fill_ungrouped() {
        let sink = MemorySink::new();
        let groups = build(
            Language::AncientGreek,
            &[
                ("a", r#"[{"word": "λόγος", "meaning": "word"}, {"word": "θεός", "meaning": "god", "semanticGroup": "religion"}]"#),
                ("b", r#"[{"word": "ἀγάπη", "meaning": "love"}, {"word": "ἔργον", "meaning": "work"}]"#),
            ],
            &sink,
        );

        assert_eq!(groups.get(UNGROUPED).unwrap().len(), 3);
        assert_eq!(groups.stats().ungrouped, 3);
    }

    #[test]
    fn test_homographs_are_kept_in_source_order() {
        let sink = MemorySink::new();
        let groups = build(
            Language::Latin,
            &[
                ("a", r#"{"verbs": [{"word": "legō", "meaning": "read"}]}"#),
                ("b", r#"{"verbs": [{"word": "legō", "meaning": "gather"}]}"#),
            ],
            &sink,
        );

        let verbs = groups.get("verbs").unwrap();
        assert_eq!(verbs.len(), 2);
        assert_eq!(verbs[0].meanings, vec!["read"]);
        assert_eq!(verbs[1].meanings, vec!["gather"]);
        assert_ne!(verbs[0].id, verbs[1].id);
    }

    #[test]
    fn test_rejected_records_are_reported_with_position() {
        let sink = MemorySink::new();
        let groups = build(
            Language::Hebrew,
            &[("core", r#"{"nouns": [{"word": "בַּיִת", "meaning": "house"}, {"word": "אִישׁ"}]}"#)],
            &sink,
        );

        assert_eq!(groups.word_count(), 1);
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Normalize);
        assert_eq!(entries[0].source.as_deref(), Some("core"));
        assert_eq!(entries[0].position, Some(1));
    }

    #[test]
    fn test_queries() {
        let sink = MemorySink::new();
        let groups = build(
            Language::AncientGreek,
            &[("nt", r#"{"nouns": [
                {"id": "g3056", "word": "λόγος", "meanings": ["word", "Reason"], "transliteration": "logos"},
                {"word": "θεός", "meaning": "god"}
            ]}"#)],
            &sink,
        );

        let (group, word) = groups.find_by_id("g3056").unwrap();
        assert_eq!(group, "nouns");
        assert_eq!(word.word, "λόγος");

        assert_eq!(groups.search("reason").len(), 1);
        assert_eq!(groups.search("LOGOS").len(), 1);
        assert_eq!(groups.search("θεό").len(), 1);
        assert!(groups.search("   ").is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let sink = MemorySink::new();
        let doc = r#"{"nouns": [{"word": "rēx", "meaning": "king"}]}"#;
        let first = build(Language::Latin, &[("core", doc)], &sink);
        let second = build(Language::Latin, &[("core", doc)], &sink);
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());

        let other = build(Language::Latin, &[("core", r#"{"nouns": [{"word": "rēx", "meaning": "ruler"}]}"#)], &sink);
        assert_ne!(first.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let sink = MemorySink::new();
        let groups = build(Language::Latin, &[("core", r#"{"nouns": [{"id": "1", "word": "rēx", "meaning": "king"}]}"#)], &sink);
        assert_eq!(
            serde_json::to_value(&groups).unwrap(),
            json!({"nouns": [{"id": "1", "word": "rēx", "meanings": ["king"]}]})
        );
    }
}
