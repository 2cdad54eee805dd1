//! Source Catalog Loader
//!
//! A catalog document maps source key → display label for one language.
//! Key order in the document is the order sources are offered in.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Operation};
use crate::language::Language;
use crate::store::{DocumentAddress, DocumentStore};
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named vocabulary source available for a language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    /// Stable machine key used to fetch the source document
    pub key: String,
    /// Human-readable label
    pub display_value: String,
}

impl SourceDescriptor {
    pub fn new(key: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_value: display_value.into(),
        }
    }
}

/// Parse a catalog document, preserving key order
pub fn parse_catalog(text: &str) -> Result<Vec<SourceDescriptor>> {
    let entries: IndexMap<String, Value> = serde_json::from_str(text)?;

    let descriptors = entries
        .into_iter()
        .map(|(key, label)| {
            let display_value = match label {
                Value::String(s) => s,
                Value::Null => key.clone(),
                other => other.to_string(),
            };
            SourceDescriptor::new(key, display_value)
        })
        .collect();

    Ok(descriptors)
}

/// List the sources available for a language.
///
/// Never fails: an unreachable or malformed catalog is reported once to
/// `sink` and yields an empty list.
pub async fn list_sources(
    store: &dyn DocumentStore,
    sink: &dyn DiagnosticSink,
    language: Language,
) -> Vec<SourceDescriptor> {
    let address = DocumentAddress::Catalog(language);

    let parsed = match store.fetch(&address).await {
        Ok(text) => parse_catalog(&text),
        Err(e) => Err(e),
    };

    match parsed {
        Ok(sources) => {
            tracing::debug!("{} catalog lists {} sources", language, sources.len());
            sources
        }
        Err(e) => {
            sink.report(Diagnostic::new(
                Operation::ListSources,
                language,
                format!("failed to load catalog from {} store: {}", store.name(), e),
            ));
            Vec::new()
        }
    }
}
