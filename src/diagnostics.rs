//! Diagnostic channel
//!
//! Every recovered failure (unreachable document, malformed document,
//! rejected record) is reported here exactly once and then absorbed.
//! The channel is write-only from the loader's point of view.

use crate::language::Language;
use serde::Serialize;
use std::sync::Mutex;

/// The operation that observed a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListSources,
    LoadRecords,
    Normalize,
    BuildIndex,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListSources => "list_sources",
            Operation::LoadRecords => "load_records",
            Operation::Normalize => "normalize",
            Operation::BuildIndex => "build_index",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One structured failure report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub operation: Operation,
    pub language: Language,
    /// Source key, when the failure is scoped to one source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Record position within the source document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(operation: Operation, language: Language, message: impl Into<String>) -> Self {
        Self {
            operation,
            language,
            source: None,
            position: None,
            message: message.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.operation, self.language)?;
        if let Some(source) = &self.source {
            write!(f, "/{}", source)?;
        }
        if let Some(position) = self.position {
            write!(f, "@{}", position)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Receiver of diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning with structured fields
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            operation = diagnostic.operation.as_str(),
            language = diagnostic.language.as_str(),
            source = diagnostic.source.as_deref(),
            position = diagnostic.position,
            "{}",
            diagnostic.message
        );
    }
}

/// Collects diagnostics in memory, in report order
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostics scoped to the given source key
    pub fn for_source(&self, source: &str) -> Vec<Diagnostic> {
        self.entries()
            .into_iter()
            .filter(|d| d.source.as_deref() == Some(source))
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.report(Diagnostic::new(Operation::ListSources, Language::Latin, "first"));
        sink.report(
            Diagnostic::new(Operation::LoadRecords, Language::Latin, "second").with_source("core"),
        );

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(sink.for_source("core").len(), 1);
    }

    #[test]
    fn test_display_includes_context() {
        let d = Diagnostic::new(Operation::Normalize, Language::Hebrew, "missing word")
            .with_source("core")
            .with_position(3);
        assert_eq!(d.to_string(), "[normalize] Hebrew/core@3: missing word");
    }
}
