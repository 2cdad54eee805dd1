//! Lexicon - caller-facing entry point
//!
//! Bundles a document store, a diagnostic sink and the fetch fan-out limit,
//! and exposes the three read-only operations:
//! - `list_sources`: what a language offers
//! - `load_records`: one source's raw records
//! - `build_index`: normalized words from many sources, grouped

use crate::catalog::{self, SourceDescriptor};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Operation, TracingSink};
use crate::index::{WordGroups, WordGroupsBuilder};
use crate::language::Language;
use crate::loader::{self, GroupedRecord};
use crate::store::DocumentStore;
use std::sync::Arc;

/// Default cap on concurrent source fetches for one `build_index` call
pub fn default_max_concurrent_fetches() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(2, 8)
}

#[derive(Clone)]
pub struct Lexicon {
    store: Arc<dyn DocumentStore>,
    sink: Arc<dyn DiagnosticSink>,
    max_concurrent: usize,
}

impl Lexicon {
    /// Create a lexicon that reports diagnostics through `tracing`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            sink: Arc::new(TracingSink),
            max_concurrent: default_max_concurrent_fetches(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub async fn list_sources(&self, language: Language) -> Vec<SourceDescriptor> {
        catalog::list_sources(self.store.as_ref(), self.sink.as_ref(), language).await
    }

    pub async fn load_records(&self, language: Language, source_key: &str) -> Vec<GroupedRecord> {
        loader::load_records(self.store.as_ref(), self.sink.as_ref(), language, source_key).await
    }

    /// Build a grouped index over `source_keys`.
    ///
    /// Sources are fetched concurrently in batches, but folded strictly in
    /// the order given, so the result never depends on fetch timing. A
    /// source that fails contributes nothing; the rest still load.
    pub async fn build_index<I>(&self, language: Language, source_keys: I) -> WordGroups
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let source_keys: Vec<String> = source_keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        let mut builder = WordGroupsBuilder::new(language);

        for batch in source_keys.chunks(self.max_concurrent) {
            let mut tasks = Vec::with_capacity(batch.len());
            for key in batch {
                let key = key.clone();
                let store = Arc::clone(&self.store);
                let sink = Arc::clone(&self.sink);
                let task = tokio::spawn(async move {
                    loader::load_records(store.as_ref(), sink.as_ref(), language, &key).await
                });
                tasks.push(task);
            }

            for (key, task) in batch.iter().zip(tasks) {
                match task.await {
                    Ok(records) => {
                        let accepted = builder.add_source(key, records, self.sink.as_ref());
                        tracing::debug!("{} source '{}': {} words indexed", language, key, accepted);
                    }
                    Err(e) => {
                        self.sink.report(
                            Diagnostic::new(Operation::BuildIndex, language, format!("fetch task failed: {}", e))
                                .with_source(key),
                        );
                    }
                }
            }
        }

        builder.finish()
    }

    /// Build an index over every source the catalog lists
    pub async fn build_full_index(&self, language: Language) -> WordGroups {
        let keys: Vec<String> = self
            .list_sources(language)
            .await
            .into_iter()
            .map(|s| s.key)
            .collect();
        self.build_index(language, &keys).await
    }
}
