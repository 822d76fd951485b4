//! Enrichment cache scoped to one batch run.
//!
//! Keyed by literature id; idempotent, so resolving the same id twice hits
//! the external lookup at most once. Constructed at batch start and discarded
//! at the end, no process-global state.

use std::collections::HashMap;
use std::path::Path;

use crate::pubmed::PubmedSummary;

#[derive(Debug, Default)]
pub struct EnrichmentCache {
    entries: HashMap<String, PubmedSummary>,
}

impl EnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload from a JSON file of id → summary, written by a previous run.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, PubmedSummary> = serde_json::from_str(&content)?;
        tracing::info!(entries = entries.len(), "preloaded enrichment cache");
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&PubmedSummary> {
        self.entries.get(id)
    }

    pub fn insert(&mut self, id: String, summary: PubmedSummary) {
        self.entries.insert(id, summary);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
