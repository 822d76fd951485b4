//! PubMed E-utilities client for publication metadata.
//!
//! Endpoint used:
//!   esummary: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ESUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

/// Raw esummary fields the resolver cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubmedSummary {
    pub title: String,
    pub pubdate: String,
    pub fulljournalname: String,
}

/// Metadata lookup keyed by a publication identifier. Behind a trait so the
/// batch can run against a recorded cache or a mock in tests.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn summary(&self, pmid: &str) -> anyhow::Result<PubmedSummary>;
}

pub struct EutilsClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl EutilsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl MetadataLookup for EutilsClient {
    async fn summary(&self, pmid: &str) -> anyhow::Result<PubmedSummary> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", pmid.to_string()),
            ("retmode", "json".to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let resp: serde_json::Value = self
            .client
            .get(ESUMMARY_URL)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let entry = &resp["result"][pmid];
        if entry.is_null() {
            anyhow::bail!("esummary returned no entry for pmid {pmid}");
        }
        let summary = PubmedSummary {
            title: entry["title"].as_str().unwrap_or_default().to_string(),
            pubdate: entry["pubdate"].as_str().unwrap_or_default().to_string(),
            fulljournalname: entry["fulljournalname"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        };
        debug!(pmid, title = %summary.title, "fetched publication summary");
        Ok(summary)
    }
}

/// Map-backed lookup for tests and offline runs; counts calls so idempotence
/// of the enrichment cache can be asserted.
#[derive(Default)]
pub struct StaticLookup {
    entries: HashMap<String, PubmedSummary>,
    calls: AtomicUsize,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pmid: &str, title: &str, pubdate: &str, journal: &str) -> Self {
        self.entries.insert(
            pmid.to_string(),
            PubmedSummary {
                title: title.to_string(),
                pubdate: pubdate.to_string(),
                fulljournalname: journal.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataLookup for StaticLookup {
    async fn summary(&self, pmid: &str) -> anyhow::Result<PubmedSummary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(pmid)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no summary recorded for pmid {pmid}"))
    }
}
