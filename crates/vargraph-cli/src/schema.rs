//! Graph-store schema provisioning.
//!
//! Posts class-creation commands to the store's admin endpoint so the class
//! hierarchy exists before a converted document is loaded. Classes already
//! present are reported by the store and skipped.

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct ClassSpec {
    pub name: &'static str,
    pub parents: &'static [&'static str],
    pub is_abstract: bool,
}

/// The class hierarchy behind every `@class` tag this engine emits.
pub const GRAPH_CLASSES: &[ClassSpec] = &[
    ClassSpec { name: "context", parents: &[], is_abstract: true },
    ClassSpec { name: "feature", parents: &["context"], is_abstract: false },
    ClassSpec { name: "disease", parents: &["context"], is_abstract: false },
    ClassSpec { name: "therapy", parents: &["context"], is_abstract: false },
    ClassSpec { name: "target", parents: &["context"], is_abstract: false },
    ClassSpec { name: "evidence", parents: &[], is_abstract: true },
    ClassSpec { name: "publication", parents: &["evidence"], is_abstract: false },
    ClassSpec { name: "clinical_trial", parents: &["evidence"], is_abstract: false },
    ClassSpec { name: "external_source", parents: &["evidence"], is_abstract: false },
    ClassSpec { name: "position", parents: &[], is_abstract: true },
    ClassSpec { name: "genomic_position", parents: &["position"], is_abstract: false },
    ClassSpec { name: "coding_sequence_position", parents: &["position"], is_abstract: false },
    ClassSpec { name: "protein_position", parents: &["position"], is_abstract: false },
    ClassSpec { name: "cytoband_position", parents: &["position"], is_abstract: false },
    ClassSpec { name: "exonic_position", parents: &["position"], is_abstract: false },
    ClassSpec { name: "range", parents: &[], is_abstract: false },
    ClassSpec { name: "category_event", parents: &[], is_abstract: false },
    ClassSpec { name: "positional_event", parents: &[], is_abstract: false },
    ClassSpec { name: "statement", parents: &[], is_abstract: false },
];

pub struct SchemaClient {
    client: reqwest::Client,
    base_url: String,
}

impl SchemaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn create_class(&self, spec: &ClassSpec) -> anyhow::Result<()> {
        let url = format!("{}/classes", self.base_url.trim_end_matches('/'));
        let resp = self.client.post(&url).json(spec).send().await?;
        if resp.status() == reqwest::StatusCode::CONFLICT {
            warn!(class = spec.name, "class already exists, skipping");
            return Ok(());
        }
        resp.error_for_status()?;
        info!(class = spec.name, "created class");
        Ok(())
    }

    /// Provision the full hierarchy. Parents are listed before children so a
    /// single in-order pass is sufficient.
    pub async fn provision(&self) -> anyhow::Result<()> {
        for spec in GRAPH_CLASSES {
            self.create_class(spec).await?;
        }
        info!(classes = GRAPH_CLASSES.len(), "schema provisioned");
        Ok(())
    }
}
