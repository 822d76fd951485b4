//! Ontology-side entities referenced by statements: features, diseases,
//! therapies and synthetic targets.

use serde::Serialize;

use crate::tag::ClassTag;

/// A normalized genomic feature (gene, transcript, chromosome template, ...).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Feature {
    #[serde(rename = "@class")]
    class: ClassTag,
    pub source: String,
    pub source_version: Option<String>,
    pub biotype: String,
    pub name: String,
}

impl Feature {
    pub fn new(
        source: impl Into<String>,
        source_version: Option<String>,
        biotype: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            class: ClassTag("feature"),
            source: source.into(),
            source_version,
            biotype: biotype.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Disease {
    #[serde(rename = "@class")]
    class: ClassTag,
    pub name: String,
}

impl Disease {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            class: ClassTag("disease"),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Pathway,
    Phenotype,
}

/// A synthetic target derived from the statement context rather than from an
/// event (pathway or phenotype assertions).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Target {
    #[serde(rename = "@class")]
    class: ClassTag,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
}

impl Target {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            class: ClassTag("target"),
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Therapy {
    #[serde(rename = "@class")]
    class: ClassTag,
    pub name: String,
}

impl Therapy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            class: ClassTag("therapy"),
            name: name.into(),
        }
    }
}
