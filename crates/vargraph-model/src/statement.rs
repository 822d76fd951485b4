//! Graph statements: the unit of curated knowledge emitted per record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use vargraph_common::ConversionError;

use crate::entity::{Disease, Feature, Target, Therapy};
use crate::event::{Event, EventEntry};
use crate::source::Source;
use crate::tag::ClassTag;

/// Statement types with defined classification logic. Anything else in the
/// input is an unhandled-type failure at load time, flagged for domain-owner
/// review rather than silently skipped.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatementType {
    Biological,
    Therapeutic,
    Prognostic,
    Diagnostic,
    Occurrence,
}

impl StatementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementType::Biological => "biological",
            StatementType::Therapeutic => "therapeutic",
            StatementType::Prognostic => "prognostic",
            StatementType::Diagnostic => "diagnostic",
            StatementType::Occurrence => "occurrence",
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biological" => Ok(StatementType::Biological),
            "therapeutic" => Ok(StatementType::Therapeutic),
            "prognostic" => Ok(StatementType::Prognostic),
            "diagnostic" => Ok(StatementType::Diagnostic),
            "occurrence" => Ok(StatementType::Occurrence),
            other => Err(ConversionError::UnhandledStatementType(other.to_string())),
        }
    }
}

/// Anything that can sit on a statement's applies_to/requires edges.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GraphItem {
    Disease(Disease),
    Feature(Feature),
    Target(Target),
    Therapy(Therapy),
    Event(Box<Event>),
}

impl From<EventEntry> for GraphItem {
    fn from(entry: EventEntry) -> Self {
        match entry {
            EventEntry::Annotation(feature) => GraphItem::Feature(feature),
            EventEntry::Event(event) => GraphItem::Event(event),
        }
    }
}

/// One emitted knowledge-base statement. `as_compared_to` is carried for the
/// downstream schema but never populated by this engine.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Statement {
    #[serde(rename = "@class")]
    class: ClassTag,
    pub applies_to: Vec<GraphItem>,
    pub requires: Vec<GraphItem>,
    pub as_compared_to: Vec<GraphItem>,
    pub relevance: String,
    #[serde(rename = "type")]
    pub statement_type: StatementType,
    pub supported_by: Vec<Source>,
}

impl Statement {
    pub fn new(statement_type: StatementType, relevance: impl Into<String>) -> Self {
        Self {
            class: ClassTag("statement"),
            applies_to: Vec::new(),
            requires: Vec::new(),
            as_compared_to: Vec::new(),
            relevance: relevance.into(),
            statement_type,
            supported_by: Vec::new(),
        }
    }
}
