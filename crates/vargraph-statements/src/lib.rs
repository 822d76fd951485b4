//! vargraph-statements — Rule-driven classification of curated records into
//! graph statements, and the batch driver that runs it over a whole load.

pub mod batch;
pub mod classifier;
pub mod rules;

pub use batch::{run_batch, BatchOutput, Document};
pub use classifier::{classify_record, RecordOutcome};
pub use rules::{match_biological, RuleAction};
