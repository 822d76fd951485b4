//! Canonical variant positions, one variant per coordinate system.

use serde::Serialize;

use crate::tag::ClassTag;

/// A position in one of the five supported coordinate systems. Numeric
/// components are never negative; the converter nulls them instead.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "@class")]
pub enum Position {
    #[serde(rename = "cytoband_position")]
    Cytoband {
        arm: Option<String>,
        major_band: Option<i64>,
        minor_band: Option<i64>,
    },
    #[serde(rename = "coding_sequence_position")]
    CodingSequence { pos: Option<i64>, offset: Option<i64> },
    #[serde(rename = "protein_position")]
    Protein { pos: Option<i64>, ref_aa: Option<String> },
    #[serde(rename = "genomic_position")]
    Genomic { pos: Option<i64> },
    #[serde(rename = "exonic_position")]
    Exonic { pos: Option<i64> },
}

/// A pair of positions bounding an uncertain breakpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Range {
    #[serde(rename = "@class")]
    class: ClassTag,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            class: ClassTag("range"),
            start,
            end,
        }
    }
}

/// A breakpoint is either an exact position or a range between two.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Breakpoint {
    Single(Position),
    Range(Range),
}

impl Breakpoint {
    /// Single position when both ends agree, range otherwise.
    pub fn from_pair(start: Position, end: Option<Position>) -> Self {
        match end {
            Some(end) if end != start => Breakpoint::Range(Range::new(start, end)),
            _ => Breakpoint::Single(start),
        }
    }
}
