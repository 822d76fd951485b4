//! Typed raw records as loaded from the flat files. Owned by the loader,
//! immutable and read-only to the conversion core.

use std::str::FromStr;

use regex::Regex;
use std::sync::OnceLock;

use vargraph_common::ConversionError;
use vargraph_model::{StatementType, Zygosity};

/// One curated knowledge-base row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub ident: String,
    pub statement: RawStatement,
    /// Free text, or the literal "not specified".
    pub disease: String,
    pub evidence: String,
    pub literature: RawLiterature,
    /// Ordered combination of co-required events.
    pub combination: Vec<RawComboEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    pub statement_type: StatementType,
    pub relevance: String,
    /// Semicolon-delimited context list.
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLiterature {
    pub lit_type: String,
    pub id: String,
    pub title: String,
}

/// One (event, presence, zygosity) triple of a record's combination column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComboEvent {
    pub event: RawEvent,
    pub presence: bool,
    pub zygosity: Option<Zygosity>,
    pub germline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Pure feature annotation; contributes a bare feature downstream.
    Annotation { feature: RawFeature },
    /// Controlled-vocabulary term applied to a feature.
    Category {
        kind: RawEventKind,
        term: String,
        feature: RawFeature,
    },
    /// Coordinate-level notation.
    Positional {
        kind: RawEventKind,
        notation: RawNotation,
    },
}

/// Top-level event vocabulary of the flat files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEventKind {
    Mutation,
    Structural,
    CopyNumber,
    RnaExpression,
    ProteinExpression,
}

impl RawEventKind {
    /// Canonical event term emitted on the event envelope.
    pub fn term(&self) -> &'static str {
        match self {
            RawEventKind::Mutation => "mutation",
            RawEventKind::Structural => "structural variant",
            RawEventKind::CopyNumber => "copy number variant",
            RawEventKind::RnaExpression => "RNA expression level variant",
            RawEventKind::ProteinExpression => "protein expression level variant",
        }
    }

    /// Parse the flat-file kind column. Unknown kinds are a load error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MUT" => Some(RawEventKind::Mutation),
            "SV" => Some(RawEventKind::Structural),
            "CNV" => Some(RawEventKind::CopyNumber),
            "ELV-RNA" => Some(RawEventKind::RnaExpression),
            "ELV-PROT" => Some(RawEventKind::ProteinExpression),
            _ => None,
        }
    }
}

/// Positional notation: one or two loci with up to two breakpoints each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNotation {
    pub subtype: String,
    pub feature_x: RawFeature,
    /// Present only for breakpoint-notation events joining two loci.
    pub feature_y: Option<RawFeature>,
    pub break_x1: RawPosition,
    pub break_x2: Option<RawPosition>,
    pub break_y1: Option<RawPosition>,
    pub break_y2: Option<RawPosition>,
    pub reference_seq: Option<String>,
    pub alt: Option<String>,
}

/// Coordinate components before conversion. `a`/`b` are the numeric
/// components, `c` the string component (arm, offset sign or reference
/// amino acid depending on the system).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPosition {
    pub system: CoordinateSystem,
    pub a: Option<i64>,
    pub b: Option<i64>,
    pub c: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    Cytoband,
    CodingSequence,
    Protein,
    Genomic,
    Exonic,
}

impl FromStr for CoordinateSystem {
    type Err = ConversionError;

    /// Parses the single-letter coordinate tag. Any other tag means the rule
    /// tables lack coverage for the input, which must halt the batch.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "y" => Ok(CoordinateSystem::Cytoband),
            "c" => Ok(CoordinateSystem::CodingSequence),
            "p" => Ok(CoordinateSystem::Protein),
            "g" => Ok(CoordinateSystem::Genomic),
            "e" => Ok(CoordinateSystem::Exonic),
            other => Err(ConversionError::UnhandledCoordinateSystem(other.to_string())),
        }
    }
}

/// Raw feature reference. The sentinel type "?" marks an unspecified origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeature {
    pub ftype: String,
    pub subtype: String,
    pub id: String,
    pub version: Option<String>,
}

fn germline_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\(germline\)\s*$").unwrap())
}

/// Normalize a zygosity cell: a trailing "(germline)" becomes the boolean
/// flag, and the placeholder values ns/na/any mean none. Anything outside
/// the vocabulary fails the load.
pub fn parse_zygosity(text: &str) -> anyhow::Result<(Option<Zygosity>, bool)> {
    let lowered = text.trim().to_lowercase();
    let germline = germline_suffix().is_match(&lowered);
    let stripped = germline_suffix().replace(&lowered, "");
    let zygosity = match stripped.trim() {
        "heterozygous" => Some(Zygosity::Heterozygous),
        "homozygous" => Some(Zygosity::Homozygous),
        "ns" | "na" | "any" | "" => None,
        other => anyhow::bail!("unrecognized zygosity: {other}"),
    };
    Ok((zygosity, germline))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zygosity_germline_suffix_stripped() {
        assert_eq!(
            parse_zygosity("heterozygous (germline)").unwrap(),
            (Some(Zygosity::Heterozygous), true)
        );
        assert_eq!(
            parse_zygosity("homozygous").unwrap(),
            (Some(Zygosity::Homozygous), false)
        );
    }

    #[test]
    fn test_zygosity_placeholders_normalize_to_none() {
        for placeholder in ["ns", "na", "any", ""] {
            assert_eq!(parse_zygosity(placeholder).unwrap(), (None, false));
        }
        assert_eq!(parse_zygosity("ns (germline)").unwrap(), (None, true));
    }

    #[test]
    fn test_zygosity_outside_vocabulary_is_an_error() {
        assert!(parse_zygosity("hemizygous").is_err());
        assert!(parse_zygosity("hemizygous (germline)").is_err());
    }

    #[test]
    fn test_unknown_coordinate_tag_is_systemic() {
        let err = "q".parse::<CoordinateSystem>().unwrap_err();
        assert!(err.is_systemic());
    }

    #[test]
    fn test_event_kind_terms() {
        assert_eq!(RawEventKind::parse("SV").unwrap().term(), "structural variant");
        assert_eq!(
            RawEventKind::parse("ELV-PROT").unwrap().term(),
            "protein expression level variant"
        );
        assert!(RawEventKind::parse("FANN").is_none());
    }
}
