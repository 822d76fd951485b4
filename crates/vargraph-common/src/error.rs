use thiserror::Error;

/// Which diagnostic counter a record-local failure lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Unresolved,
    ManualIntervention,
    Nonsensical,
}

/// Failures raised while converting curated records into graph entries.
///
/// Two classes share this enum: systemic failures mean the rule tables do not
/// cover an input shape and silently coercing them would corrupt the knowledge
/// base, so the batch must halt. Record-local failures describe a bad data row;
/// the row is counted and skipped and the batch continues.
#[derive(Debug, Error)]
pub enum ConversionError {
    // -- systemic: a gap in rule coverage, not a bad row --
    #[error("unhandled coordinate system tag: {0}")]
    UnhandledCoordinateSystem(String),

    #[error("feature source type is unspecified: {0}")]
    UnspecifiedFeatureType(String),

    #[error("no classification logic for statement type: {0}")]
    UnhandledStatementType(String),

    #[error("{statement_type} statement (relevance={relevance}) produced an empty applies_to list")]
    EmptyAppliesTo {
        statement_type: String,
        relevance: String,
    },

    // -- record-local: counted and skipped --
    #[error("bad position: {0}")]
    BadPosition(String),

    #[error("bad feature cell: {0}")]
    BadFeature(String),

    #[error("event subtype '?' is not valid")]
    InvalidSubtype,

    #[error("exon-level events cannot be insertions/deletions or splice-site mutations")]
    ExonResolution,

    #[error("literature type {0} is not supported")]
    UnsupportedLiteratureType(String),

    #[error("external source has no usable url (type={lit_type}, id={id})")]
    NoSourceUrl { lit_type: String, id: String },

    #[error("url {url} matched more than one source organization: {matches:?}")]
    AmbiguousSource { url: String, matches: Vec<String> },

    #[error("could not match url {0} to a source organization")]
    UnresolvableSource(String),

    #[error("recorded title disagrees with fetched title (pmid={pmid}): {recorded:?} vs {fetched:?}")]
    TitleMismatch {
        pmid: String,
        recorded: String,
        fetched: String,
    },

    #[error("publication does not specify a journal (pmid={0})")]
    MissingJournal(String),

    #[error("metadata enrichment failed for {id}: {reason}")]
    Enrichment { id: String, reason: String },

    #[error("functional statement requires exactly one event, found {0}")]
    FunctionalArity(usize),

    #[error("relevance {0} is marked inconclusive/not determined")]
    InconclusiveRelevance(String),

    #[error("cannot resolve {statement_type} entry (relevance={relevance}) without a disease")]
    MissingDisease {
        statement_type: String,
        relevance: String,
    },

    #[error("gene annotations should carry exactly one event, found {0}")]
    GeneRoleArity(usize),
}

impl ConversionError {
    /// Systemic failures halt the batch; everything else is record-local.
    pub fn is_systemic(&self) -> bool {
        matches!(
            self,
            ConversionError::UnhandledCoordinateSystem(_)
                | ConversionError::UnspecifiedFeatureType(_)
                | ConversionError::UnhandledStatementType(_)
                | ConversionError::EmptyAppliesTo { .. }
        )
    }

    /// The counter bucket for a record-local failure; None for systemic ones.
    pub fn tally(&self) -> Option<Tally> {
        if self.is_systemic() {
            return None;
        }
        let bucket = match self {
            ConversionError::MissingDisease { .. } | ConversionError::GeneRoleArity(_) => {
                Tally::Nonsensical
            }
            _ => Tally::Unresolved,
        };
        Some(bucket)
    }
}
