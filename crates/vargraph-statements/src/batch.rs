//! Batch driver: runs event conversion, source resolution and classification
//! over every loaded record.
//!
//! Record-local failures are counted and the record skipped; systemic
//! failures abort the whole batch so a rule-coverage gap never produces a
//! partial load.

use serde::Serialize;
use tracing::warn;

use vargraph_common::{BatchCounts, MessageDedup, Result};
use vargraph_convert::convert_event;
use vargraph_flatfile::RawRecord;
use vargraph_model::Statement;
use vargraph_sources::{MetadataLookup, SourceResolver};

use crate::classifier::{classify_record, RecordOutcome};

/// Top-level shape of the emitted JSON document.
#[derive(Debug, Serialize)]
pub struct Document {
    pub entries: Vec<Statement>,
}

#[derive(Debug)]
pub struct BatchOutput {
    pub document: Document,
    pub counts: BatchCounts,
}

async fn process_record<L: MetadataLookup>(
    record: &RawRecord,
    resolver: &mut SourceResolver<L>,
) -> Result<RecordOutcome> {
    let events = record
        .combination
        .iter()
        .map(convert_event)
        .collect::<Result<Vec<_>>>()?;
    let source = resolver.resolve(&record.literature).await?;
    classify_record(record, &events, &source)
}

/// Run the conversion over every record and collect emitted statements.
pub async fn run_batch<L: MetadataLookup>(
    records: &[RawRecord],
    resolver: &mut SourceResolver<L>,
) -> Result<BatchOutput> {
    let mut entries = Vec::new();
    let mut counts = BatchCounts::new();
    let mut dedup = MessageDedup::new();

    for record in records {
        match process_record(record, resolver).await {
            Ok(outcome) => {
                counts.manual_intervention += outcome.manual_intervention;
                entries.extend(outcome.statements);
            }
            Err(err) => {
                let Some(tally) = err.tally() else {
                    return Err(err);
                };
                if dedup.first_occurrence(&err.to_string()) {
                    warn!(ident = %record.ident, %err, "skipping problem entry");
                }
                counts.record(tally);
            }
        }
    }

    counts.parsed = entries.len();
    counts.log_summary();
    Ok(BatchOutput {
        document: Document { entries },
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vargraph_flatfile::{RawComboEvent, RawEvent, RawFeature, RawLiterature, RawStatement};
    use vargraph_model::StatementType;
    use vargraph_sources::{EnrichmentCache, StaticLookup};

    fn annotation(name: &str) -> RawComboEvent {
        RawComboEvent {
            event: RawEvent::Annotation {
                feature: RawFeature {
                    ftype: "hugo".into(),
                    subtype: "gene".into(),
                    id: name.into(),
                    version: None,
                },
            },
            presence: true,
            zygosity: None,
            germline: false,
        }
    }

    fn record(
        ident: &str,
        statement_type: StatementType,
        relevance: &str,
        disease: &str,
        literature: RawLiterature,
    ) -> RawRecord {
        RawRecord {
            ident: ident.into(),
            statement: RawStatement {
                statement_type,
                relevance: relevance.into(),
                context: "reported".into(),
            },
            disease: disease.into(),
            evidence: "literature".into(),
            literature,
            combination: vec![annotation("kras")],
        }
    }

    fn pubmed(id: &str) -> RawLiterature {
        RawLiterature {
            lit_type: "pubmed".into(),
            id: id.into(),
            title: "some title".into(),
        }
    }

    fn resolver(lookup: StaticLookup) -> SourceResolver<StaticLookup> {
        SourceResolver::new(lookup, EnrichmentCache::new())
    }

    #[tokio::test]
    async fn test_bad_records_are_counted_not_fatal() {
        let records = vec![
            record(
                "good",
                StatementType::Biological,
                "oncogene",
                "melanoma",
                pubmed("11111111"),
            ),
            // unknown source url: unresolved
            record(
                "bad-source",
                StatementType::Biological,
                "oncogene",
                "melanoma",
                RawLiterature {
                    lit_type: "website".into(),
                    id: "http://example.org/kb".into(),
                    title: "".into(),
                },
            ),
            // diagnostic with no disease and no panel escape: nonsensical
            record(
                "no-disease",
                StatementType::Diagnostic,
                "favours diagnosis",
                "not specified",
                pubmed("11111111"),
            ),
        ];
        let lookup = StaticLookup::new().with("11111111", "Some title", "2001 Jan", "Nature");
        let mut resolver = resolver(lookup);
        let output = run_batch(&records, &mut resolver).await.unwrap();
        assert_eq!(output.counts.parsed, 1);
        assert_eq!(output.counts.unresolved, 1);
        assert_eq!(output.counts.nonsensical, 1);
        assert_eq!(output.counts.manual_intervention, 0);
        assert_eq!(output.document.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_systemic_failure_aborts_the_batch() {
        let records = vec![
            record(
                "good",
                StatementType::Biological,
                "oncogene",
                "melanoma",
                pubmed("11111111"),
            ),
            // no classification rule for this relevance
            record(
                "gap",
                StatementType::Biological,
                "tumourigenesis",
                "melanoma",
                pubmed("11111111"),
            ),
        ];
        let lookup = StaticLookup::new().with("11111111", "Some title", "2001 Jan", "Nature");
        let mut resolver = resolver(lookup);
        let err = run_batch(&records, &mut resolver).await.unwrap_err();
        assert!(err.is_systemic());
    }

    #[tokio::test]
    async fn test_document_serializes_under_entries_key() {
        let records = vec![record(
            "good",
            StatementType::Biological,
            "oncogene",
            "melanoma",
            pubmed("11111111"),
        )];
        let lookup = StaticLookup::new().with("11111111", "Some title", "2001 Jan", "Nature");
        let mut resolver = resolver(lookup);
        let output = run_batch(&records, &mut resolver).await.unwrap();
        let json = serde_json::to_value(&output.document).unwrap();
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["@class"], "statement");
        assert_eq!(entries[0]["supported_by"][0]["@class"], "publication");
    }

    #[tokio::test]
    async fn test_one_lookup_per_pmid_across_records() {
        let records = vec![
            record(
                "a",
                StatementType::Biological,
                "oncogene",
                "melanoma",
                pubmed("11111111"),
            ),
            record(
                "b",
                StatementType::Prognostic,
                "unfavourable prognosis",
                "melanoma",
                pubmed("11111111"),
            ),
        ];
        let lookup = StaticLookup::new().with("11111111", "Some title", "2001 Jan", "Nature");
        let mut resolver = resolver(lookup);
        run_batch(&records, &mut resolver).await.unwrap();
        assert_eq!(resolver.into_cache().len(), 1);
    }
}
