//! Classification of one record into statements.
//!
//! A record expands into the Cartesian product of its contexts and diseases;
//! each combination yields at most one statement. Failures here are
//! record-local unless the rule tables simply have no branch for the input,
//! which is a systemic gap and halts the batch.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use vargraph_common::{ConversionError, Result};
use vargraph_flatfile::RawRecord;
use vargraph_model::{
    Disease, EventEntry, GraphItem, Source, Statement, StatementType, Target, TargetKind, Therapy,
};

use crate::rules::{match_biological, RuleAction};

/// Panel id that lets a diagnostic statement stand without a disease.
const AMPLISEQ_PANEL: &str = "ampliseq panel V2";

fn therapy_split_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\+\s*").unwrap())
}

/// Statements produced from one record, plus the number of (context, disease)
/// combinations set aside for manual curation.
#[derive(Debug, Default)]
pub struct RecordOutcome {
    pub statements: Vec<Statement>,
    pub manual_intervention: usize,
}

fn requires_disease_only(statement_type: StatementType, relevance: &str) -> bool {
    matches!(
        statement_type,
        StatementType::Diagnostic | StatementType::Occurrence
    ) || matches!(relevance, "pathogenic" | "recurrent")
}

fn graph_events(events: &[EventEntry]) -> impl Iterator<Item = GraphItem> + '_ {
    events.iter().cloned().map(GraphItem::from)
}

/// Relevance values that are rewritten before rule matching.
fn effective_relevance(relevance: &str, context: &str) -> String {
    if relevance == "inconclusive"
        || (relevance == "not determined" && context.contains("uncertain functional effect"))
    {
        "inconclusive functional effect".to_string()
    } else if relevance == "not specified" && context == "cancer associated gene" {
        "associated-with".to_string()
    } else {
        relevance.to_string()
    }
}

/// Classify one record against its converted events and resolved source.
pub fn classify_record(
    record: &RawRecord,
    events: &[EventEntry],
    source: &Source,
) -> Result<RecordOutcome> {
    if let Source::Publication { pmid, journal, .. } = source {
        if journal.is_none() {
            return Err(ConversionError::MissingJournal(pmid.to_string()));
        }
    }

    let diseases: Vec<Option<Disease>> = if record.disease == "not specified" {
        vec![None]
    } else {
        record
            .disease
            .split(';')
            .map(|name| Some(Disease::new(name.trim().to_lowercase())))
            .collect()
    };
    let contexts: Vec<String> = record
        .statement
        .context
        .split(';')
        .map(|c| c.trim().to_lowercase())
        .collect();
    let base_relevance = record.statement.relevance.to_lowercase();
    let statement_type = record.statement.statement_type;

    let mut outcome = RecordOutcome::default();
    for context in &contexts {
        for disease in &diseases {
            let relevance = effective_relevance(&base_relevance, context);
            let mut stat = Statement::new(statement_type, relevance.clone());
            stat.supported_by.push(source.clone());

            if requires_disease_only(statement_type, &relevance) {
                let Some(disease) = disease else {
                    if statement_type == StatementType::Diagnostic
                        && (record.evidence == "clinical-test"
                            || record.literature.id == AMPLISEQ_PANEL)
                    {
                        // Panel and clinical-test assays assert the events
                        // themselves rather than a disease.
                        stat.applies_to.extend(graph_events(events));
                        outcome.statements.push(stat);
                        continue;
                    }
                    return Err(ConversionError::MissingDisease {
                        statement_type: statement_type.to_string(),
                        relevance,
                    });
                };
                stat.applies_to.push(GraphItem::Disease(disease.clone()));
            } else {
                if let Some(disease) = disease {
                    stat.requires.push(GraphItem::Disease(disease.clone()));
                }
                match statement_type {
                    StatementType::Biological => {
                        match match_biological(&relevance, context) {
                            Some(RuleAction::GeneRole) => {
                                if events.len() != 1 {
                                    return Err(ConversionError::GeneRoleArity(events.len()));
                                }
                                stat.applies_to.extend(graph_events(events));
                                outcome.statements.push(stat);
                                continue;
                            }
                            Some(RuleAction::Functional) => {
                                if events.len() != 1 {
                                    return Err(ConversionError::FunctionalArity(events.len()));
                                }
                                let primary = events[0].primary_feature();
                                stat.applies_to.push(GraphItem::Feature(primary.clone()));
                                if let Some(secondary) = events[0].secondary_feature() {
                                    if secondary.name != primary.name {
                                        stat.applies_to
                                            .push(GraphItem::Feature(secondary.clone()));
                                    }
                                }
                            }
                            Some(RuleAction::Inconclusive) => {
                                return Err(ConversionError::InconclusiveRelevance(relevance));
                            }
                            Some(RuleAction::Fusion) => {
                                // Fusions with anything but one two-feature
                                // event need a curator's eye.
                                let fused = match events {
                                    [single] => single
                                        .secondary_feature()
                                        .map(|secondary| (single.primary_feature(), secondary)),
                                    _ => None,
                                };
                                let Some((primary, secondary)) = fused else {
                                    outcome.manual_intervention += 1;
                                    debug!(ident = %record.ident, "fusion set aside for manual curation");
                                    continue;
                                };
                                stat.applies_to.push(GraphItem::Feature(primary.clone()));
                                if secondary.name != primary.name {
                                    stat.applies_to.push(GraphItem::Feature(secondary.clone()));
                                }
                            }
                            Some(RuleAction::EventList) => {
                                stat.applies_to.extend(graph_events(events));
                                outcome.statements.push(stat);
                                continue;
                            }
                            Some(RuleAction::Pathway) => {
                                stat.applies_to.push(GraphItem::Target(Target::new(
                                    context.clone(),
                                    TargetKind::Pathway,
                                )));
                            }
                            Some(RuleAction::Cooperative) => {
                                // All events must be anchored on one shared
                                // feature with no fusion partners.
                                let coherent = events.first().is_some_and(|first| {
                                    events.iter().all(|e| {
                                        matches!(e, EventEntry::Event(_))
                                            && e.secondary_feature().is_none()
                                            && e.primary_feature().name
                                                == first.primary_feature().name
                                    })
                                });
                                if !coherent {
                                    outcome.manual_intervention += 1;
                                    debug!(ident = %record.ident, "cooperative events set aside for manual curation");
                                    continue;
                                }
                                stat.applies_to
                                    .push(GraphItem::Feature(events[0].primary_feature().clone()));
                            }
                            Some(RuleAction::AssociatedWith) => {
                                stat.applies_to.push(GraphItem::Target(Target::new(
                                    context.clone(),
                                    TargetKind::Phenotype,
                                )));
                            }
                            // No rule matched; the empty applies_to list is
                            // caught below as a coverage gap.
                            None => {}
                        }
                    }
                    StatementType::Therapeutic => {
                        for name in therapy_split_pattern().split(context) {
                            stat.applies_to
                                .push(GraphItem::Therapy(Therapy::new(name)));
                        }
                    }
                    StatementType::Prognostic => {}
                    // Disease-anchored types are fully handled above.
                    StatementType::Diagnostic | StatementType::Occurrence => {}
                }
            }

            stat.requires.extend(graph_events(events));
            if stat.applies_to.is_empty() && statement_type != StatementType::Prognostic {
                return Err(ConversionError::EmptyAppliesTo {
                    statement_type: statement_type.to_string(),
                    relevance,
                });
            }
            outcome.statements.push(stat);
        }
    }
    Ok(outcome)
}
