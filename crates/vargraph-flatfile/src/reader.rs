//! Tab-separated flat-file reader: joins the references table with the events
//! table on record ident and yields validated raw records.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::notation::{parse_feature_cell, parse_position_token};
use crate::record::{
    parse_zygosity, RawComboEvent, RawEvent, RawEventKind, RawLiterature, RawNotation, RawPosition,
    RawRecord, RawStatement,
};

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    ident: String,
    #[serde(rename = "type")]
    statement_type: String,
    relevance: String,
    context: String,
    disease_list: String,
    evidence: String,
    lit_type: String,
    lit_id: String,
    lit_title: String,
}

#[derive(Debug, Deserialize)]
struct EventRow {
    record: String,
    kind: String,
    presence: String,
    #[serde(default)]
    zygosity: String,
    #[serde(default)]
    term: String,
    feature_x: String,
    #[serde(default)]
    feature_y: String,
    #[serde(default)]
    subtype: String,
    #[serde(default)]
    break_x1: String,
    #[serde(default)]
    break_x2: String,
    #[serde(default)]
    break_y1: String,
    #[serde(default)]
    break_y2: String,
    #[serde(rename = "ref", default)]
    reference_seq: String,
    #[serde(default)]
    alt: String,
}

fn tsv_reader(path: &Path) -> anyhow::Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))
}

fn parse_presence(cell: &str) -> anyhow::Result<bool> {
    match cell.trim() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => bail!("bad presence flag: {other}"),
    }
}

fn optional(cell: &str) -> Option<&str> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn optional_position(cell: &str) -> anyhow::Result<Option<RawPosition>> {
    optional(cell)
        .map(|token| parse_position_token(token).map_err(anyhow::Error::from))
        .transpose()
}

fn build_event(row: &EventRow) -> anyhow::Result<RawComboEvent> {
    let (zygosity, germline) = parse_zygosity(&row.zygosity)?;
    let presence = parse_presence(&row.presence)?;

    let event = if row.kind == "FANN" {
        RawEvent::Annotation {
            feature: parse_feature_cell(&row.feature_x)?,
        }
    } else {
        let kind = RawEventKind::parse(&row.kind)
            .with_context(|| format!("unknown event kind: {}", row.kind))?;
        if let Some(break_x1) = optional(&row.break_x1) {
            RawEvent::Positional {
                kind,
                notation: RawNotation {
                    subtype: row.subtype.trim().to_string(),
                    feature_x: parse_feature_cell(&row.feature_x)?,
                    feature_y: optional(&row.feature_y)
                        .map(parse_feature_cell)
                        .transpose()?,
                    break_x1: parse_position_token(break_x1)?,
                    break_x2: optional_position(&row.break_x2)?,
                    break_y1: optional_position(&row.break_y1)?,
                    break_y2: optional_position(&row.break_y2)?,
                    reference_seq: optional(&row.reference_seq).map(String::from),
                    alt: optional(&row.alt).map(String::from),
                },
            }
        } else {
            let term = optional(&row.term)
                .with_context(|| format!("category event without a term (record={})", row.record))?;
            RawEvent::Category {
                kind,
                term: term.to_string(),
                feature: parse_feature_cell(&row.feature_x)?,
            }
        }
    };

    Ok(RawComboEvent {
        event,
        presence,
        zygosity,
        germline,
    })
}

/// Load the knowledge base from its two flat files. Structural problems
/// (unknown coordinate tags, unknown statement types, malformed rows) fail
/// the load; data-quality problems are left for the conversion engine.
pub fn load_kb(references: &Path, events: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let mut combinations: HashMap<String, Vec<RawComboEvent>> = HashMap::new();
    for row in tsv_reader(events)?.deserialize() {
        let row: EventRow = row.context("reading events row")?;
        let combo = build_event(&row)
            .with_context(|| format!("events row for record {}", row.record))?;
        combinations.entry(row.record).or_default().push(combo);
    }

    let mut records = Vec::new();
    for row in tsv_reader(references)?.deserialize() {
        let row: ReferenceRow = row.context("reading references row")?;
        let statement_type = row
            .statement_type
            .parse()
            .with_context(|| format!("references row {}", row.ident))?;
        records.push(RawRecord {
            combination: combinations.remove(&row.ident).unwrap_or_default(),
            statement: RawStatement {
                statement_type,
                relevance: row.relevance.trim().to_string(),
                context: row.context,
            },
            disease: row.disease_list.trim().to_string(),
            evidence: row.evidence.trim().to_string(),
            literature: RawLiterature {
                lit_type: row.lit_type,
                id: row.lit_id,
                title: row.lit_title,
            },
            ident: row.ident,
        });
    }
    tracing::info!(records = records.len(), "loaded knowledge-base flat files");
    Ok(records)
}
