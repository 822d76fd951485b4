//! Assembly of canonical events from raw combination entries.

use std::sync::OnceLock;

use regex::Regex;

use vargraph_common::{ConversionError, Result};
use vargraph_flatfile::{CoordinateSystem, RawComboEvent, RawEvent, RawNotation, RawPosition};
use vargraph_model::{
    Breakpoint, CategoryEvent, Event, EventBody, EventEntry, PositionalEvent,
};

use crate::feature::convert_feature;
use crate::position::convert_position;

/// Raw positional subtype → canonical subtype. Unlisted subtypes pass through.
const EVENT_SUBTYPES: &[(&str, &str)] = &[
    (">", "substitution"),
    ("mis", "substitution"),
    ("del", "deletion"),
    ("fs", "frameshift"),
    ("ins", "insertion"),
    ("delins", "indel"),
    ("copyloss", "loss"),
    ("copygain", "gain"),
    ("dup", "duplication"),
    ("spl", "splice-site"),
];

/// Subtypes that exon-level resolution cannot express.
const EXON_INVALID_SUBTYPES: &[&str] = &["fs", "delins", "spl", "ins"];

fn frameshift_alt_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w?)(\*(\d+)?)?$").unwrap())
}

fn map_subtype(raw: &str) -> String {
    EVENT_SUBTYPES
        .iter()
        .find(|(key, _)| *key == raw)
        .map(|(_, mapped)| (*mapped).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn convert_breakpoint(start: &RawPosition, end: Option<&RawPosition>) -> Result<Breakpoint> {
    let start = convert_position(start)?;
    let end = end.map(convert_position).transpose()?;
    Ok(Breakpoint::from_pair(start, end))
}

fn convert_positional(notation: &RawNotation) -> Result<PositionalEvent> {
    if notation.break_x1.system == CoordinateSystem::Exonic
        && EXON_INVALID_SUBTYPES.contains(&notation.subtype.as_str())
    {
        return Err(ConversionError::ExonResolution);
    }
    if notation.subtype == "?" {
        return Err(ConversionError::InvalidSubtype);
    }

    let start = convert_breakpoint(&notation.break_x1, notation.break_x2.as_ref())?;
    let end = notation
        .break_y1
        .as_ref()
        .map(|y1| convert_breakpoint(y1, notation.break_y2.as_ref()))
        .transpose()?;

    let mut event = PositionalEvent {
        primary_feature: convert_feature(&notation.feature_x)?,
        secondary_feature: notation
            .feature_y
            .as_ref()
            .map(convert_feature)
            .transpose()?,
        subtype: map_subtype(&notation.subtype),
        start,
        end,
        untemplated_seq: None,
        termination_aa: None,
        reference_seq: notation.reference_seq.clone(),
    };

    if notation.subtype == "fs" {
        // Frameshift alterations encode an optional inserted residue and an
        // optional termination position, e.g. "v*12", "*", "g".
        if let Some(alt) = &notation.alt {
            if let Some(caps) = frameshift_alt_pattern().captures(alt) {
                event.untemplated_seq = caps.get(1).map(|m| m.as_str().to_string());
                event.termination_aa = caps.get(3).and_then(|m| m.as_str().parse().ok());
            }
        }
    } else if let Some(alt) = &notation.alt {
        event.untemplated_seq = Some(alt.clone());
    }

    Ok(event)
}

/// Convert one combination entry. Feature annotations yield a bare feature;
/// everything else a full event with envelope flags.
pub fn convert_event(combo: &RawComboEvent) -> Result<EventEntry> {
    match &combo.event {
        RawEvent::Annotation { feature } => Ok(EventEntry::Annotation(convert_feature(feature)?)),
        RawEvent::Category { kind, term, feature } => Ok(EventEntry::Event(Box::new(Event {
            event_type: kind.term(),
            zygosity: combo.zygosity,
            germline: combo.germline,
            absence_of: !combo.presence,
            body: EventBody::Category(CategoryEvent {
                term: term.clone(),
                primary_feature: convert_feature(feature)?,
            }),
        }))),
        RawEvent::Positional { kind, notation } => Ok(EventEntry::Event(Box::new(Event {
            event_type: kind.term(),
            zygosity: combo.zygosity,
            germline: combo.germline,
            absence_of: !combo.presence,
            body: EventBody::Positional(convert_positional(notation)?),
        }))),
    }
}
