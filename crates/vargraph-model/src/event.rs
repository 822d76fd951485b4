//! Variant events: a category term or a positional description, wrapped in a
//! shared envelope carrying zygosity and presence flags.

use serde::Serialize;

use crate::entity::Feature;
use crate::position::Breakpoint;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Zygosity {
    Heterozygous,
    Homozygous,
}

/// Controlled-vocabulary event: a term applied to a single feature.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryEvent {
    pub term: String,
    pub primary_feature: Feature,
}

/// Coordinate-level event. `secondary_feature` is present only for
/// breakpoint-notation events joining two independent loci.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PositionalEvent {
    pub primary_feature: Feature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_feature: Option<Feature>,
    pub subtype: String,
    pub start: Breakpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Breakpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untemplated_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_aa: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_seq: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "@class")]
pub enum EventBody {
    #[serde(rename = "category_event")]
    Category(CategoryEvent),
    #[serde(rename = "positional_event")]
    Positional(PositionalEvent),
}

/// A converted combination event: envelope flags plus the event body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub zygosity: Option<Zygosity>,
    pub germline: bool,
    pub absence_of: bool,
    #[serde(flatten)]
    pub body: EventBody,
}

impl Event {
    pub fn primary_feature(&self) -> &Feature {
        match &self.body {
            EventBody::Category(c) => &c.primary_feature,
            EventBody::Positional(p) => &p.primary_feature,
        }
    }

    pub fn secondary_feature(&self) -> Option<&Feature> {
        match &self.body {
            EventBody::Category(_) => None,
            EventBody::Positional(p) => p.secondary_feature.as_ref(),
        }
    }
}

/// One converted entry of a record's event combination. Pure feature
/// annotations contribute a bare feature rather than a full event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EventEntry {
    Annotation(Feature),
    Event(Box<Event>),
}

impl EventEntry {
    /// The feature this entry is anchored on: the annotation feature itself,
    /// or the event's primary feature.
    pub fn primary_feature(&self) -> &Feature {
        match self {
            EventEntry::Annotation(f) => f,
            EventEntry::Event(e) => e.primary_feature(),
        }
    }

    pub fn secondary_feature(&self) -> Option<&Feature> {
        match self {
            EventEntry::Annotation(_) => None,
            EventEntry::Event(e) => e.secondary_feature(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn gene(name: &str) -> Feature {
        Feature::new("hugo", None, "gene", name)
    }

    #[test]
    fn test_category_event_flattens_envelope() {
        let event = Event {
            event_type: "copy number variant",
            zygosity: None,
            germline: false,
            absence_of: false,
            body: EventBody::Category(CategoryEvent {
                term: "amplification".into(),
                primary_feature: gene("erbb2"),
            }),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["@class"], "category_event");
        assert_eq!(json["type"], "copy number variant");
        assert_eq!(json["term"], "amplification");
        assert_eq!(json["zygosity"], serde_json::Value::Null);
    }

    #[test]
    fn test_positional_event_omits_absent_fields() {
        let event = Event {
            event_type: "mutation",
            zygosity: Some(Zygosity::Heterozygous),
            germline: true,
            absence_of: false,
            body: EventBody::Positional(PositionalEvent {
                primary_feature: gene("tp53"),
                secondary_feature: None,
                subtype: "substitution".into(),
                start: Breakpoint::Single(Position::Protein {
                    pos: Some(175),
                    ref_aa: Some("r".into()),
                }),
                end: None,
                untemplated_seq: None,
                termination_aa: None,
                reference_seq: None,
            }),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["@class"], "positional_event");
        assert_eq!(json["zygosity"], "heterozygous");
        assert!(json.get("secondary_feature").is_none());
        assert!(json.get("end").is_none());
    }
}
