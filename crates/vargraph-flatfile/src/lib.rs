//! vargraph-flatfile — Loader for the curated knowledge-base flat files.
//!
//! Parses the two tab-separated exports (a references table and an events
//! table joined on record ident) into typed, validated [`RawRecord`]s. The
//! conversion core treats these records as read-only: structural problems are
//! caught here, at load time, so the rule engine can assume validity.

pub mod notation;
pub mod reader;
pub mod record;

pub use reader::load_kb;
pub use record::{
    CoordinateSystem, RawComboEvent, RawEvent, RawEventKind, RawFeature, RawLiterature,
    RawNotation, RawPosition, RawRecord, RawStatement,
};
