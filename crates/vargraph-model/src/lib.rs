//! vargraph-model — Graph-ready entities emitted by the conversion engine.
//!
//! Every entity serializes with a `@class` discriminator so the downstream
//! graph loader can dispatch on record shape without schema lookups.

pub mod entity;
pub mod event;
pub mod position;
pub mod source;
pub mod statement;
mod tag;

pub use entity::{Disease, Feature, Target, TargetKind, Therapy};
pub use event::{CategoryEvent, Event, EventBody, EventEntry, PositionalEvent, Zygosity};
pub use position::{Breakpoint, Position, Range};
pub use source::Source;
pub use statement::{GraphItem, Statement, StatementType};
