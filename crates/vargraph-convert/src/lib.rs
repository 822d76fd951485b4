//! vargraph-convert — Pure conversion of raw records into canonical graph
//! entities: coordinate positions, normalized features and variant events.

pub mod event;
pub mod feature;
pub mod position;

pub use event::convert_event;
pub use feature::convert_feature;
pub use position::convert_position;
