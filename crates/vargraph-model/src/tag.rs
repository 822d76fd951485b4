use serde::{Serialize, Serializer};

/// The `@class` discriminator value carried by an emitted entity.
/// Set once by the owning type's constructor, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClassTag(pub &'static str);

impl Serialize for ClassTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}
