//! Core identifier types for the class registry.

mod class_counter;

pub use class_counter::ClassCounter;

use serde::{Deserialize, Serialize};

/// Identifier for a finalized class object within a [`ClassRegistry`].
///
/// Ids are minted sequentially by the registry and are only meaningful for the
/// registry that created them. Zero is never a valid id.
///
/// [`ClassRegistry`]: crate::class::ClassRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Convert to the underlying u32 value
    pub fn to_u32(self) -> u32 {
        self.0
    }
}
