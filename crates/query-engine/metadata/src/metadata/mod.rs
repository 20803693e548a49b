//! Metadata information regarding the entities we compile queries for.

pub mod entities;
pub mod fields;

// re-export without modules
pub use entities::*;
pub use fields::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    pub entities: EntitiesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            entities: EntitiesInfo::empty(),
        }
    }

    /// Lookup the query configuration of an entity.
    pub fn lookup_entity(&self, entity_name: &str) -> Option<&QueryConfig> {
        self.entities.0.get(entity_name)
    }
}
