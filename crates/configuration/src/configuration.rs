//! Configuration for the query compiler.

use query_engine_metadata::metadata;
use schemars::schema::RootSchema;

use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to compile queries at
/// runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which checks every entity first. Only the file format has to
/// deal with versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
}

impl Configuration {
    /// The names of the configured entities, in order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.metadata.entities.0.keys().map(smol_str::SmolStr::as_str)
    }
}

/// The JSON schema of the configuration file format.
pub fn generate_latest_schema() -> RootSchema {
    schemars::schema_for!(ParsedConfiguration)
}
