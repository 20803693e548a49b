//! Convert a parsed configuration into the configuration used at runtime.

use query_engine_metadata::metadata::{FieldPath, Metadata, QueryConfig};
use smol_str::SmolStr;

use crate::configuration::Configuration;
use crate::error::{InvalidEntityConfiguration, MakeRuntimeConfigurationError};
use crate::version1::ParsedConfiguration;

/// Check every entity and build the runtime configuration.
/// All problems are reported at once.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let errors: Vec<InvalidEntityConfiguration> = parsed_config
        .entities
        .0
        .iter()
        .flat_map(|(entity, config)| validate_entity(entity, config))
        .collect();

    if !errors.is_empty() {
        return Err(MakeRuntimeConfigurationError::InvalidEntities(errors));
    }

    Ok(Configuration {
        metadata: Metadata {
            entities: parsed_config.entities,
        },
    })
}

fn validate_entity(entity: &SmolStr, config: &QueryConfig) -> Vec<InvalidEntityConfiguration> {
    let mut errors = vec![];

    let lists: [(&'static str, &[FieldPath]); 2] = [
        ("searchableFields", &config.searchable_fields),
        ("filterableFields", &config.filterable_fields),
    ];
    for (list, paths) in lists {
        for path in paths {
            if path.resolve().is_err() {
                errors.push(InvalidEntityConfiguration::UnresolvableFieldPath {
                    entity: entity.clone(),
                    list,
                    path: path.0.clone(),
                });
            }
        }
    }

    if config.default_limit == 0 {
        errors.push(InvalidEntityConfiguration::ZeroDefaultLimit {
            entity: entity.clone(),
        });
    }
    match config.max_limit {
        Some(0) => errors.push(InvalidEntityConfiguration::ZeroMaxLimit {
            entity: entity.clone(),
        }),
        Some(max_limit) if config.default_limit > max_limit => {
            errors.push(InvalidEntityConfiguration::DefaultLimitAboveMaxLimit {
                entity: entity.clone(),
                default_limit: config.default_limit,
                max_limit,
            });
        }
        _ => {}
    }

    errors
}
