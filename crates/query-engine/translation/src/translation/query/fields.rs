//! Translate `fields` and `includes` into a projection.

use query_engine_descriptor::descriptor::ast::Projection;
use query_engine_descriptor::descriptor::helpers;

use crate::translation::helpers::Env;
use crate::translation::parameters::{QueryParameters, FIELDS, INCLUDES};

/// Selecting fields replaces relation inclusion entirely.
pub fn translate_projection(env: &Env, parameters: &QueryParameters) -> Projection {
    if let Some(fields) = parameters.last_text(FIELDS) {
        let selected: Vec<&str> = split_list(fields).collect();
        if !selected.is_empty() {
            return helpers::select_fields(selected);
        }
    }

    let requested = parameters
        .last_text(INCLUDES)
        .into_iter()
        .flat_map(split_list)
        .filter(|relation| {
            let allowed = env.config.allows_include(relation);
            if !allowed {
                tracing::debug!(relation, "dropping relation that is not includable");
            }
            allowed
        });
    helpers::include_relations(
        env.config
            .default_includes
            .iter()
            .map(smol_str::SmolStr::as_str)
            .chain(requested),
    )
}

/// Comma-separated entries, trimmed, without empty ones.
fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}
