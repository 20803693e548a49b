//! Translate the free-text search term into an OR list over the searchable fields.

use query_engine_descriptor::descriptor::ast::ConditionTree;
use query_engine_descriptor::descriptor::helpers;

use super::relationships;
use crate::translation::error::{Error, PathUsage};
use crate::translation::helpers::Env;
use crate::translation::parameters::{QueryParameters, SEARCH_TERM};

/// Install one case-insensitive contains condition per searchable field.
/// Nothing happens without a search term or without searchable fields.
pub fn translate_search(
    env: &Env,
    parameters: &QueryParameters,
    mut conditions: ConditionTree,
) -> Result<ConditionTree, Error> {
    let Some(term) = parameters.last_text(SEARCH_TERM).filter(|term| !term.is_empty()) else {
        return Ok(conditions);
    };

    let mut alternatives = Vec::with_capacity(env.config.searchable_fields.len());
    for field in &env.config.searchable_fields {
        if let Some(path) = env.resolve_path(field.as_str(), PathUsage::Search)? {
            alternatives.push(relationships::nest_condition(
                &path,
                helpers::contains_insensitive(term),
            ));
        }
    }

    if !alternatives.is_empty() {
        conditions.or = alternatives;
    }
    Ok(conditions)
}
