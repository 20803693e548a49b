//! Translate `sortBy` and `sortOrder` into an ordering.

use query_engine_descriptor::descriptor::ast::{OrderBy, OrderDirection};
use query_engine_descriptor::descriptor::helpers;

use super::relationships;
use crate::translation::error::{Error, PathUsage};
use crate::translation::helpers::Env;
use crate::translation::parameters::{QueryParameters, SORT_BY, SORT_ORDER};

pub const DEFAULT_SORT_FIELD: &str = "createdAt";
pub const DEFAULT_SORT_DIRECTION: OrderDirection = OrderDirection::Desc;

pub fn translate_order_by(env: &Env, parameters: &QueryParameters) -> Result<OrderBy, Error> {
    let direction = parameters
        .last_text(SORT_ORDER)
        .filter(|text| !text.is_empty())
        .map_or(DEFAULT_SORT_DIRECTION, translate_direction);
    let sort_by = parameters
        .last_text(SORT_BY)
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_SORT_FIELD);

    Ok(match env.resolve_path(sort_by, PathUsage::Sort)? {
        Some(path) => relationships::nest_order_by(&path, direction),
        None => helpers::order_by_field(DEFAULT_SORT_FIELD, direction),
    })
}

fn translate_direction(text: &str) -> OrderDirection {
    if text.eq_ignore_ascii_case("asc") {
        OrderDirection::Asc
    } else if text.eq_ignore_ascii_case("desc") {
        OrderDirection::Desc
    } else {
        tracing::debug!(direction = text, "unknown sort direction, using the default");
        DEFAULT_SORT_DIRECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_metadata::metadata::{OverlongPathPolicy, QueryConfig};

    fn sort(config: &QueryConfig, query: &str) -> Result<serde_json::Value, Error> {
        let ordering =
            translate_order_by(&Env::new(config), &QueryParameters::from_query_string(query))?;
        Ok(serde_json::to_value(ordering).unwrap())
    }

    #[test]
    fn defaults_to_newest_first() {
        assert_eq!(
            sort(&QueryConfig::default(), "").unwrap(),
            serde_json::json!({ "createdAt": "desc" })
        );
    }

    #[test]
    fn plain_and_nested_keys() {
        let config = QueryConfig::default();
        assert_eq!(
            sort(&config, "sortBy=name&sortOrder=asc").unwrap(),
            serde_json::json!({ "name": "asc" })
        );
        assert_eq!(
            sort(&config, "sortBy=patient.user.email&sortOrder=DESC").unwrap(),
            serde_json::json!({ "patient": { "user": { "email": "desc" } } })
        );
    }

    #[test]
    fn unknown_directions_fall_back() {
        assert_eq!(
            sort(&QueryConfig::default(), "sortBy=name&sortOrder=sideways").unwrap(),
            serde_json::json!({ "name": "desc" })
        );
    }

    #[test]
    fn overlong_sort_keys_follow_the_policy() {
        let config = QueryConfig::default();
        assert_eq!(
            sort(&config, "sortBy=a.b.c.d&sortOrder=asc").unwrap(),
            serde_json::json!({ "createdAt": "asc" })
        );
        let config = config.with_overlong_paths(OverlongPathPolicy::Reject);
        assert!(matches!(
            sort(&config, "sortBy=a.b.c.d"),
            Err(Error::UnresolvableFieldPath {
                usage: PathUsage::Sort,
                ..
            })
        ));
    }
}
