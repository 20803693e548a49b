//! Translate the non-reserved request parameters into field conditions.

use indexmap::IndexMap;

use query_engine_descriptor::descriptor::ast::{ConditionTree, FilterValue, OR_KEY};

use super::{operators, relationships, values};
use crate::translation::error::{Error, PathUsage};
use crate::translation::helpers::Env;
use crate::translation::parameters::{ParameterValue, QueryParameters};

/// Segments the data-access layer reads as logical combinators. Never accepted in a filter key or
/// an operator object.
const LOGICAL_OPERATORS: [&str; 3] = ["AND", OR_KEY, "NOT"];

/// Merge one condition per usable filter parameter into the conditions, in request order.
pub fn translate_filters(
    env: &Env,
    parameters: &QueryParameters,
    mut conditions: ConditionTree,
) -> Result<ConditionTree, Error> {
    for (key, value) in parameters.filters() {
        if key.is_empty() {
            tracing::debug!("dropping filter without a key");
            continue;
        }
        let Some(value) = without_logical_operators(key, value) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if !env.config.allows_filter(key) {
            tracing::debug!(key, "dropping filter on a field that is not filterable");
            continue;
        }
        let Some(path) = env.resolve_path(key, PathUsage::Filter)? else {
            continue;
        };
        if path
            .segments()
            .iter()
            .any(|segment| LOGICAL_OPERATORS.contains(segment))
        {
            tracing::debug!(key, "dropping filter addressing a logical operator");
            continue;
        }

        let fragment = relationships::nest_condition(&path, translate_filter_value(&value));
        relationships::merge_conditions(&mut conditions, fragment);
    }
    Ok(conditions)
}

/// Remove the logical operators from an operator object, at any depth.
/// `None` when nothing is left of it.
fn without_logical_operators(key: &str, value: &ParameterValue) -> Option<ParameterValue> {
    let ParameterValue::Object(object) = value else {
        return Some(value.clone());
    };
    let kept: IndexMap<String, ParameterValue> = object
        .iter()
        .filter_map(|(name, inner)| {
            if LOGICAL_OPERATORS.contains(&name.as_str()) {
                tracing::debug!(key, operator = name.as_str(), "dropping logical operator");
                return None;
            }
            without_logical_operators(key, inner).map(|inner| (name.clone(), inner))
        })
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(ParameterValue::Object(kept))
    }
}

/// An operator object is a range; anything else is coerced.
pub fn translate_filter_value(value: &ParameterValue) -> FilterValue {
    match value {
        ParameterValue::Object(operators) => operators::translate_range(operators),
        ParameterValue::Text(_) | ParameterValue::List(_) => values::coerce(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_descriptor::descriptor::helpers;
    use query_engine_metadata::metadata::{OverlongPathPolicy, QueryConfig};

    fn filter(config: &QueryConfig, query: &str) -> Result<ConditionTree, Error> {
        translate_filters(
            &Env::new(config),
            &QueryParameters::from_query_string(query),
            helpers::empty_conditions(),
        )
    }

    #[test]
    fn coerces_plain_values() {
        let conditions = filter(
            &QueryConfig::default(),
            "isDeleted=false&experience=5&gender=MALE&id=1&id=2",
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({
                "isDeleted": false,
                "experience": 5,
                "gender": "MALE",
                "id": { "in": [1, 2] }
            })
        );
    }

    #[test]
    fn skips_empty_values() {
        let conditions = filter(&QueryConfig::default(), "gender=&ids[]=&name=x").unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({ "ids": { "in": [""] }, "name": "x" })
        );
        let conditions = filter(&QueryConfig::default(), "gender=").unwrap();
        assert!(conditions.is_empty());
    }

    #[test]
    fn drops_keys_outside_the_allow_list() {
        let config = QueryConfig::new(Vec::<&str>::new(), ["gender", "patient.name"]);
        let conditions = filter(&config, "gender=MALE&role=ADMIN&patient.name=x&patient.age=3")
            .unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({ "gender": "MALE", "patient": { "name": "x" } })
        );
    }

    #[test]
    fn ranges_work_on_plain_and_nested_keys() {
        let conditions = filter(
            &QueryConfig::default(),
            "appointmentFee[gte]=10&appointmentFee[lte]=20&patient.age[gt]=30",
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({
                "appointmentFee": { "gte": 10, "lte": 20 },
                "patient": { "age": { "gt": 30 } }
            })
        );
    }

    #[test]
    fn filters_on_one_relation_share_its_wrapper() {
        let conditions = filter(
            &QueryConfig::default(),
            "patient.name=John&patient.age=40&patient.user.email=a%40b.com",
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({
                "patient": {
                    "name": "John",
                    "age": 40,
                    "user": { "email": "a@b.com" }
                }
            })
        );
    }

    #[test]
    fn logical_operator_segments_are_dropped() {
        let conditions =
            filter(&QueryConfig::default(), "OR=1&patient.NOT=2&AND.x=3&status=DONE").unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({ "status": "DONE" })
        );
    }

    #[test]
    fn logical_operators_inside_operator_objects_are_dropped() {
        let conditions = filter(
            &QueryConfig::default(),
            "patient[OR]=1&user[AND]=2&fee[gte]=10&fee[NOT]=3&status=DONE",
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({ "fee": { "gte": 10 }, "status": "DONE" })
        );
    }

    #[test]
    fn keyless_filters_are_dropped_under_either_policy() {
        let config = QueryConfig::default().with_overlong_paths(OverlongPathPolicy::Reject);
        let conditions = filter(&config, "=x&gender=MALE").unwrap();
        assert_eq!(
            serde_json::to_value(&conditions).unwrap(),
            serde_json::json!({ "gender": "MALE" })
        );
    }

    #[test]
    fn overlong_keys_follow_the_policy() {
        let config = QueryConfig::default();
        assert!(filter(&config, "a.b.c.d=1").unwrap().is_empty());
        assert!(filter(&config, "a..b=1").unwrap().is_empty());

        let config = config.with_overlong_paths(OverlongPathPolicy::Reject);
        assert_eq!(
            filter(&config, "gender=MALE&a.b.c.d=1"),
            Err(Error::UnresolvableFieldPath {
                usage: PathUsage::Filter,
                path: "a.b.c.d".to_string(),
                segments: 4,
            })
        );
    }
}
