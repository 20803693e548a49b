//! Handle conditions and orderings on related entities.

use query_engine_descriptor::descriptor::ast::{
    ConditionNode, ConditionTree, FilterValue, OrderBy, OrderDirection,
};
use query_engine_descriptor::descriptor::helpers;
use query_engine_metadata::metadata::PathSegments;

/// Nest a leaf condition inside the relations of its path:
/// `patient.user.email` becomes `{ patient: { user: { email: leaf } } }`.
pub fn nest_condition(path: &PathSegments<'_>, leaf: FilterValue) -> ConditionTree {
    match *path {
        PathSegments::Field(field) => helpers::field_condition(field, leaf),
        PathSegments::Relation { relation, field } => {
            helpers::relation_condition(relation, helpers::field_condition(field, leaf))
        }
        PathSegments::NestedRelation {
            relation,
            nested_relation,
            field,
        } => helpers::relation_condition(
            relation,
            helpers::relation_condition(nested_relation, helpers::field_condition(field, leaf)),
        ),
    }
}

/// Nest an ordering inside the relations of its path.
pub fn nest_order_by(path: &PathSegments<'_>, direction: OrderDirection) -> OrderBy {
    match *path {
        PathSegments::Field(field) => helpers::order_by_field(field, direction),
        PathSegments::Relation { relation, field } => {
            helpers::order_by_relation(relation, helpers::order_by_field(field, direction))
        }
        PathSegments::NestedRelation {
            relation,
            nested_relation,
            field,
        } => helpers::order_by_relation(
            relation,
            helpers::order_by_relation(nested_relation, helpers::order_by_field(field, direction)),
        ),
    }
}

/// Merge a fragment into the conditions. Relation wrappers present in both are merged
/// recursively; anything else in the fragment replaces what was there.
pub fn merge_conditions(conditions: &mut ConditionTree, fragment: ConditionTree) {
    if !fragment.or.is_empty() {
        conditions.or = fragment.or;
    }
    for (key, node) in fragment.fields {
        match node {
            ConditionNode::Relation(nested) => match conditions.fields.get_mut(&key) {
                Some(ConditionNode::Relation(existing)) => merge_conditions(existing, nested),
                _ => {
                    conditions.fields.insert(key, ConditionNode::Relation(nested));
                }
            },
            value @ ConditionNode::Value(_) => {
                conditions.fields.insert(key, value);
            }
        }
    }
}
