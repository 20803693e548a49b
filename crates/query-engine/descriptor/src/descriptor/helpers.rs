//! Helpers for building descriptor types in certain shapes and patterns.

use super::ast::*;
use indexmap::IndexMap;

// Empty clauses //

/// A condition tree that matches every row.
pub fn empty_conditions() -> ConditionTree {
    ConditionTree::default()
}

/// An inclusion of no relations.
pub fn empty_include() -> Projection {
    Projection::Include(IndexMap::new())
}

// Leaves //

/// A single comparison on a field.
pub fn field_condition(field: impl Into<String>, value: FilterValue) -> ConditionTree {
    ConditionTree {
        or: vec![],
        fields: IndexMap::from([(field.into(), ConditionNode::Value(value))]),
    }
}

/// Wrap conditions inside a relation: `{ relation: conditions }`.
pub fn relation_condition(relation: impl Into<String>, conditions: ConditionTree) -> ConditionTree {
    ConditionTree {
        or: vec![],
        fields: IndexMap::from([(relation.into(), ConditionNode::Relation(conditions))]),
    }
}

/// A case-insensitive substring match.
pub fn contains_insensitive(term: impl Into<String>) -> FilterValue {
    FilterValue::Search(TextSearch {
        contains: term.into(),
        mode: QueryMode::Insensitive,
    })
}

// Ordering //

/// Order by a field of the current entity.
pub fn order_by_field(field: impl Into<String>, direction: OrderDirection) -> OrderBy {
    OrderBy {
        target: field.into(),
        node: OrderByNode::Direction(direction),
    }
}

/// Order by a field reached through a relation.
pub fn order_by_relation(relation: impl Into<String>, nested: OrderBy) -> OrderBy {
    OrderBy {
        target: relation.into(),
        node: OrderByNode::Nested(Box::new(nested)),
    }
}

// Projection //

/// Select exactly these fields.
pub fn select_fields<I, S>(fields: I) -> Projection
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Projection::Select(fields.into_iter().map(|field| (field.into(), true)).collect())
}

/// Include these relations alongside every field.
pub fn include_relations<I, S>(relations: I) -> Projection
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Projection::Include(
        relations
            .into_iter()
            .map(|relation| (relation.into(), true))
            .collect(),
    )
}
