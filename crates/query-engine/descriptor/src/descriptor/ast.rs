//! Type definitions of a compiled query descriptor.
//!
//! The types serialize into the shape a "find many" / "count" style data-access layer expects:
//! `{ "where": ..., "select" | "include": ..., "orderBy": ..., "skip": ..., "take": ... }`.

use std::sync::Arc;

use enum_iterator::Sequence;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The key under which the search conditions are combined.
pub const OR_KEY: &str = "OR";

/// A coerced scalar value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// The complete set of comparison operators a range clause may use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RangeOperator {
    Lt,
    Lte,
    Gt,
    Gte,
    Equals,
    Not,
    Contains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
}

impl RangeOperator {
    /// The name of the operator as it appears in a request.
    pub fn name(self) -> &'static str {
        match self {
            RangeOperator::Lt => "lt",
            RangeOperator::Lte => "lte",
            RangeOperator::Gt => "gt",
            RangeOperator::Gte => "gte",
            RangeOperator::Equals => "equals",
            RangeOperator::Not => "not",
            RangeOperator::Contains => "contains",
            RangeOperator::StartsWith => "startsWith",
            RangeOperator::EndsWith => "endsWith",
            RangeOperator::In => "in",
            RangeOperator::NotIn => "notIn",
        }
    }

    /// Find the operator with this name.
    pub fn from_name(name: &str) -> Option<RangeOperator> {
        enum_iterator::all::<RangeOperator>().find(|operator| operator.name() == name)
    }

    /// Membership operators always take a list.
    pub fn takes_list(self) -> bool {
        match self {
            RangeOperator::In | RangeOperator::NotIn => true,
            RangeOperator::Lt
            | RangeOperator::Lte
            | RangeOperator::Gt
            | RangeOperator::Gte
            | RangeOperator::Equals
            | RangeOperator::Not
            | RangeOperator::Contains
            | RangeOperator::StartsWith
            | RangeOperator::EndsWith => false,
        }
    }
}

impl std::fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The argument of a single range operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RangeOperand {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

/// A set of comparisons applied to one field, e.g. `{ "gte": 10, "lte": 20 }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeClause(pub IndexMap<RangeOperator, RangeOperand>);

/// How string comparisons treat letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Insensitive,
}

/// A substring match produced by the free-text search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSearch {
    pub contains: String,
    pub mode: QueryMode,
}

/// The value a single field is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Plain equality.
    Scalar(Scalar),
    /// The field is one of these values.
    Membership(Vec<Scalar>),
    /// A set of comparison operators.
    Range(RangeClause),
    /// A case-insensitive substring match.
    Search(TextSearch),
    /// An operator object we did not recognize, passed on as it came in.
    Opaque(serde_json::Map<String, serde_json::Value>),
}

impl Serialize for FilterValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FilterValue::Scalar(scalar) => scalar.serialize(serializer),
            FilterValue::Membership(values) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(RangeOperator::In.name(), values)?;
                map.end()
            }
            FilterValue::Range(clause) => clause.serialize(serializer),
            FilterValue::Search(search) => search.serialize(serializer),
            FilterValue::Opaque(object) => object.serialize(serializer),
        }
    }
}

/// A node of the condition tree: either a leaf comparison or a relation wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Value(FilterValue),
    Relation(ConditionTree),
}

/// Conditions combined with an implicit AND between keys, plus an optional OR list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionTree {
    pub or: Vec<ConditionTree>,
    pub fields: IndexMap<String, ConditionNode>,
}

impl ConditionTree {
    pub fn is_empty(&self) -> bool {
        self.or.is_empty() && self.fields.is_empty()
    }
}

impl Serialize for ConditionTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let or_len = usize::from(!self.or.is_empty());
        let mut map = serializer.serialize_map(Some(or_len + self.fields.len()))?;
        if !self.or.is_empty() {
            map.serialize_entry(OR_KEY, &self.or)?;
        }
        for (key, node) in &self.fields {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// A direction for an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// An ordering, possibly through relations: `{ "patient": { "user": { "email": "asc" } } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub target: String,
    pub node: OrderByNode,
}

/// Either the direction of the target field, or an ordering on the target relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OrderByNode {
    Direction(OrderDirection),
    Nested(Box<OrderBy>),
}

impl Serialize for OrderBy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.target, &self.node)?;
        map.end()
    }
}

/// Which fields or relations the result rows carry. Selection and inclusion are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Select(IndexMap<String, bool>),
    Include(IndexMap<String, bool>),
}

/// The full "find many" query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    #[serde(rename = "where")]
    pub conditions: Arc<ConditionTree>,
    #[serde(flatten)]
    pub projection: Projection,
    #[serde(rename = "orderBy")]
    pub ordering: OrderBy,
    pub skip: u64,
    pub take: u64,
}

/// The "count" query paired with a `CompiledQuery`; it shares the same conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledCountQuery {
    #[serde(rename = "where")]
    pub conditions: Arc<ConditionTree>,
}
