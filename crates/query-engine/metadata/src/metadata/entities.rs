//! Per-entity query configuration: which fields can be searched, filtered and included.

use std::collections::BTreeMap;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::fields::FieldPath;

/// Page size used when a request does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Mapping from an entity name to its query configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesInfo(pub BTreeMap<SmolStr, QueryConfig>);

impl EntitiesInfo {
    pub fn empty() -> Self {
        EntitiesInfo(BTreeMap::new())
    }
}

/// What to do with a field path that cannot be nested
/// (more than three segments, or an empty segment).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum OverlongPathPolicy {
    /// Drop the filter or search field; sort by the default ordering.
    #[default]
    Ignore,
    /// Fail the whole compilation.
    Reject,
}

impl OverlongPathPolicy {
    fn is_default(&self) -> bool {
        *self == OverlongPathPolicy::default()
    }
}

/// The allow-lists and limits of a single entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QueryConfig {
    /// Fields matched by the free-text `searchTerm`.
    #[serde(default)]
    pub searchable_fields: Vec<FieldPath>,
    /// Fields that may be used as filter keys. Empty means any non-reserved key.
    #[serde(default)]
    pub filterable_fields: Vec<FieldPath>,
    /// Relations a request may ask for through the `includes` parameter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includable_relations: Vec<SmolStr>,
    /// Relations included when the request does not select fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_includes: Vec<SmolStr>,
    /// Page size when the request does not ask for one.
    #[serde(default = "default_limit_default")]
    pub default_limit: u32,
    /// Largest page size a request may ask for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "OverlongPathPolicy::is_default")]
    pub overlong_paths: OverlongPathPolicy,
}

// for serde default //
fn default_limit_default() -> u32 {
    DEFAULT_LIMIT
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            searchable_fields: vec![],
            filterable_fields: vec![],
            includable_relations: vec![],
            default_includes: vec![],
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
            overlong_paths: OverlongPathPolicy::default(),
        }
    }
}

impl QueryConfig {
    /// Create a configuration from its two allow-lists.
    pub fn new<S, F>(searchable_fields: S, filterable_fields: F) -> Self
    where
        S: IntoIterator,
        S::Item: Into<FieldPath>,
        F: IntoIterator,
        F::Item: Into<FieldPath>,
    {
        QueryConfig {
            searchable_fields: searchable_fields.into_iter().map(Into::into).collect(),
            filterable_fields: filterable_fields.into_iter().map(Into::into).collect(),
            ..QueryConfig::default()
        }
    }

    #[must_use]
    pub fn with_max_limit(mut self, max_limit: u32) -> Self {
        self.max_limit = Some(max_limit);
        self
    }

    #[must_use]
    pub fn with_overlong_paths(mut self, policy: OverlongPathPolicy) -> Self {
        self.overlong_paths = policy;
        self
    }

    #[must_use]
    pub fn with_default_includes<I>(mut self, relations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        self.default_includes = relations.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_includable_relations<I>(mut self, relations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        self.includable_relations = relations.into_iter().map(Into::into).collect();
        self
    }

    /// Is this key allowed as a filter? An empty allow-list allows every key.
    pub fn allows_filter(&self, key: &str) -> bool {
        self.filterable_fields.is_empty()
            || self
                .filterable_fields
                .iter()
                .any(|field| field.as_str() == key)
    }

    /// Can a request ask for this relation to be included?
    pub fn allows_include(&self, relation: &str) -> bool {
        self.includable_relations
            .iter()
            .any(|includable| includable.as_str() == relation)
    }
}
