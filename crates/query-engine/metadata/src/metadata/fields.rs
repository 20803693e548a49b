//! Field paths and their resolution into relation segments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Separates the relation segments of a field path.
pub const PATH_SEPARATOR: char = '.';

/// The deepest relation path we can nest: `relation.nestedRelation.field`.
pub const MAX_PATH_SEGMENTS: usize = 3;

/// A field name, optionally dot-delimited into relation segments
/// (`field`, `relation.field`, `relation.nestedRelation.field`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldPath(pub SmolStr);

impl FieldPath {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        FieldPath(path.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Does this path traverse at least one relation?
    pub fn is_nested(&self) -> bool {
        self.0.contains(PATH_SEPARATOR)
    }

    /// Split the path into its relation segments.
    pub fn resolve(&self) -> Result<PathSegments<'_>, UnresolvablePath> {
        PathSegments::parse(self.as_str())
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::new(path)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let FieldPath(path) = self;
        write!(f, "{path}")
    }
}

/// A field path split into the relations it traverses and the field it ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegments<'a> {
    /// `field`
    Field(&'a str),
    /// `relation.field`
    Relation { relation: &'a str, field: &'a str },
    /// `relation.nestedRelation.field`
    NestedRelation {
        relation: &'a str,
        nested_relation: &'a str,
        field: &'a str,
    },
}

/// A path we cannot nest: too many segments, or an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvablePath {
    pub segments: usize,
}

impl<'a> PathSegments<'a> {
    /// Split a dot-delimited path into 1 to 3 non-empty segments.
    pub fn parse(path: &'a str) -> Result<Self, UnresolvablePath> {
        let parts: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let unresolvable = UnresolvablePath {
            segments: parts.len(),
        };

        if parts.iter().any(|part| part.is_empty()) {
            return Err(unresolvable);
        }

        match parts[..] {
            [field] => Ok(PathSegments::Field(field)),
            [relation, field] => Ok(PathSegments::Relation { relation, field }),
            [relation, nested_relation, field] => Ok(PathSegments::NestedRelation {
                relation,
                nested_relation,
                field,
            }),
            _ => Err(unresolvable),
        }
    }

    /// The field the path ends with.
    pub fn field(&self) -> &'a str {
        match *self {
            PathSegments::Field(field)
            | PathSegments::Relation { field, .. }
            | PathSegments::NestedRelation { field, .. } => field,
        }
    }

    /// The relations traversed before reaching the field, outermost first.
    pub fn relations(&self) -> Vec<&'a str> {
        match *self {
            PathSegments::Field(_) => vec![],
            PathSegments::Relation { relation, .. } => vec![relation],
            PathSegments::NestedRelation {
                relation,
                nested_relation,
                ..
            } => vec![relation, nested_relation],
        }
    }

    /// Every segment of the path, outermost first.
    pub fn segments(&self) -> Vec<&'a str> {
        let mut segments = self.relations();
        segments.push(self.field());
        segments
    }
}
