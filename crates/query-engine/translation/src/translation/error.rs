//! Errors for query translation.

use query_engine_metadata::metadata::MAX_PATH_SEGMENTS;
use thiserror::Error;

/// A type for translation errors.
///
/// Malformed or unauthorized input is dropped rather than reported. Besides unknown entities,
/// the only failures are the ones a configuration explicitly asks for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Entity '{0}' not found.")]
    EntityNotFound(String),
    #[error(
        "Cannot resolve the {usage} path '{path}': it has {segments} segments, \
         at most {max} non-empty segments are supported.",
        max = MAX_PATH_SEGMENTS
    )]
    UnresolvableFieldPath {
        usage: PathUsage,
        path: String,
        segments: usize,
    },
}

/// Where a field path was found in the request or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathUsage {
    Filter,
    Search,
    Sort,
}

impl std::fmt::Display for PathUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PathUsage::Filter => write!(f, "filter"),
            PathUsage::Search => write!(f, "search"),
            PathUsage::Sort => write!(f, "sort"),
        }
    }
}
