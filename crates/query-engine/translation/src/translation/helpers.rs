//! Helpers for processing the query parameters and building the descriptor.

use query_engine_metadata::metadata::{OverlongPathPolicy, PathSegments, QueryConfig};

use super::error::{Error, PathUsage};

/// Static information for the compilation of a single request.
pub struct Env<'a> {
    pub config: &'a QueryConfig,
}

impl<'a> Env<'a> {
    /// Create a new Env by supplying the entity's query configuration.
    pub fn new(config: &'a QueryConfig) -> Env<'a> {
        Env { config }
    }

    /// Split a field path into its segments, applying the configured policy
    /// when it cannot be nested. `Ok(None)` means the path should be ignored.
    pub fn resolve_path<'p>(
        &self,
        path: &'p str,
        usage: PathUsage,
    ) -> Result<Option<PathSegments<'p>>, Error> {
        match PathSegments::parse(path) {
            Ok(segments) => Ok(Some(segments)),
            Err(unresolvable) => match self.config.overlong_paths {
                OverlongPathPolicy::Ignore => {
                    tracing::debug!(
                        %usage,
                        path,
                        segments = unresolvable.segments,
                        "ignoring unresolvable field path"
                    );
                    Ok(None)
                }
                OverlongPathPolicy::Reject => Err(Error::UnresolvableFieldPath {
                    usage,
                    path: path.to_string(),
                    segments: unresolvable.segments,
                }),
            },
        }
    }
}
