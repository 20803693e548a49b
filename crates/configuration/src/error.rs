//! Errors that can occur while reading, writing or interpreting the configuration.

use std::path::PathBuf;

use query_engine_metadata::metadata::MAX_PATH_SEGMENTS;
use smol_str::SmolStr;
use thiserror::Error;

/// The errors that can be thrown when processing configuration.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", .file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("did not find a version tag in {}", .0.display())]
    DidNotFindExpectedVersionTag(PathBuf),
    #[error("unsupported configuration version {version} in {}", .file_path.display())]
    UnsupportedVersion { file_path: PathBuf, version: u32 },
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing configuration to disk.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when turning the parsed configuration into the one used at
/// runtime.
#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid configuration:\n{}", MultiError(.0))]
    InvalidEntities(Vec<InvalidEntityConfiguration>),
}

/// A problem with the configuration of a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEntityConfiguration {
    #[error(
        "entity '{entity}': {list} contains '{path}', which needs 1 to {max} non-empty segments",
        max = MAX_PATH_SEGMENTS
    )]
    UnresolvableFieldPath {
        entity: SmolStr,
        list: &'static str,
        path: SmolStr,
    },
    #[error("entity '{entity}': defaultLimit must be at least 1")]
    ZeroDefaultLimit { entity: SmolStr },
    #[error("entity '{entity}': maxLimit must be at least 1")]
    ZeroMaxLimit { entity: SmolStr },
    #[error("entity '{entity}': defaultLimit {default_limit} exceeds maxLimit {max_limit}")]
    DefaultLimitAboveMaxLimit {
        entity: SmolStr,
        default_limit: u32,
        max_limit: u32,
    },
}

/// Display a list of errors one per line.
struct MultiError<'a>(&'a [InvalidEntityConfiguration]);

impl std::fmt::Display for MultiError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {error}")?;
        }
        Ok(())
    }
}
