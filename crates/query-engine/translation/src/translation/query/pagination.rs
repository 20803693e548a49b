//! Translate `page` and `limit` into an offset and a page size.

use crate::translation::helpers::Env;
use crate::translation::parameters::{QueryParameters, LIMIT, PAGE};

/// The page a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based.
    pub page: u64,
    pub limit: u64,
    pub skip: u64,
}

pub fn translate_pagination(env: &Env, parameters: &QueryParameters) -> Pagination {
    let page = parameters
        .last_text(PAGE)
        .and_then(parse_positive)
        .unwrap_or(1);

    let requested = parameters
        .last_text(LIMIT)
        .and_then(parse_positive)
        .unwrap_or_else(|| u64::from(env.config.default_limit));
    let limit = match env.config.max_limit.map(u64::from) {
        Some(max_limit) if requested > max_limit => {
            tracing::debug!(requested, max_limit, "clamping page size");
            max_limit
        }
        _ => requested,
    };

    Pagination {
        page,
        limit,
        skip: (page - 1).saturating_mul(limit),
    }
}

/// Zero, negative and non-integer values are not positive.
fn parse_positive(text: &str) -> Option<u64> {
    text.parse::<u64>().ok().filter(|value| *value > 0)
}
