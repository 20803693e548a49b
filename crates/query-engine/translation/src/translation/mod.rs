//! Translate the incoming query parameters to a query plan to be run by the data-access layer.

pub mod error;
pub mod helpers;
pub mod parameters;
pub mod query;
