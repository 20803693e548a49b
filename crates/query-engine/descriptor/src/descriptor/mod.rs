//! The query descriptor handed to the data-access layer.

pub mod ast;
pub mod helpers;
pub mod plan;
