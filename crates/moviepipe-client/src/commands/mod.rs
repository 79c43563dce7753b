//! CLI command implementations.

pub mod probe;
pub mod search;
pub mod worker;
