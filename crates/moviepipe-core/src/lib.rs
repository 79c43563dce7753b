//! Core types: movie records, tracing setup

pub mod movie;
pub mod tracing;

pub use movie::Movie;
pub use tracing::{TracingError, TracingMode, init_tracing};
