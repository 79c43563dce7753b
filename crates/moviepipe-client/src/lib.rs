//! CLI, gateway HTTP client, transport selection.
//!
//! The client never talks to the worker socket directly: both transports
//! go through the gateway's HTTP surface. What the client owns is the
//! choice between them and the worker-availability state machine gating
//! the local one.

pub mod cli;
pub mod commands;
pub mod error;
pub mod gateway;
pub mod selector;

pub use error::{ClientError, ClientResult};
pub use gateway::{Gateway, HttpGateway};
pub use selector::{SearchParams, Transport, TransportSelector, WorkerStatus};
