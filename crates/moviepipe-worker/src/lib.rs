//! Worker daemon: channel server and request dispatch.
//!
//! This crate provides the worker side of the moviepipe IPC channel:
//! - a Unix socket server with an indefinite bind-retry loop
//! - per-connection request decoding and strictly ordered dispatch
//! - signal handling for clean shutdown
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use moviepipe_catalog::StaticCatalog;
//! use moviepipe_worker::{ChannelServer, Dispatcher, WorkerConfig, make_connection_handler};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = ChannelServer::bind(WorkerConfig::default()).await;
//!     let dispatcher = Arc::new(Dispatcher::new(Arc::new(StaticCatalog::builtin())));
//!     server.run(make_connection_handler(dispatcher)).await;
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod signals;
mod socket;

pub use config::{WorkerConfig, default_socket_path};
pub use dispatch::{Dispatcher, make_connection_handler};
pub use error::{WorkerError, WorkerResult};
pub use signals::{ShutdownSignal, SignalHandler};
pub use socket::{ChannelServer, Connection};
