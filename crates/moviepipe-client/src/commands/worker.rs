//! The `worker` subcommand.
//!
//! Runs the worker in the foreground: binds the channel endpoint
//! (retrying until it is free), serves requests from the built-in
//! catalog, and exits cleanly on SIGTERM or SIGINT.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use moviepipe_catalog::StaticCatalog;
use moviepipe_worker::{
    ChannelServer, Dispatcher, SignalHandler, WorkerConfig, make_connection_handler,
};

use crate::error::ClientResult;

pub async fn run(socket_path: Option<PathBuf>) -> ClientResult<()> {
    let config = match socket_path {
        Some(path) => WorkerConfig::new(path),
        None => WorkerConfig::default(),
    };

    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener();

    let server = ChannelServer::bind(config).await;
    info!(path = %server.socket_path().display(), "Worker ready");

    let catalog = Arc::new(StaticCatalog::builtin());
    let dispatcher = Arc::new(Dispatcher::new(catalog));

    server
        .run_until_shutdown(
            make_connection_handler(dispatcher),
            signal_handler.shutdown().wait(),
        )
        .await;

    info!("Worker stopped");
    Ok(())
}
