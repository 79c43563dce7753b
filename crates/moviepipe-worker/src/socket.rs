//! Unix socket listener for the worker channel.
//!
//! The server binds a well-known local endpoint and serves each connection
//! with its own decode buffer. Requests are newline-delimited JSON lines;
//! responses go back as length-prefixed frames.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use moviepipe_protocol::{LineDecoder, encode_frame};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

/// Unix socket server for the worker channel.
pub struct ChannelServer {
    /// Worker configuration.
    config: WorkerConfig,
    /// Unix socket listener.
    listener: UnixListener,
    /// Semaphore for limiting concurrent connections.
    connection_semaphore: Arc<Semaphore>,
}

impl ChannelServer {
    /// Binds the configured socket endpoint, retrying indefinitely.
    ///
    /// Bind failures (endpoint busy, permission hiccups) are logged and
    /// retried after `bind_retry_delay`; this loop is the server's only
    /// self-healing mechanism and it does not give up. A stale socket file
    /// left by a dead worker is detected by a probe connect and removed.
    pub async fn bind(config: WorkerConfig) -> Self {
        let listener = loop {
            match Self::try_bind(&config.socket_path).await {
                Ok(listener) => break listener,
                Err(e) => {
                    warn!(
                        path = %config.socket_path.display(),
                        error = %e,
                        delay = ?config.bind_retry_delay,
                        "Failed to bind socket, retrying"
                    );
                    tokio::time::sleep(config.bind_retry_delay).await;
                }
            }
        };

        info!(
            path = %config.socket_path.display(),
            "Worker listening"
        );

        let connection_semaphore = Arc::new(Semaphore::new(config.max_connections));

        Self {
            config,
            listener,
            connection_semaphore,
        }
    }

    async fn try_bind(socket_path: &Path) -> WorkerResult<UnixListener> {
        if socket_path.exists() {
            // Probe the existing socket to tell a live worker from a stale file.
            match UnixStream::connect(socket_path).await {
                Ok(_) => {
                    return Err(WorkerError::Io(std::io::Error::new(
                        std::io::ErrorKind::AddrInUse,
                        format!("endpoint in use: {}", socket_path.display()),
                    )));
                }
                Err(_) => {
                    info!(
                        path = %socket_path.display(),
                        "Removing stale socket"
                    );
                    std::fs::remove_file(socket_path)?;
                }
            }
        }

        Ok(UnixListener::bind(socket_path)?)
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    /// Accepts a single connection with a fresh decode buffer.
    pub async fn accept(&self) -> WorkerResult<Connection> {
        let permit = self.connection_semaphore.clone().acquire_owned().await;
        let permit = permit.expect("semaphore should not be closed");

        let (stream, _addr) = self.listener.accept().await?;
        debug!("Accepted new connection");

        Ok(Connection {
            stream,
            lines: LineDecoder::new(),
            pending: VecDeque::new(),
            timeout: self.config.read_timeout,
            _permit: permit,
        })
    }

    /// Runs the accept loop, calling the handler for each connection.
    ///
    /// A failing accept never stops the loop; a failing connection is the
    /// handler's problem alone.
    pub async fn run<F, Fut>(&self, handler: F)
    where
        F: Fn(Connection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        loop {
            match self.accept().await {
                Ok(connection) => {
                    let fut = handler(connection);
                    tokio::spawn(fut);
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    /// Runs the accept loop until the shutdown future completes.
    ///
    /// No new connections are accepted after shutdown begins; connections
    /// already spawned drain on their own tasks.
    pub async fn run_until_shutdown<F, Fut, S>(&self, handler: F, shutdown: S)
    where
        F: Fn(Connection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
        S: std::future::Future<Output = ()> + Send,
    {
        tokio::select! {
            () = self.run(handler) => {}
            () = shutdown => {
                info!("Shutdown signal received");
            }
        }
    }
}

impl Drop for ChannelServer {
    fn drop(&mut self) {
        // Clean up the socket file
        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!(
                    path = %self.config.socket_path.display(),
                    error = %e,
                    "Failed to remove socket file"
                );
            } else {
                debug!(
                    path = %self.config.socket_path.display(),
                    "Removed socket file"
                );
            }
        }
    }
}

/// One peer connection.
///
/// Owns the stream and the connection's decode buffer; neither is ever
/// shared with another connection, so an error here can only take down
/// this peer.
pub struct Connection {
    stream: UnixStream,
    lines: LineDecoder,
    pending: VecDeque<String>,
    timeout: std::time::Duration,
    _permit: tokio::sync::OwnedSemaphorePermit,
}

impl Connection {
    /// Returns the next complete request line, in arrival order.
    ///
    /// Returns `Ok(None)` when the peer closed the connection cleanly;
    /// any bytes of a partial request are discarded with it.
    pub async fn next_request(&mut self) -> WorkerResult<Option<String>> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(Some(line));
        }

        let mut buf = [0u8; 4096];
        loop {
            let n = match tokio::time::timeout(self.timeout, self.stream.read(&mut buf)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(WorkerError::timeout("read request")),
            };

            if n == 0 {
                return Ok(None);
            }

            let mut lines = self.lines.feed(&buf[..n])?.into_iter();
            if let Some(first) = lines.next() {
                self.pending.extend(lines);
                return Ok(Some(first));
            }
        }
    }

    /// Frames and writes one response payload.
    pub async fn write_response(&mut self, payload: &[u8]) -> WorkerResult<()> {
        let frame = encode_frame(payload);

        match tokio::time::timeout(self.timeout, self.stream.write_all(&frame)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(WorkerError::timeout("write response")),
        }
    }
}
