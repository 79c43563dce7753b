//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Path to the Unix socket endpoint.
    pub socket_path: PathBuf,

    /// Per-connection timeout applied to each read and each response write.
    pub read_timeout: Duration,

    /// Maximum concurrent connections.
    pub max_connections: usize,

    /// Delay between bind attempts when the endpoint is unavailable.
    pub bind_retry_delay: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            read_timeout: Duration::from_secs(30),
            max_connections: 100,
            bind_retry_delay: Duration::from_secs(2),
        }
    }
}

impl WorkerConfig {
    /// Creates a worker configuration with the given socket path.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            ..Default::default()
        }
    }

    /// Builder: set the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Builder: set max connections.
    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Builder: set the bind retry delay.
    pub fn with_bind_retry_delay(mut self, delay: Duration) -> Self {
        self.bind_retry_delay = delay;
        self
    }
}

/// Returns the default socket path.
///
/// Uses `$XDG_RUNTIME_DIR/moviepipe-worker.sock` if available,
/// otherwise falls back to `/tmp/moviepipe-worker-$UID.sock`.
pub fn default_socket_path() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        PathBuf::from(runtime_dir).join("moviepipe-worker.sock")
    } else {
        #[cfg(unix)]
        let uid = unsafe { libc::getuid() };
        #[cfg(not(unix))]
        let uid = 0;
        PathBuf::from(format!("/tmp/moviepipe-worker-{}.sock", uid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WorkerConfig::default();
        assert!(config.socket_path.to_string_lossy().contains("moviepipe"));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert_eq!(config.max_connections, 100);
        assert_eq!(config.bind_retry_delay, Duration::from_secs(2));
    }

    #[test]
    fn custom_config() {
        let config = WorkerConfig::new("/custom/path.sock")
            .with_read_timeout(Duration::from_secs(60))
            .with_max_connections(50)
            .with_bind_retry_delay(Duration::from_millis(100));

        assert_eq!(config.socket_path, PathBuf::from("/custom/path.sock"));
        assert_eq!(config.read_timeout, Duration::from_secs(60));
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.bind_retry_delay, Duration::from_millis(100));
    }

    #[test]
    fn default_socket_path_format() {
        let path = default_socket_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("moviepipe-worker"));
        assert!(path_str.ends_with(".sock"));
    }
}
