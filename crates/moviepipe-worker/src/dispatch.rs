//! Request dispatch.
//!
//! The dispatcher turns one decoded request line into one response
//! payload. It never fails outward: malformed JSON, unknown actions, and
//! catalog failures all become `{"error": ...}` payloads sent back over
//! the same connection.

use std::sync::Arc;

use tracing::{debug, warn};

use moviepipe_catalog::CatalogProvider;
use moviepipe_protocol::{WorkerRequest, WorkerResponse};

use crate::error::WorkerResult;
use crate::socket::Connection;

/// Routes decoded request lines to the catalog and produces responses.
pub struct Dispatcher {
    catalog: Arc<dyn CatalogProvider>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given catalog capability.
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }

    /// Dispatches one request line and returns the serialized response
    /// payload. Every failure mode produces an error payload instead.
    pub fn dispatch(&self, line: &str) -> Vec<u8> {
        let response = self.respond(line);
        response.to_payload().unwrap_or_else(|e| {
            // Movie records always serialize; this is a should-not-happen path.
            warn!(error = %e, "Failed to serialize response");
            br#"{"error":"failed to serialize response"}"#.to_vec()
        })
    }

    fn respond(&self, line: &str) -> WorkerResponse {
        let request = match WorkerRequest::parse(line) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Rejecting malformed request");
                return WorkerResponse::error(e.to_string());
            }
        };

        match request.action.as_deref() {
            Some("search") => {
                let amount = request.effective_amount();
                let genre = request.effective_genre();
                debug!(amount, genre, "Handling search request");
                match self.catalog.sample(amount, genre) {
                    Ok(movies) => WorkerResponse::movies(movies),
                    Err(e) => {
                        warn!(error = %e, "Catalog provider failed");
                        WorkerResponse::error(e.to_string())
                    }
                }
            }
            Some("health") => {
                debug!("Handling health request");
                WorkerResponse::ok()
            }
            other => {
                debug!(action = ?other, "Rejecting unknown action");
                WorkerResponse::error("Unknown action")
            }
        }
    }

    /// Serves a connection: dispatches every request strictly in arrival
    /// order, writing each framed response before reading the next
    /// request. Returns when the peer disconnects.
    pub async fn serve_connection(&self, mut conn: Connection) -> WorkerResult<()> {
        while let Some(line) = conn.next_request().await? {
            let payload = self.dispatch(&line);
            conn.write_response(&payload).await?;
        }
        debug!("Client disconnected");
        Ok(())
    }
}

/// Creates a connection handler function for use with `ChannelServer::run`.
pub fn make_connection_handler(
    dispatcher: Arc<Dispatcher>,
) -> impl Fn(Connection) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
+ Send
+ Sync
+ 'static {
    move |conn| {
        let dispatcher = dispatcher.clone();
        Box::pin(async move {
            if let Err(e) = dispatcher.serve_connection(conn).await {
                warn!(error = %e, "Connection handler error");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use moviepipe_catalog::{CatalogError, CatalogResult, StaticCatalog};
    use moviepipe_core::Movie;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(StaticCatalog::builtin()))
    }

    fn respond(d: &Dispatcher, line: &str) -> WorkerResponse {
        WorkerResponse::parse(&d.dispatch(line)).unwrap()
    }

    #[test]
    fn health_yields_ok() {
        let payload = dispatcher().dispatch(r#"{"action":"health"}"#);
        assert_eq!(payload, br#"{"status":"ok"}"#);
    }

    #[test]
    fn unknown_action_yields_error() {
        for line in [
            r#"{"action":"bogus"}"#,
            r#"{"action":""}"#,
            r#"{"amount":3}"#,
            r#"{}"#,
        ] {
            let response = respond(&dispatcher(), line);
            assert_eq!(response.as_error(), Some("Unknown action"), "line: {line}");
        }
    }

    #[test]
    fn malformed_json_yields_error_payload() {
        let response = respond(&dispatcher(), "{not json");
        assert!(!response.is_success());
        assert!(!response.as_error().unwrap().is_empty());
    }

    #[test]
    fn search_returns_movies() {
        match respond(&dispatcher(), r#"{"action":"search","amount":3}"#) {
            WorkerResponse::Movies { movies } => assert_eq!(movies.len(), 3),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn search_defaults_amount_to_five() {
        match respond(&dispatcher(), r#"{"action":"search"}"#) {
            WorkerResponse::Movies { movies } => assert_eq!(movies.len(), 5),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn search_caps_at_catalog_size() {
        // Four records in the catalog, five requested: exactly four back.
        let movies: Vec<Movie> = (0..4)
            .map(|i| {
                Movie::new(
                    format!("Movie {i}"),
                    "Director",
                    "01.01.2025",
                    "2 hours",
                    vec!["Actor".to_string()],
                    vec!["Drama".to_string()],
                    "A movie.",
                )
            })
            .collect();
        let d = Dispatcher::new(Arc::new(StaticCatalog::new(movies)));

        match respond(&d, r#"{"action":"search","amount":5}"#) {
            WorkerResponse::Movies { movies } => {
                assert_eq!(movies.len(), 4);
                let titles: HashSet<&str> = movies.iter().map(|m| m.title.as_str()).collect();
                assert_eq!(titles.len(), 4);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn search_filters_by_genre() {
        match respond(
            &dispatcher(),
            r#"{"action":"search","amount":10,"genre":"Comedy"}"#,
        ) {
            WorkerResponse::Movies { movies } => {
                assert_eq!(movies.len(), 2);
                assert!(movies.iter().all(|m| m.has_genre("Comedy")));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn provider_failure_becomes_error_payload() {
        struct FailingCatalog;
        impl moviepipe_catalog::CatalogProvider for FailingCatalog {
            fn sample(&self, _amount: usize, _genre: &str) -> CatalogResult<Vec<Movie>> {
                Err(CatalogError::source("backing store offline"))
            }
        }

        let d = Dispatcher::new(Arc::new(FailingCatalog));
        let response = respond(&d, r#"{"action":"search"}"#);
        assert!(response.as_error().unwrap().contains("backing store offline"));
    }

    mod end_to_end {
        use super::*;
        use std::time::Duration;

        use tempfile::tempdir;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::UnixStream;

        use moviepipe_protocol::{FrameDecoder, WorkerRequest};
        use crate::config::WorkerConfig;
        use crate::socket::ChannelServer;

        async fn read_response(stream: &mut UnixStream) -> WorkerResponse {
            let mut decoder = FrameDecoder::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                assert!(n > 0, "server closed before responding");
                let mut payloads = decoder.feed(&buf[..n]).unwrap();
                if let Some(payload) = payloads.pop() {
                    return WorkerResponse::parse(&payload).unwrap();
                }
            }
        }

        async fn spawn_worker(socket_path: &std::path::Path) -> tokio::task::JoinHandle<()> {
            let server = ChannelServer::bind(WorkerConfig::new(socket_path)).await;
            let dispatcher = Arc::new(Dispatcher::new(Arc::new(StaticCatalog::builtin())));
            tokio::spawn(async move {
                server.run(make_connection_handler(dispatcher)).await;
            })
        }

        #[tokio::test]
        async fn connection_survives_bad_request() {
            let dir = tempdir().unwrap();
            let socket_path = dir.path().join("worker.sock");
            let _server = spawn_worker(&socket_path).await;

            let mut stream = UnixStream::connect(&socket_path).await.unwrap();

            stream.write_all(b"{broken\n").await.unwrap();
            let response = read_response(&mut stream).await;
            assert!(!response.is_success());

            // Same connection keeps working after the error response.
            stream
                .write_all(&WorkerRequest::health().to_line().unwrap())
                .await
                .unwrap();
            assert_eq!(read_response(&mut stream).await, WorkerResponse::ok());
        }

        #[tokio::test]
        async fn blank_lines_are_not_dispatched() {
            let dir = tempdir().unwrap();
            let socket_path = dir.path().join("worker.sock");
            let _server = spawn_worker(&socket_path).await;

            let mut stream = UnixStream::connect(&socket_path).await.unwrap();

            // Only the health request should be answered.
            stream.write_all(b"\n   \n").await.unwrap();
            stream
                .write_all(&WorkerRequest::health().to_line().unwrap())
                .await
                .unwrap();

            assert_eq!(read_response(&mut stream).await, WorkerResponse::ok());

            // If the blank lines had been dispatched, their error frames
            // would arrive before the health response.
        }

        #[tokio::test]
        async fn concurrent_connections_get_their_own_responses() {
            let dir = tempdir().unwrap();
            let socket_path = dir.path().join("worker.sock");
            let _server = spawn_worker(&socket_path).await;

            let mut tasks = Vec::new();
            for amount in 1..=4u64 {
                let path = socket_path.clone();
                tasks.push(tokio::spawn(async move {
                    let mut stream = UnixStream::connect(&path).await.unwrap();
                    let line = WorkerRequest::search(amount, "").to_line().unwrap();
                    stream.write_all(&line).await.unwrap();

                    match read_response(&mut stream).await {
                        WorkerResponse::Movies { movies } => {
                            assert_eq!(movies.len(), amount as usize);
                        }
                        other => panic!("unexpected response: {other:?}"),
                    }
                }));
            }

            for task in tasks {
                tokio::time::timeout(Duration::from_secs(5), task)
                    .await
                    .unwrap()
                    .unwrap();
            }
        }
    }
}
