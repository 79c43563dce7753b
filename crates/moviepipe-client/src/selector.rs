//! Transport selection and worker availability tracking.
//!
//! The user picks the transport; the selector never switches it behind
//! their back. Its job is the worker-availability state machine gating
//! the local transport: a search over an unprobed channel triggers one
//! probe, and an unavailable worker fails the search fast instead of
//! falling back to the remote flow.

use tracing::debug;

use moviepipe_core::Movie;

use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;

/// What the client currently knows about the worker channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerStatus {
    /// No probe has run since the last reset.
    #[default]
    Unknown,
    /// The last probe succeeded.
    Available,
    /// The last probe failed.
    Unavailable,
}

/// Which path a search takes through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Two-step remote flow: fetch unstructured text, then structure it.
    Remote,
    /// Structured search served by the local worker.
    Local,
}

/// Search parameters shared by both transports.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub amount: u64,
    pub genre: String,
    /// Release-year range hint; accepted on the wire, the worker ignores it.
    pub range: u32,
}

impl SearchParams {
    pub fn new(amount: u64, genre: impl Into<String>, range: u32) -> Self {
        Self {
            amount,
            genre: genre.into(),
            range,
        }
    }
}

/// Routes searches over the chosen transport and tracks worker status.
pub struct TransportSelector<G> {
    gateway: G,
    status: WorkerStatus,
}

impl<G: Gateway> TransportSelector<G> {
    /// Creates a selector with the worker status unknown.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            status: WorkerStatus::Unknown,
        }
    }

    /// Returns the current worker status.
    pub fn status(&self) -> WorkerStatus {
        self.status
    }

    /// Forgets the last probe result. Only an explicit caller action
    /// moves the status back to unknown.
    pub fn reset(&mut self) {
        self.status = WorkerStatus::Unknown;
    }

    /// Probes the worker channel and records the outcome.
    pub async fn probe(&mut self) -> WorkerStatus {
        self.status = if self.gateway.probe_health().await {
            WorkerStatus::Available
        } else {
            WorkerStatus::Unavailable
        };
        debug!(status = ?self.status, "Worker probe completed");
        self.status
    }

    /// Runs one search over the chosen transport.
    pub async fn search(
        &mut self,
        transport: Transport,
        params: &SearchParams,
    ) -> ClientResult<Vec<Movie>> {
        match transport {
            Transport::Remote => self.search_remote(params).await,
            Transport::Local => self.search_local(params).await,
        }
    }

    /// Two-step remote flow. A failure in either step aborts the whole
    /// search with an error naming the step; there is no retry of the
    /// first step and no fallback to the local transport.
    async fn search_remote(&self, params: &SearchParams) -> ClientResult<Vec<Movie>> {
        let text = self
            .gateway
            .search_unstructured(params)
            .await
            .map_err(|e| ClientError::step("fetching movie data", e))?;

        self.gateway
            .structure(&text)
            .await
            .map_err(|e| ClientError::step("structuring data", e))
    }

    /// Local flow. Probes first when the status is unknown or the last
    /// probe failed; anything short of a confirmed available worker
    /// fails fast without touching the search endpoint. A search that
    /// fails afterwards does not change the recorded status.
    async fn search_local(&mut self, params: &SearchParams) -> ClientResult<Vec<Movie>> {
        if self.status != WorkerStatus::Available {
            self.probe().await;
        }
        if self.status != WorkerStatus::Available {
            return Err(ClientError::WorkerUnavailable);
        }

        self.gateway.search_pipe(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use moviepipe_catalog::StaticCatalog;

    struct MockGateway {
        healthy: bool,
        pipe_fails: bool,
        catalog_size: usize,
        remote_fails_at: Option<&'static str>,
        probe_calls: AtomicUsize,
        pipe_calls: AtomicUsize,
    }

    impl Default for MockGateway {
        fn default() -> Self {
            Self {
                healthy: false,
                pipe_fails: false,
                catalog_size: 8,
                remote_fails_at: None,
                probe_calls: AtomicUsize::new(0),
                pipe_calls: AtomicUsize::new(0),
            }
        }
    }

    impl MockGateway {
        fn healthy() -> Self {
            Self {
                healthy: true,
                ..Self::default()
            }
        }
    }

    impl Gateway for MockGateway {
        async fn probe_health(&self) -> bool {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            self.healthy
        }

        async fn search_pipe(&self, params: &SearchParams) -> ClientResult<Vec<Movie>> {
            self.pipe_calls.fetch_add(1, Ordering::SeqCst);
            if self.pipe_fails {
                return Err(ClientError::Gateway("pipe exploded".to_string()));
            }
            let mut movies = StaticCatalog::builtin().into_movies();
            movies.truncate(self.catalog_size);
            movies.truncate(params.amount as usize);
            Ok(movies)
        }

        async fn search_unstructured(&self, _params: &SearchParams) -> ClientResult<String> {
            if self.remote_fails_at == Some("fetch") {
                return Err(ClientError::Gateway("upstream down".to_string()));
            }
            Ok("some movie text".to_string())
        }

        async fn structure(&self, text: &str) -> ClientResult<Vec<Movie>> {
            assert_eq!(text, "some movie text");
            if self.remote_fails_at == Some("structure") {
                return Err(ClientError::Gateway("bad json".to_string()));
            }
            Ok(StaticCatalog::builtin().into_movies())
        }
    }

    #[tokio::test]
    async fn local_search_fails_fast_when_probe_fails() {
        let mut selector = TransportSelector::new(MockGateway::default());

        let err = selector
            .search(Transport::Local, &SearchParams::new(5, "", 6))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::WorkerUnavailable));
        assert_eq!(selector.status(), WorkerStatus::Unavailable);
        // The search endpoint was never touched.
        assert_eq!(selector.gateway.pipe_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn local_search_probes_once_then_reuses_the_result() {
        let mut selector = TransportSelector::new(MockGateway::healthy());

        for _ in 0..3 {
            let movies = selector
                .search(Transport::Local, &SearchParams::new(2, "", 6))
                .await
                .unwrap();
            assert_eq!(movies.len(), 2);
        }

        assert_eq!(selector.status(), WorkerStatus::Available);
        assert_eq!(selector.gateway.probe_calls.load(Ordering::SeqCst), 1);
        assert_eq!(selector.gateway.pipe_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn probed_available_search_is_capped_by_the_catalog() {
        let gateway = MockGateway {
            catalog_size: 4,
            ..MockGateway::healthy()
        };
        let mut selector = TransportSelector::new(gateway);

        assert_eq!(selector.probe().await, WorkerStatus::Available);

        let movies = selector
            .search(Transport::Local, &SearchParams::new(5, "", 6))
            .await
            .unwrap();
        assert_eq!(movies.len(), 4);
    }

    #[tokio::test]
    async fn unavailable_worker_is_reprobed_on_the_next_search() {
        let mut selector = TransportSelector::new(MockGateway::default());

        for _ in 0..2 {
            let result = selector
                .search(Transport::Local, &SearchParams::new(5, "", 6))
                .await;
            assert!(result.is_err());
        }

        assert_eq!(selector.gateway.probe_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_search_does_not_change_status() {
        let gateway = MockGateway {
            healthy: true,
            pipe_fails: true,
            ..MockGateway::default()
        };
        let mut selector = TransportSelector::new(gateway);

        let err = selector
            .search(Transport::Local, &SearchParams::new(5, "", 6))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Gateway(_)));
        assert_eq!(selector.status(), WorkerStatus::Available);
    }

    #[tokio::test]
    async fn remote_search_never_touches_the_worker() {
        let mut selector = TransportSelector::new(MockGateway::healthy());

        let movies = selector
            .search(Transport::Remote, &SearchParams::new(6, "Action", 6))
            .await
            .unwrap();

        assert!(!movies.is_empty());
        assert_eq!(selector.status(), WorkerStatus::Unknown);
        assert_eq!(selector.gateway.probe_calls.load(Ordering::SeqCst), 0);
        assert_eq!(selector.gateway.pipe_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_failure_names_the_fetch_step() {
        let gateway = MockGateway {
            remote_fails_at: Some("fetch"),
            ..MockGateway::default()
        };
        let mut selector = TransportSelector::new(gateway);

        let err = selector
            .search(Transport::Remote, &SearchParams::new(6, "", 6))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "remote search failed while fetching movie data: upstream down"
        );
    }

    #[tokio::test]
    async fn remote_failure_names_the_structure_step() {
        let gateway = MockGateway {
            remote_fails_at: Some("structure"),
            ..MockGateway::default()
        };
        let mut selector = TransportSelector::new(gateway);

        let err = selector
            .search(Transport::Remote, &SearchParams::new(6, "", 6))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "remote search failed while structuring data: bad json"
        );
    }

    #[tokio::test]
    async fn reset_forgets_the_probe_result() {
        let mut selector = TransportSelector::new(MockGateway::healthy());

        selector.probe().await;
        assert_eq!(selector.status(), WorkerStatus::Available);

        selector.reset();
        assert_eq!(selector.status(), WorkerStatus::Unknown);
    }
}
