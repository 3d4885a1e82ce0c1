use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::fallback::fallback_store;
use crate::nav::PendingNav;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::SystemTime;
use tldrkit_archive::{ProgressCallback, decode_archive};
use tldrkit_cache::SnapshotCache;
use tldrkit_index::SearchIndex;
use tldrkit_protocol::CommandStore;
use tokio::time::sleep;

/// Advisory status callback, invoked with a human-readable message at each
/// phase transition. Carries no control information.
pub type StatusCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Ingestion cycle phases. `Ready` and `Degraded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestPhase {
    Idle,
    CheckingCache,
    Fetching,
    Decoding,
    Indexing,
    Caching,
    FallbackLoad,
    Ready,
    Degraded,
}

impl IngestPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, IngestPhase::Ready | IngestPhase::Degraded)
    }
}

/// Where the served command set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Network,
    Fallback,
}

/// Result of one completed ingestion cycle.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// The fully built index; published only once complete, so readers
    /// never observe a partially rebuilt structure.
    pub index: SearchIndex,
    pub source: DataSource,
    /// `Ready` or `Degraded`.
    pub phase: IngestPhase,
    /// When the served data was fetched (snapshot timestamp on a cache
    /// hit), for "last updated" display.
    pub timestamp: SystemTime,
}

impl IngestOutcome {
    pub fn is_degraded(&self) -> bool {
        self.phase == IngestPhase::Degraded
    }
}

/// Drives one ingestion cycle to a terminal state.
///
/// A cycle always terminates: unrecoverable faults (network, empty
/// archive) load the built-in fallback set instead of propagating. There
/// is no cancellation; navigation during a cycle parks in [`PendingNav`]
/// and is replayed by the caller afterwards.
pub struct Ingestor {
    config: IngestConfig,
    cache: SnapshotCache,
    http: reqwest::Client,
    status: Option<StatusCallback>,
    progress: Option<ProgressCallback>,
    pending: PendingNav,
    phase: IngestPhase,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Result<Self> {
        let cache = SnapshotCache::new(&config.cache_dir).with_expiry(config.cache_expiry);
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            config,
            cache,
            http,
            status: None,
            progress: None,
            pending: PendingNav::new(),
            phase: IngestPhase::Idle,
        })
    }

    pub fn with_status_callback(mut self, callback: StatusCallback) -> Self {
        self.status = Some(callback);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Handle for parking navigation requests while the cycle runs; clone
    /// it out before calling [`Ingestor::run`].
    pub fn pending_nav(&self) -> PendingNav {
        self.pending.clone()
    }

    /// Run the cycle to a terminal state.
    pub async fn run(mut self) -> IngestOutcome {
        self.transition(IngestPhase::CheckingCache, "checking for cached commands");

        if let Some(snapshot) = self.cache.load().await {
            if self.cache.is_fresh(snapshot.timestamp) {
                let timestamp = snapshot.timestamp;
                match snapshot.into_store() {
                    Ok(store) => {
                        let index = SearchIndex::build(store);
                        self.transition(IngestPhase::Ready, "commands loaded from cache");
                        return IngestOutcome {
                            index,
                            source: DataSource::Cache,
                            phase: IngestPhase::Ready,
                            timestamp,
                        };
                    }
                    Err(error) => warn!("cached snapshot is unusable: {error}"),
                }
            } else {
                debug!("cached snapshot has expired");
            }
        }

        match self.fetch_and_decode().await {
            Ok(store) => {
                let timestamp = SystemTime::now();
                self.transition(IngestPhase::Indexing, "building search index");
                let index = SearchIndex::build(store);

                self.transition(IngestPhase::Caching, "persisting command snapshot");
                self.cache.save(index.store(), timestamp).await;

                let message = format!("loaded {} commands", index.len());
                self.transition(IngestPhase::Ready, &message);
                IngestOutcome {
                    index,
                    source: DataSource::Network,
                    phase: IngestPhase::Ready,
                    timestamp,
                }
            }
            Err(error) => {
                warn!("ingestion failed, degrading to fallback data: {error}");
                self.transition(IngestPhase::FallbackLoad, "loading built-in fallback commands");
                let index = SearchIndex::build(fallback_store());
                self.transition(IngestPhase::Degraded, "using limited fallback data");
                IngestOutcome {
                    index,
                    source: DataSource::Fallback,
                    phase: IngestPhase::Degraded,
                    timestamp: SystemTime::now(),
                }
            }
        }
    }

    async fn fetch_and_decode(&mut self) -> Result<CommandStore> {
        // Let the host finish first paint before competing for bandwidth.
        sleep(self.config.device_class.start_delay()).await;

        self.transition(IngestPhase::Fetching, "downloading command database");
        let response = self.http.get(&self.config.archive_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status(status));
        }
        let bytes = response.bytes().await?;
        info!("downloaded archive: {} bytes", bytes.len());

        self.transition(IngestPhase::Decoding, "processing command data");
        let store = decode_archive(&bytes, self.progress.as_ref()).await?;
        Ok(store)
    }

    fn transition(&mut self, phase: IngestPhase, message: &str) {
        debug!("ingest phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
        if let Some(callback) = &self.status {
            callback(message);
        }
    }
}
