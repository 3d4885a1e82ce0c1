/*!
# tldrkit ingestion

Sequences one full data-ingestion cycle and owns the resulting session
state. A cycle runs

```text
CheckingCache ─ fresh snapshot ──────────────▶ Ready
      │
      └ miss/stale ▶ Fetching ▶ Decoding ▶ Indexing ▶ Caching ▶ Ready
                         │          │
                         └──────────┴─ unrecoverable ▶ FallbackLoad ▶ Degraded
```

strictly in order; no stage starts before its predecessor's asynchronous
result is available. Only network faults and empty-archive extraction are
unrecoverable: both degrade to a small built-in command set so the
application stays usable. Cache faults are absorbed by the cache layer and
never block a cycle.

The [`Ingestor`] reports a human-readable status string at each transition
and forwards decode progress; both are advisory. Navigation requests that
arrive before a terminal state park in a single-slot [`PendingNav`]
(last-writer-wins) and are replayed exactly once afterwards.

[`Session`] is the application context handed to presentation glue once a
cycle terminates: it owns the platform selection and option-display mode
and answers every search, resolution, and navigation query.
*/

mod config;
mod error;
mod fallback;
mod ingestor;
mod nav;
mod session;

pub use config::{DEFAULT_ARCHIVE_URL, DeviceClass, IngestConfig};
pub use error::{IngestError, Result};
pub use fallback::fallback_store;
pub use ingestor::{DataSource, IngestOutcome, IngestPhase, Ingestor, StatusCallback};
pub use nav::{NavRequest, PendingNav};
pub use session::{CommandView, Session, View};

pub use tldrkit_archive::ProgressCallback;
