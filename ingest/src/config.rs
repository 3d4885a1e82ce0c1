use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tldrkit_cache::DEFAULT_EXPIRY;

/// Where the command-page archive is downloaded from by default.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/tldr-pages/tldr/releases/latest/download/tldr-pages.en.zip";

/// Rough device capability class. Constrained devices defer the network
/// fetch a little longer so first paint is not competing with the download;
/// this is a tuning knob, not a correctness requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Delay applied before the Fetching stage.
    pub fn start_delay(self) -> Duration {
        match self {
            DeviceClass::Desktop => Duration::from_millis(100),
            DeviceClass::Mobile => Duration::from_millis(1000),
        }
    }
}

/// Configuration for one ingestion cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Archive download URL.
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Root directory the snapshot store is created under.
    pub cache_dir: PathBuf,

    /// Snapshot freshness window.
    #[serde(default = "default_cache_expiry")]
    pub cache_expiry: Duration,

    /// Device class driving the pre-fetch delay.
    #[serde(default)]
    pub device_class: DeviceClass,

    /// Timeout applied to the archive request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_archive_url() -> String {
    DEFAULT_ARCHIVE_URL.to_string()
}

fn default_cache_expiry() -> Duration {
    DEFAULT_EXPIRY
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            archive_url: default_archive_url(),
            cache_dir: PathBuf::from(".tldrkit"),
            cache_expiry: default_cache_expiry(),
            device_class: DeviceClass::default(),
            request_timeout: default_request_timeout(),
        }
    }
}
