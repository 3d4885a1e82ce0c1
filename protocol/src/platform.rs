use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A documentation platform a command page can be published under.
///
/// The string form of each variant is the platform code used in archive
/// entry paths and composite lookup keys.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Common,
    Linux,
    Windows,
    Osx,
    Android,
    Freebsd,
    Netbsd,
    Openbsd,
    Sunos,
}

impl Platform {
    /// Platform tried after every selected platform misses during lookup.
    /// Many commands are documented once under this platform-agnostic label.
    pub const FALLBACK: Platform = Platform::Common;

    /// Human-readable platform name for display surfaces.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Common => "Common",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Osx => "macOS",
            Platform::Android => "Android",
            Platform::Freebsd => "FreeBSD",
            Platform::Netbsd => "NetBSD",
            Platform::Openbsd => "OpenBSD",
            Platform::Sunos => "SunOS",
        }
    }

    /// Whether the platform is part of the default selection.
    pub fn default_selected(self) -> bool {
        matches!(
            self,
            Platform::Common | Platform::Linux | Platform::Windows | Platform::Osx
        )
    }
}

/// The set of platforms a user has selected, in priority order.
///
/// Iteration order is the order lookups try platforms in. The selection is
/// never empty: removing the last platform reinserts [`Platform::FALLBACK`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSelection {
    platforms: Vec<Platform>,
}

impl Default for PlatformSelection {
    fn default() -> Self {
        use strum::IntoEnumIterator;
        Self {
            platforms: Platform::iter().filter(|p| p.default_selected()).collect(),
        }
    }
}

impl PlatformSelection {
    /// Build a selection from the given platforms, preserving first-seen
    /// order and dropping duplicates. An empty input yields the fallback
    /// platform alone.
    pub fn new(platforms: impl IntoIterator<Item = Platform>) -> Self {
        let mut selection = Self {
            platforms: Vec::new(),
        };
        for platform in platforms {
            selection.select(platform);
        }
        if selection.platforms.is_empty() {
            selection.platforms.push(Platform::FALLBACK);
        }
        selection
    }

    /// Add a platform to the selection if not already present.
    pub fn select(&mut self, platform: Platform) {
        if !self.platforms.contains(&platform) {
            self.platforms.push(platform);
        }
    }

    /// Remove a platform. If the selection would become empty, the fallback
    /// platform is reinserted instead.
    pub fn deselect(&mut self, platform: Platform) {
        self.platforms.retain(|p| *p != platform);
        if self.platforms.is_empty() {
            self.platforms.push(Platform::FALLBACK);
        }
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platforms.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}
