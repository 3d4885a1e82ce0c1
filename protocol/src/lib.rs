//! Shared data model for tldrkit.
//!
//! Defines the platform enumeration and selection, the command record and
//! store types produced by archive decoding, the persisted snapshot shape,
//! the fixed category table, and the option-placeholder post-processor used
//! before page text is handed to a renderer.

mod category;
mod options;
mod platform;
mod record;
mod snapshot;

pub use category::{CATEGORIES, Category};
pub use options::{OptionsMode, expand_placeholders};
pub use platform::{Platform, PlatformSelection};
pub use record::{CommandRecord, CommandStore, PageExample, composite_key};
pub use snapshot::{CachedSnapshot, SnapshotError};
