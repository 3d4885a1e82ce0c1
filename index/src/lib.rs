//! Search index and resolver for tldrkit.
//!
//! Built once per ingestion cycle from the authoritative [`CommandStore`]
//! and read many times: ranked substring search over a flattened entry
//! view, exact platform-aware resolution with a common-platform fallback,
//! and category availability for browsing surfaces.

mod search_index;

pub use search_index::{SEARCH_LIMIT, SUGGESTION_LIMIT, SearchEntry, SearchIndex};
