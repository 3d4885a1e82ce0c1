use crate::error::{ArchiveError, Result};
use crate::parser::parse_page;
use crate::paths::classify_entry;
use log::{debug, info, warn};
use std::io::{Cursor, Read};
use std::sync::Arc;
use tldrkit_protocol::{CommandRecord, CommandStore, Platform};
use zip::ZipArchive;

/// Progress callback invoked after each batch as `(processed, total)`
/// archive entry counts.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Entries examined between cooperative yields.
pub const BATCH_SIZE: usize = 50;

/// Decode a compressed page archive into a [`CommandStore`].
///
/// Entries are processed in batches of [`BATCH_SIZE`] with a yield between
/// batches. Ineligible entries (directories, wrong suffix, unmatched path,
/// unsupported platform, blank body) are skipped silently; unreadable
/// entries are logged and skipped. An archive that produces zero records is
/// structurally incompatible and fails with [`ArchiveError::NoEntries`].
pub async fn decode_archive(
    bytes: &[u8],
    progress: Option<&ProgressCallback>,
) -> Result<CommandStore> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    let names: Vec<String> = zip.file_names().map(str::to_string).collect();
    let total = names.len();
    debug!("archive holds {total} entries");

    let mut store = CommandStore::new();
    let mut processed = 0usize;
    for batch in names.chunks(BATCH_SIZE) {
        for name in batch {
            decode_entry(&mut zip, name, &mut store);
        }
        processed += batch.len();
        if let Some(callback) = progress {
            callback(processed, total);
        }
        tokio::task::yield_now().await;
    }

    if store.is_empty() {
        return Err(ArchiveError::NoEntries);
    }
    info!(
        "decoded {} command pages from {total} archive entries",
        store.len()
    );
    Ok(store)
}

fn decode_entry(zip: &mut ZipArchive<Cursor<&[u8]>>, name: &str, store: &mut CommandStore) {
    if name.ends_with('/') || !name.ends_with(".md") {
        return;
    }
    let Some((platform_raw, command)) = classify_entry(name) else {
        return;
    };
    let Ok(platform) = platform_raw.parse::<Platform>() else {
        debug!("skipping {name}: unsupported platform {platform_raw}");
        return;
    };
    let text = match read_entry(zip, name) {
        Ok(text) => text,
        Err(error) => {
            warn!("failed to read archive entry {name}: {error}");
            return;
        }
    };
    if text.trim().is_empty() {
        return;
    }
    let parsed = parse_page(&text);
    store.insert(CommandRecord {
        command,
        platform,
        raw_text: text,
        description: parsed.description,
        examples: parsed.examples,
    });
}

fn read_entry(zip: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> std::io::Result<String> {
    let mut file = zip.by_name(name).map_err(std::io::Error::other)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}
