//! Locates the channel listing: an explicitly named file, the newest cached
//! JSON in the working directory, or the provider API as a last resort.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::info;

use crate::gitv::{self, ChannelListing};

/// Resolves and parses the channel listing.
///
/// # Errors
/// Errors when the chosen source cannot be read or parsed. A remote-fetch
/// failure is an error too: generating playlists from an empty lineup would
/// silently clobber the previous output files.
pub async fn load_channel_listing(
    client: &reqwest::Client,
    explicit: Option<&Path>,
    working_dir: &Path,
    remote_url: &str,
) -> Result<ChannelListing> {
    if let Some(path) = explicit {
        info!("Reading listing file {}", path.display());
        return parse_listing_file(path);
    }

    if let Some(path) = newest_json_file(working_dir)? {
        info!("Using cached listing {}", path.display());
        return parse_listing_file(&path);
    }

    info!("No cached listing found, fetching {remote_url}");
    gitv::fetch_channel_listing(client, remote_url).await
}

fn parse_listing_file(path: &Path) -> Result<ChannelListing> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading listing file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Listing file {} is not a valid channel listing", path.display()))
}

/// Newest `*.json` in `dir` by modification time, following symlinks. Ties
/// go to the lexically greatest file name, so repeated runs pick the same
/// file.
fn newest_json_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in
        fs::read_dir(dir).with_context(|| format!("Listing working dir {}", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("Listing working dir {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }

        // DirEntry::metadata would rank a symlink by its own mtime.
        let modified = path
            .metadata()
            .and_then(|m| m.modified())
            .with_context(|| format!("Reading mtime of {}", path.display()))?;

        let candidate = (modified, path);
        newest = Some(match newest.take() {
            Some(current) if current > candidate => current,
            _ => candidate,
        });
    }

    Ok(newest.map(|(_, path)| path))
}
