//! Builds the extended-M3U documents: sequential channel resolution, the
//! header and `#EXTINF`/URL entry pairs, and the verbatim custom-fragment
//! merge.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::gitv::{self, ChannelRecord};
use crate::groups::GroupRules;

pub const EXTM3U_HEADER: &str = "#EXTM3U";

/// A channel whose play pointer resolved, carrying its direct stream URL and
/// assigned group. Lives only between resolution and assembly.
#[derive(Debug, Clone)]
pub struct ResolvedChannel {
    pub record: ChannelRecord,
    pub stream_url: String,
    pub group: String,
}

/// In-memory extended-M3U document.
///
/// Always starts with the `#EXTM3U` header line; every channel contributes
/// exactly two lines, so before fragments are appended the document holds
/// `1 + 2 * channel_count()` lines.
#[derive(Debug, Clone)]
pub struct PlaylistDocument {
    text: String,
    channels: usize,
}

impl PlaylistDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: format!("{EXTM3U_HEADER}\n"),
            channels: 0,
        }
    }

    pub fn push_channel(&mut self, group: &str, name: &str, url: &str) {
        self.text
            .push_str(&format!("#EXTINF:-1 group-title={group},{name}\n{url}\n"));
        self.channels += 1;
    }

    /// Appends already-formatted playlist text without touching it.
    pub fn append_raw(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for PlaylistDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves every record's play pointer into a direct stream URL, assigning
/// groups as it goes. A record whose pointer fails to resolve is skipped
/// with a warning and appears in neither output document.
pub async fn resolve_channels(
    client: &reqwest::Client,
    records: Vec<ChannelRecord>,
    rules: &GroupRules,
) -> Vec<ResolvedChannel> {
    let mut resolved = Vec::with_capacity(records.len());

    for record in records {
        info!("Processing {}-{}-{}", record.tag, record.chn_name, record.chn_code);
        match gitv::resolve_stream_url(client, &record.play_url).await {
            Ok(stream_url) => {
                let group = rules.classify(&record.chn_name).to_string();
                resolved.push(ResolvedChannel {
                    record,
                    stream_url,
                    group,
                });
            }
            Err(e) => warn!("Skipping {}: {e:#}", record.chn_name),
        }
    }

    resolved
}

/// Builds the full and the kid-safe documents in one pass over the resolved
/// channels. The kid-safe document drops every group `rules` marks as
/// restricted.
#[must_use]
pub fn assemble(
    channels: &[ResolvedChannel],
    rules: &GroupRules,
) -> (PlaylistDocument, PlaylistDocument) {
    let mut full = PlaylistDocument::new();
    let mut kid = PlaylistDocument::new();

    for channel in channels {
        full.push_channel(&channel.group, &channel.record.chn_name, &channel.stream_url);
        if rules.kid_safe(&channel.group) {
            kid.push_channel(&channel.group, &channel.record.chn_name, &channel.stream_url);
        }
    }

    (full, kid)
}

/// Concatenated contents of every `*.m3u` file in `dir`, sorted by file name
/// so the merge does not depend on directory listing order.
///
/// A missing directory reads as "no fragments"; an unreadable fragment is an
/// error.
///
/// # Errors
/// Errors when the directory or one of its fragments cannot be read.
pub fn read_custom_fragments(dir: &Path) -> Result<String> {
    if !dir.is_dir() {
        return Ok(String::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Listing custom fragment dir {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Listing custom fragment dir {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "m3u") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut merged = String::new();
    for path in paths {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Reading custom fragment {}", path.display()))?;
        merged.push_str(&contents);
    }

    Ok(merged)
}
