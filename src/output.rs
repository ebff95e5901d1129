//! Output file management: every document lands twice, a dated copy under
//! `history/` and a `-latest` copy in the working directory.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

const HISTORY_DIR: &str = "history";

/// Writes `contents` to `history/<name>-<YYYY-MM-DD>.m3u` and
/// `<name>-latest.m3u` under `working_dir`, creating the history directory
/// when absent.
///
/// # Errors
/// Errors when a directory or file cannot be created or written.
pub fn write_playlist_files(working_dir: &Path, name: &str, contents: &str) -> Result<()> {
    let date = chrono::Local::now().format("%Y-%m-%d");

    let history_dir = working_dir.join(HISTORY_DIR);
    fs::create_dir_all(&history_dir)
        .with_context(|| format!("Creating history dir {}", history_dir.display()))?;

    write_atomically(&history_dir.join(format!("{name}-{date}.m3u")), contents)?;
    write_atomically(&working_dir.join(format!("{name}-latest.m3u")), contents)?;

    Ok(())
}

/// Write-to-temp-then-rename: a crash mid-write never leaves a truncated
/// playlist at the destination.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("Output path {} has no parent directory", path.display()))?;

    // Same directory as the target, so the rename stays on one filesystem.
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Creating temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Writing {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Renaming temp file over {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}
