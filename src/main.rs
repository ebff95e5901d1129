#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::cargo_common_metadata)]

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use gitv::DEFAULT_LIST_URL;
use groups::GroupRules;

pub mod gitv;
pub mod groups;
pub mod output;
pub mod playlist;
pub mod source;
pub mod util;

/// Directory whose `*.m3u` files are appended verbatim to both playlists.
const CUSTOM_DIR: &str = "custom";

const FULL_PLAYLIST_NAME: &str = "iptv_js_full";
const KID_PLAYLIST_NAME: &str = "iptv_js_kid";

/// Generates full and kid-safe M3U playlists from the Jiangsu Unicom IPTV channel listing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Channel listing JSON to use instead of the cached or remote one
    listing: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let list_url =
        std::env::var("IPTV_LIST_URL").unwrap_or_else(|_| DEFAULT_LIST_URL.to_string());

    let client = util::init_http_client();
    let working_dir = Path::new(".");

    let listing =
        source::load_channel_listing(&client, args.listing.as_deref(), working_dir, &list_url)
            .await?;
    let total = listing.data.len();
    info!("Loaded {total} channel records");

    let rules = GroupRules::default();
    let resolved = playlist::resolve_channels(&client, listing.data, &rules).await;
    info!("Resolved {} of {total} channels", resolved.len());

    let (mut full, mut kid) = playlist::assemble(&resolved, &rules);

    let custom = playlist::read_custom_fragments(&working_dir.join(CUSTOM_DIR))?;
    full.append_raw(&custom);
    kid.append_raw(&custom);

    output::write_playlist_files(working_dir, FULL_PLAYLIST_NAME, full.as_str())?;
    output::write_playlist_files(working_dir, KID_PLAYLIST_NAME, kid.as_str())?;

    info!("Done");
    Ok(())
}
