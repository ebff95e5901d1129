use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Tag/EPG listing endpoint for the Jiangsu Unicom lineup, served by GITV.
pub const DEFAULT_LIST_URL: &str =
    "http://live.epg.gitv.tv/tagNewestEpgList/JS_CUCC/1/100/0.json";

/// Attempts per request: the first try plus one retry.
const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Channel listing document as served by the tag API (and as cached on disk).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelListing {
    pub data: Vec<ChannelRecord>,
}

/// One channel row of the tag listing, kept verbatim from the provider JSON.
///
/// `play_url` is an indirect pointer; fetching it yields the actual stream
/// URL (see [`resolve_stream_url`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub tag: String,
    pub chnun_code: String,
    pub chn_name: String,
    pub chn_code: String,
    pub play_url: String,
}

/// Play-pointer responses carry the direct stream URL in a single field.
#[derive(Debug, Deserialize)]
struct PlayPointer {
    u: String,
}

/// Fetches the channel listing from the tag API.
///
/// # Errors
/// Errors on network failure, non-2xx status (after one retry) or a response
/// that does not parse as a listing document.
#[instrument(skip(client))]
pub async fn fetch_channel_listing(
    client: &reqwest::Client,
    url: &str,
) -> Result<ChannelListing> {
    let response = get_with_retry(client, url)
        .await
        .context("Fetching channel listing")?;

    response
        .json::<ChannelListing>()
        .await
        .context("Parsing channel listing response")
}

/// Resolves a channel's indirect play pointer into its direct stream URL.
///
/// # Errors
/// Errors on network failure, non-2xx status (after one retry) or a response
/// without the expected `u` field. Callers are expected to skip the channel.
#[instrument(skip(client, play_url))]
pub async fn resolve_stream_url(client: &reqwest::Client, play_url: &str) -> Result<String> {
    let response = get_with_retry(client, play_url)
        .await
        .context("Fetching play pointer")?;

    let pointer = response
        .json::<PlayPointer>()
        .await
        .context("Parsing play pointer response")?;

    Ok(pointer.u)
}

/// GET with one bounded retry on network errors and non-2xx statuses.
async fn get_with_retry(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match client.get(url).send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                if attempts >= MAX_ATTEMPTS {
                    bail!("GET {url} returned status {}", response.status());
                }
                warn!("GET {url} returned status {}, retrying", response.status());
            }
            Err(e) => {
                if attempts >= MAX_ATTEMPTS {
                    return Err(e).with_context(|| format!("GET {url}"));
                }
                warn!("GET {url} failed ({e}), retrying");
            }
        }
        tokio::time::sleep(RETRY_DELAY).await;
    }
}
