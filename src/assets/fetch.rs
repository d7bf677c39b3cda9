use std::path::Path;

use anyhow::Context;

use crate::{assets::decode::read_asset, foundation::error::ComposeResult};

/// Fetch raw bytes for a remote asset (user avatars).
///
/// `http(s)://` URLs are fetched with a blocking GET. `file://` URLs and bare paths are read
/// from disk. There is no timeout and no retry: a stalled request stalls the invocation.
#[tracing::instrument]
pub fn fetch_bytes(url: &str) -> ComposeResult<Vec<u8>> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let resp = reqwest::blocking::get(url)
            .with_context(|| format!("GET '{url}'"))?
            .error_for_status()
            .with_context(|| format!("GET '{url}'"))?;
        let bytes = resp
            .bytes()
            .with_context(|| format!("read body of '{url}'"))?;
        tracing::debug!(len = bytes.len(), "fetched remote asset");
        return Ok(bytes.to_vec());
    }

    let path = url.strip_prefix("file://").unwrap_or(url);
    read_asset(Path::new(path))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
