//! Typed views of the JSON documents the bot hands to the compositors.
//!
//! Every struct ignores unknown keys and defaults missing ones, so a document only has to carry
//! the keys the selected compositor reads. Missing required keys surface as
//! [`ComposeError::Config`](crate::ComposeError::Config) when a layout is resolved.

/// `{pathConfig, colorConfig, numberConfig}` fragments passed on the command line.
pub mod item;
/// The bot's `config.json` document.
pub mod legacy;

use serde::de::DeserializeOwned;

use crate::foundation::error::{ComposeError, ComposeResult};

/// Parse one inline JSON argument, naming it in the error.
pub fn parse_json_arg<T: DeserializeOwned>(what: &str, raw: &str) -> ComposeResult<T> {
    serde_json::from_str(raw).map_err(|e| ComposeError::config(format!("{what}: {e}")))
}

/// Unwrap an optional layout key, naming the full key path when absent.
pub(crate) fn need<T>(value: Option<T>, key: &str) -> ComposeResult<T> {
    value.ok_or_else(|| ComposeError::config(format!("missing required key '{key}'")))
}

/// Reject an empty file name before it is joined onto a base directory.
pub(crate) fn need_str<'a>(value: &'a str, key: &str) -> ComposeResult<&'a str> {
    if value.is_empty() {
        return Err(ComposeError::config(format!("missing required key '{key}'")));
    }
    Ok(value)
}
