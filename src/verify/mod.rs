//! Referential-integrity checks over `config.json`.
//!
//! Every check runs independently and reports through [`Diagnostic`]s; a broken path or ID never
//! stops the remaining checks.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context;
use indexmap::IndexMap;

use crate::{
    config::legacy::{BASE_PATH_KEY, LegacyConfig},
    foundation::error::ComposeResult,
};

/// Badge every deployment must define.
pub const HUNTER_BADGE_ID: &str = "badge_hunter";

/// One violation found by [`verify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    InvalidRarityBoar { id: String },
    DuplicateRarityBoar { id: String },
    RarityWithoutColor { rarity: String },
    UnusedBoar { id: String },
    BoarFileMissing { id: String },
    BadgeFileMissing { id: String },
    HunterBadgeMissing,
    AssetFileMissing { key: String },
    ScriptFileMissing { key: String },
    GlobalFileMissing,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidRarityBoar { id } => {
                write!(f, "Invalid boar ID '{id}' found used in rarities")
            }
            Diagnostic::DuplicateRarityBoar { id } => {
                write!(f, "Boar ID '{id}' is used more than once")
            }
            Diagnostic::RarityWithoutColor { rarity } => {
                write!(f, "Rarity '{rarity}' has no color assigned")
            }
            Diagnostic::UnusedBoar { id } => write!(f, "Unused boar ID '{id}'"),
            Diagnostic::BoarFileMissing { id } => {
                write!(f, "Boar '{id}' references an invalid file path")
            }
            Diagnostic::BadgeFileMissing { id } => {
                write!(f, "Badge '{id}' references an invalid file path")
            }
            Diagnostic::HunterBadgeMissing => write!(f, "Hunter badge ID is wrong!"),
            Diagnostic::AssetFileMissing { key } => {
                write!(f, "Asset '{key}' references an invalid file path")
            }
            Diagnostic::ScriptFileMissing { key } => {
                write!(f, "Script '{key}' references an invalid file path")
            }
            Diagnostic::GlobalFileMissing => write!(f, "Global file references an invalid path"),
        }
    }
}

/// Answers whether a configured file can be opened.
pub trait PathProbe {
    fn can_open(&self, path: &Path) -> bool;
}

/// Probes the real filesystem by opening the file for reading. Directories do not count.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn can_open(&self, path: &Path) -> bool {
        match std::fs::File::open(path).and_then(|f| f.metadata()) {
            Ok(meta) => meta.is_file(),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "probe failed");
                false
            }
        }
    }
}

/// Run every check, in a fixed order, and collect the violations.
#[tracing::instrument(skip_all)]
pub fn verify(cfg: &LegacyConfig, probe: &impl PathProbe) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let used = check_rarities(cfg, &mut out);
    check_item_files(cfg, probe, &used, &mut out);
    if !cfg.badge_ids.contains_key(HUNTER_BADGE_ID) {
        out.push(Diagnostic::HunterBadgeMissing);
    }
    check_tables(cfg, probe, &mut out);
    if !probe.can_open(Path::new(&cfg.paths.data.global_file)) {
        out.push(Diagnostic::GlobalFileMissing);
    }
    tracing::info!(violations = out.len(), "config verified");
    out
}

/// Returns the boar IDs referenced by some rarity.
fn check_rarities<'a>(cfg: &'a LegacyConfig, out: &mut Vec<Diagnostic>) -> BTreeSet<&'a str> {
    let mut used = BTreeSet::new();
    for info in cfg.rarities_info.values() {
        for id in &info.boars {
            if !cfg.boar_ids.contains_key(id) {
                out.push(Diagnostic::InvalidRarityBoar { id: id.clone() });
            } else if !used.insert(id.as_str()) {
                out.push(Diagnostic::DuplicateRarityBoar { id: id.clone() });
            }
        }
    }
    for rarity in cfg.rarities_info.keys() {
        if !cfg.hex_colors.contains(rarity) {
            out.push(Diagnostic::RarityWithoutColor {
                rarity: rarity.clone(),
            });
        }
    }
    used
}

fn check_item_files(
    cfg: &LegacyConfig,
    probe: &impl PathProbe,
    used: &BTreeSet<&str>,
    out: &mut Vec<Diagnostic>,
) {
    let assets = &cfg.paths.assets;
    for (id, entry) in &cfg.boar_ids {
        if !used.contains(id.as_str()) {
            out.push(Diagnostic::UnusedBoar { id: id.clone() });
        }
        if !probe.can_open(&joined(&assets.boars, &entry.file)) {
            out.push(Diagnostic::BoarFileMissing { id: id.clone() });
        }
    }
    for (id, entry) in &cfg.badge_ids {
        if !probe.can_open(&joined(&assets.badges, &entry.file)) {
            out.push(Diagnostic::BadgeFileMissing { id: id.clone() });
        }
    }
}

fn check_tables(cfg: &LegacyConfig, probe: &impl PathProbe, out: &mut Vec<Diagnostic>) {
    let assets = &cfg.paths.assets;
    for table in [&assets.announce_add, &assets.collection, &assets.other] {
        for key in missing_in_table(table, probe) {
            out.push(Diagnostic::AssetFileMissing { key });
        }
    }
    for key in missing_in_table(&cfg.paths.scripts, probe) {
        out.push(Diagnostic::ScriptFileMissing { key });
    }
}

fn missing_in_table(table: &IndexMap<String, String>, probe: &impl PathProbe) -> Vec<String> {
    let base = table.get(BASE_PATH_KEY).map(String::as_str).unwrap_or_default();
    table
        .iter()
        .filter(|(key, _)| key.as_str() != BASE_PATH_KEY)
        .filter(|(_, file)| !probe.can_open(&joined(base, file)))
        .map(|(key, _)| key.clone())
        .collect()
}

fn joined(base: &str, file: &str) -> PathBuf {
    PathBuf::from(format!("{base}{file}"))
}

/// Parse the config at `path` and verify it against the filesystem.
///
/// An unreadable or malformed document is an error: no check can run without it.
pub fn verify_file(path: &Path) -> ComposeResult<Vec<Diagnostic>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let cfg: LegacyConfig = serde_json::from_str(&raw)?;
    Ok(verify(&cfg, &FsProbe))
}

#[cfg(test)]
#[path = "../../tests/unit/verify/mod.rs"]
mod tests;
