use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    config::{item::ColorTable, need, need_str},
    foundation::core::{Pos, Size},
    foundation::error::ComposeResult,
};

/// Key that names a folder inside an asset or script table rather than a file.
pub const BASE_PATH_KEY: &str = "basePath";

/// The bot's `config.json`. Tables keep document order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyConfig {
    pub rarities_info: IndexMap<String, RarityInfo>,
    #[serde(rename = "boarIDs")]
    pub boar_ids: IndexMap<String, ItemEntry>,
    #[serde(rename = "badgeIDs")]
    pub badge_ids: IndexMap<String, ItemEntry>,
    pub hex_colors: ColorTable,
    pub paths: Paths,
    pub numbers: Numbers,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RarityInfo {
    pub boars: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemEntry {
    pub file: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub assets: AssetPaths,
    pub scripts: IndexMap<String, String>,
    pub data: DataPaths,
}

/// File tables keyed by asset name. Each table carries its folder under [`BASE_PATH_KEY`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetPaths {
    pub boars: String,
    pub badges: String,
    pub announce_add: IndexMap<String, String>,
    pub collection: IndexMap<String, String>,
    pub other: IndexMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataPaths {
    pub global_file: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Numbers {
    pub general: GeneralNumbers,
    pub announce_add: AnnounceAddNumbers,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralNumbers {
    pub font_sizes: FontSizes,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub big: Option<u32>,
    pub medium: Option<u32>,
}

/// Full-resolution announcement layout. Consumers halve every value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnounceAddNumbers {
    pub image_size: Option<Size>,
    pub user_avatar_width: Option<u32>,
    pub nameplate_padding: Option<u32>,
    pub nameplate_height: Option<u32>,
    pub badge_size: Option<Size>,
    pub badge_pos: Option<Pos>,
    pub boar_size: Option<Size>,
    pub boar_pos: Option<Pos>,
    pub nameplate_pos: Option<Pos>,
    pub user_avatar_pos: Option<Pos>,
    pub title_pos: Option<Pos>,
    pub name_pos: Option<Pos>,
    pub user_tag_pos: Option<Pos>,
}

/// `table[basePath] + table[key]`.
pub fn table_file(table: &IndexMap<String, String>, table_name: &str, key: &str) -> ComposeResult<PathBuf> {
    let base = table.get(BASE_PATH_KEY).map(String::as_str).unwrap_or_default();
    let file = need(
        table.get(key).map(String::as_str),
        &format!("{table_name}.{key}"),
    )?;
    Ok(PathBuf::from(format!(
        "{base}{}",
        need_str(file, &format!("{table_name}.{key}"))?
    )))
}

impl LegacyConfig {
    pub fn announce_asset(&self, key: &str) -> ComposeResult<PathBuf> {
        table_file(&self.paths.assets.announce_add, "paths.assets.announceAdd", key)
    }

    pub fn font(&self) -> ComposeResult<PathBuf> {
        table_file(&self.paths.assets.other, "paths.assets.other", "font")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/legacy.rs"]
mod tests;
