use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;

use crate::{
    assets::color::Rgba8,
    config::{need, need_str},
    foundation::core::{Pos, Size},
    foundation::error::{ComposeError, ComposeResult},
};

/// Asset directories and file names. Paths are joined by plain concatenation, so directory
/// entries carry their trailing separator.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathConfig {
    pub item_assets: String,
    pub other_assets: String,
    pub item_overlay: String,
    pub item_underlay: String,
    pub item_backplate: String,
    pub item_nameplate: String,
    pub circle_mask: String,
    pub main_font: String,
}

impl PathConfig {
    pub fn item_asset(&self, file: &str, key: &str) -> ComposeResult<PathBuf> {
        Ok(PathBuf::from(format!(
            "{}{}",
            self.item_assets,
            need_str(file, &format!("pathConfig.{key}"))?
        )))
    }

    pub fn other_asset(&self, file: &str, key: &str) -> ComposeResult<PathBuf> {
        Ok(PathBuf::from(format!(
            "{}{}",
            self.other_assets,
            need_str(file, &format!("pathConfig.{key}"))?
        )))
    }

    pub fn overlay(&self) -> ComposeResult<PathBuf> {
        self.item_asset(&self.item_overlay, "itemOverlay")
    }

    pub fn underlay(&self) -> ComposeResult<PathBuf> {
        self.item_asset(&self.item_underlay, "itemUnderlay")
    }

    pub fn backplate(&self) -> ComposeResult<PathBuf> {
        self.item_asset(&self.item_backplate, "itemBackplate")
    }

    pub fn nameplate(&self) -> ComposeResult<PathBuf> {
        self.item_asset(&self.item_nameplate, "itemNameplate")
    }

    pub fn circle_mask(&self) -> ComposeResult<PathBuf> {
        self.other_asset(&self.circle_mask, "circleMask")
    }

    pub fn font(&self) -> ComposeResult<PathBuf> {
        self.other_asset(&self.main_font, "mainFont")
    }
}

/// Semantic color names (`font`, `dark`, `bucks`, rarity keys) mapped to color values.
///
/// Entries are parsed on lookup, so unrelated malformed entries never fail a render.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ColorTable(BTreeMap<String, serde_json::Value>);

impl ColorTable {
    pub fn get(&self, key: &str) -> ComposeResult<Rgba8> {
        let value = self
            .0
            .get(key)
            .ok_or_else(|| ComposeError::config(format!("color '{key}' is not configured")))?;
        Rgba8::deserialize(value)
            .map_err(|e| ComposeError::config(format!("color '{key}': {e}")))
    }

    pub fn font(&self) -> ComposeResult<Rgba8> {
        self.get("font")
    }

    pub fn dark(&self) -> ComposeResult<Rgba8> {
        self.get("dark")
    }

    pub fn bucks(&self) -> ComposeResult<Rgba8> {
        self.get("bucks")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// Item-image layout keys (`numberConfig`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberConfig {
    pub font_medium: Option<f32>,
    pub font_small_medium: Option<f32>,

    pub item_image_size: Option<Size>,
    pub item_pos: Option<Pos>,
    pub item_size: Option<Size>,
    pub item_badge_pos: Option<Pos>,
    pub item_badge_size: Option<Size>,
    pub item_boar_pos: Option<Pos>,
    pub item_boar_size: Option<Size>,

    pub item_title_pos: Option<Pos>,
    pub item_name_pos: Option<Pos>,

    pub item_user_avatar_width: Option<u32>,
    pub item_user_avatar_pos: Option<Pos>,
    pub item_user_tag_pos: Option<Pos>,
    pub item_nameplate_pos: Option<Pos>,
    pub item_nameplate_padding: Option<u32>,
    pub item_nameplate_height: Option<u32>,
}

/// Which content-size preset an item frame uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPreset {
    Badge,
    Boar,
}

impl NumberConfig {
    pub fn image_size(&self) -> ComposeResult<Size> {
        need(self.item_image_size, "numberConfig.itemImageSize")?
            .non_empty("numberConfig.itemImageSize")
    }

    pub fn font_medium(&self) -> ComposeResult<f32> {
        need(self.font_medium, "numberConfig.fontMedium")
    }

    pub fn font_small_medium(&self) -> ComposeResult<f32> {
        need(self.font_small_medium, "numberConfig.fontSmallMedium")
    }

    /// Content size and offset for `preset`.
    pub fn item_rect(&self, preset: ItemPreset) -> ComposeResult<(Size, Pos)> {
        let (size, pos, size_key, pos_key) = match preset {
            ItemPreset::Badge => (
                self.item_badge_size,
                self.item_badge_pos,
                "numberConfig.itemBadgeSize",
                "numberConfig.itemBadgePos",
            ),
            ItemPreset::Boar => (
                self.item_boar_size,
                self.item_boar_pos,
                "numberConfig.itemBoarSize",
                "numberConfig.itemBoarPos",
            ),
        };
        Ok((need(size, size_key)?.non_empty(size_key)?, need(pos, pos_key)?))
    }

    /// `itemPos`/`itemSize` when both are configured, else the boar preset.
    pub fn explicit_item_rect(&self) -> ComposeResult<(Size, Pos)> {
        match (self.item_size, self.item_pos) {
            (Some(size), Some(pos)) => Ok((size.non_empty("numberConfig.itemSize")?, pos)),
            _ => self.item_rect(ItemPreset::Boar),
        }
    }

    pub fn title_pos(&self) -> ComposeResult<Pos> {
        need(self.item_title_pos, "numberConfig.itemTitlePos")
    }

    pub fn name_pos(&self) -> ComposeResult<Pos> {
        need(self.item_name_pos, "numberConfig.itemNamePos")
    }

    pub fn avatar_width(&self) -> ComposeResult<u32> {
        need(self.item_user_avatar_width, "numberConfig.itemUserAvatarWidth")
    }

    pub fn avatar_pos(&self) -> ComposeResult<Pos> {
        need(self.item_user_avatar_pos, "numberConfig.itemUserAvatarPos")
    }

    pub fn user_tag_pos(&self) -> ComposeResult<Pos> {
        need(self.item_user_tag_pos, "numberConfig.itemUserTagPos")
    }

    pub fn nameplate_pos(&self) -> ComposeResult<Pos> {
        need(self.item_nameplate_pos, "numberConfig.itemNameplatePos")
    }

    pub fn nameplate_padding(&self) -> ComposeResult<u32> {
        need(self.item_nameplate_padding, "numberConfig.itemNameplatePadding")
    }

    pub fn nameplate_height(&self) -> ComposeResult<u32> {
        need(self.item_nameplate_height, "numberConfig.itemNameplateHeight")
    }
}

/// Score-overlay box geometry, read from the same `numberConfig` object.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileBoxConfig {
    pub item_box_x: Option<f64>,
    pub item_box_one_y: Option<f64>,
    pub item_box_two_y: Option<f64>,
    pub item_box_three_y: Option<f64>,
    pub item_box_four_y: Option<f64>,
    pub item_box_height: Option<f64>,
    pub border: Option<f64>,
    pub item_text_x: Option<f64>,
    pub item_text_y_offset: Option<f64>,
    pub item_text_box_extra: Option<f64>,
    pub item_user_box_extra: Option<f64>,
    pub item_user_tag_x: Option<f64>,
    pub item_user_avatar_x: Option<f64>,
    pub item_user_avatar_y_offset: Option<f64>,
    pub item_user_avatar_width: Option<u32>,
}

/// Combined `{pathConfig, colorConfig, numberConfig}` document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemConfig {
    pub path_config: PathConfig,
    pub color_config: ColorTable,
    pub number_config: NumberConfig,
}

#[cfg(test)]
#[path = "../../tests/unit/config/item.rs"]
mod tests;
