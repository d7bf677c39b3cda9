use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::{color::Rgba8, font::TextLayoutEngine},
    compose::{
        plan::{CanvasSource, DelayPolicy, FramePlan},
        prepare::{background_fill, load_resized, prepare_avatar, prepare_nameplate},
    },
    config::{
        item::{ItemConfig, ItemPreset},
        legacy::LegacyConfig,
        need,
    },
    foundation::core::{Pos, Size},
    foundation::error::ComposeResult,
    render::cpu::{Anchor, Mark, rasterize_marks},
};

const ANNOUNCE_DELAY_MS: u32 = 100;
const THIRD_SCALE: u32 = 3;

/// Strings drawn on an announcement.
#[derive(Clone, Debug, Default)]
pub struct AnnounceText {
    pub title: String,
    pub name: String,
    pub user_tag: String,
}

/// Resolved pixel layout.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnounceLayout {
    pub image_size: Size,
    pub item_size: Size,
    pub item_pos: Pos,
    pub avatar_width: u32,
    pub avatar_pos: Pos,
    pub nameplate_pos: Pos,
    pub nameplate_padding: u32,
    pub nameplate_height: u32,
    pub title_pos: Pos,
    pub name_pos: Pos,
    pub tag_pos: Pos,
    pub title_font_px: f32,
    pub text_font_px: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnounceAssets {
    pub underlay: PathBuf,
    pub backplate: PathBuf,
    pub overlay: PathBuf,
    pub nameplate: PathBuf,
    pub circle_mask: PathBuf,
    pub font: PathBuf,
}

/// What masks the backplate paste.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackplateMask {
    Own,
    Overlay,
}

/// A fully resolved announcement render.
#[derive(Clone, Debug)]
pub struct AnnounceJob {
    pub layout: AnnounceLayout,
    pub assets: AnnounceAssets,
    pub background: Rgba8,
    pub font_color: Rgba8,
    pub backplate_mask: BackplateMask,
    pub downscale: Option<u32>,
    pub avatar_url: String,
    pub text: AnnounceText,
}

impl AnnounceJob {
    /// Full-resolution layout from an item config, downscaled by 3 per frame.
    pub fn third_scale(
        cfg: &ItemConfig,
        color_key: &str,
        preset: ItemPreset,
        avatar_url: &str,
        text: AnnounceText,
    ) -> ComposeResult<Self> {
        let nums = &cfg.number_config;
        let paths = &cfg.path_config;
        let (item_size, item_pos) = nums.item_rect(preset)?;
        let font_medium = nums.font_medium()?;

        Ok(Self {
            layout: AnnounceLayout {
                image_size: nums.image_size()?,
                item_size,
                item_pos,
                avatar_width: nums.avatar_width()?,
                avatar_pos: nums.avatar_pos()?,
                nameplate_pos: nums.nameplate_pos()?,
                nameplate_padding: nums.nameplate_padding()?,
                nameplate_height: nums.nameplate_height()?,
                title_pos: nums.title_pos()?,
                name_pos: nums.name_pos()?,
                tag_pos: nums.user_tag_pos()?,
                title_font_px: font_medium,
                text_font_px: font_medium,
            },
            assets: AnnounceAssets {
                underlay: paths.underlay()?,
                backplate: paths.backplate()?,
                overlay: paths.overlay()?,
                nameplate: paths.nameplate()?,
                circle_mask: paths.circle_mask()?,
                font: paths.font()?,
            },
            background: cfg.color_config.get(color_key)?,
            font_color: cfg.color_config.font()?,
            backplate_mask: BackplateMask::Own,
            downscale: Some(THIRD_SCALE),
            avatar_url: avatar_url.to_string(),
            text,
        })
    }

    /// `config.json` layout with every number floor-halved at load; no per-frame downscale.
    pub fn half_scale(
        cfg: &LegacyConfig,
        background: Rgba8,
        preset: ItemPreset,
        avatar_url: &str,
        text: AnnounceText,
    ) -> ComposeResult<Self> {
        let nums = &cfg.numbers.announce_add;
        let fonts = &cfg.numbers.general.font_sizes;
        let key = |k: &str| format!("numbers.announceAdd.{k}");

        let (item_size, item_pos) = match preset {
            ItemPreset::Badge => (
                need(nums.badge_size, &key("badgeSize"))?,
                need(nums.badge_pos, &key("badgePos"))?,
            ),
            ItemPreset::Boar => (
                need(nums.boar_size, &key("boarSize"))?,
                need(nums.boar_pos, &key("boarPos"))?,
            ),
        };
        Ok(Self {
            layout: AnnounceLayout {
                image_size: need(nums.image_size, &key("imageSize"))?
                    .halved()
                    .non_empty(&key("imageSize"))?,
                item_size: item_size.halved().non_empty("announce item size")?,
                item_pos: item_pos.halved(),
                avatar_width: need(nums.user_avatar_width, &key("userAvatarWidth"))? / 2,
                avatar_pos: need(nums.user_avatar_pos, &key("userAvatarPos"))?.halved(),
                nameplate_pos: need(nums.nameplate_pos, &key("nameplatePos"))?.halved(),
                nameplate_padding: need(nums.nameplate_padding, &key("nameplatePadding"))? / 2,
                nameplate_height: need(nums.nameplate_height, &key("nameplateHeight"))? / 2,
                title_pos: need(nums.title_pos, &key("titlePos"))?.halved(),
                name_pos: need(nums.name_pos, &key("namePos"))?.halved(),
                tag_pos: need(nums.user_tag_pos, &key("userTagPos"))?.halved(),
                title_font_px: (need(fonts.big, "numbers.general.fontSizes.big")? / 2) as f32,
                text_font_px: (need(fonts.medium, "numbers.general.fontSizes.medium")? / 2) as f32,
            },
            assets: AnnounceAssets {
                underlay: cfg.announce_asset("underlay")?,
                backplate: cfg.announce_asset("backplate")?,
                overlay: cfg.announce_asset("overlay")?,
                nameplate: cfg.announce_asset("nameplate")?,
                circle_mask: cfg.announce_asset("circleMask")?,
                font: cfg.font()?,
            },
            background,
            font_color: cfg.hex_colors.font()?,
            backplate_mask: BackplateMask::Overlay,
            downscale: None,
            avatar_url: avatar_url.to_string(),
            text,
        })
    }

    /// Load and size every asset, then assemble the layer stack.
    #[tracing::instrument(skip(self), fields(downscale = ?self.downscale))]
    pub fn plan(&self) -> ComposeResult<FramePlan> {
        let l = &self.layout;
        let mut engine = TextLayoutEngine::from_path(&self.assets.font)?;

        let background = background_fill(self.background, &self.assets.underlay, l.image_size)?;
        let backplate = load_resized(&self.assets.backplate, l.image_size)?;
        let overlay = load_resized(&self.assets.overlay, l.image_size)?;
        let circle = load_resized(&self.assets.circle_mask, Size::square(l.avatar_width))?;
        let avatar = prepare_avatar(&self.avatar_url, l.avatar_width, &circle)?;
        let nameplate = prepare_nameplate(
            &self.assets.nameplate,
            &mut engine,
            &self.text.user_tag,
            l.text_font_px,
            l.nameplate_padding,
            l.nameplate_height,
        )?;

        let marks = [
            Mark::text(
                engine.layout(&self.text.title, l.title_font_px, self.font_color)?,
                l.title_pos,
                Anchor::MiddleBaseline,
            ),
            Mark::text(
                engine.layout(&self.text.name, l.text_font_px, self.font_color)?,
                l.name_pos,
                Anchor::MiddleBaseline,
            ),
            Mark::text(
                engine.layout(&self.text.user_tag, l.text_font_px, self.font_color)?,
                l.tag_pos,
                Anchor::LeftBaseline,
            ),
        ];
        let text = rasterize_marks(&marks, Some(&engine.font_data()))?;

        let builder = FramePlan::builder(CanvasSource::Template(background));
        let builder = match self.backplate_mask {
            BackplateMask::Own => builder.paste(backplate, Pos::ORIGIN),
            BackplateMask::Overlay => {
                builder.paste_with_mask(backplate, Pos::ORIGIN, Arc::clone(&overlay))
            }
        };
        let mut builder = builder
            .content(l.item_size, l.item_pos)
            .paste(overlay, Pos::ORIGIN)
            .paste(nameplate, l.nameplate_pos)
            .paste(avatar, l.avatar_pos)
            .sprite(text)
            .delay(DelayPolicy::Fixed(ANNOUNCE_DELAY_MS));
        if let Some(d) = self.downscale {
            builder = builder.downscale(d);
        }
        builder.build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/announce.rs"]
mod tests;
