//! User overlays drawn onto an already-composited item image.

use std::{path::PathBuf, sync::Arc};

use image::RgbaImage;

use crate::{
    assets::{
        color::Rgba8,
        font::{TextBlock, TextLayoutEngine},
    },
    compose::{
        plan::{CanvasSource, DelayPolicy, FramePlan, FramePlanBuilder},
        prepare::{load_resized, prepare_avatar, prepare_nameplate},
    },
    config::{
        item::{ColorTable, ItemConfig, NumberConfig, PathConfig, ProfileBoxConfig},
        need,
    },
    foundation::core::{Pos, Size},
    foundation::error::ComposeResult,
    render::cpu::{Anchor, Mark, Sprite, circle_mask, rasterize_marks},
};

const THIRD_SCALE: u32 = 3;
const NAMEPLATE_DELAY_MS: u32 = 100;

/// Nameplate, avatar and tag over each frame.
#[derive(Clone, Debug)]
pub struct UserOverlayJob {
    pub image_size: Size,
    pub avatar_width: u32,
    pub avatar_pos: Pos,
    pub nameplate_pos: Pos,
    pub nameplate_padding: u32,
    pub nameplate_height: u32,
    pub tag_pos: Pos,
    pub font_px: f32,
    pub nameplate: PathBuf,
    pub circle_mask: PathBuf,
    pub font: PathBuf,
    pub font_color: Rgba8,
    pub avatar_url: String,
    pub user_tag: String,
}

impl UserOverlayJob {
    pub fn resolve(cfg: &ItemConfig, avatar_url: &str, user_tag: &str) -> ComposeResult<Self> {
        let nums = &cfg.number_config;
        let paths = &cfg.path_config;
        Ok(Self {
            image_size: nums.image_size()?,
            avatar_width: nums.avatar_width()?,
            avatar_pos: nums.avatar_pos()?,
            nameplate_pos: nums.nameplate_pos()?,
            nameplate_padding: nums.nameplate_padding()?,
            nameplate_height: nums.nameplate_height()?,
            tag_pos: nums.user_tag_pos()?,
            font_px: nums.font_medium()?,
            nameplate: paths.nameplate()?,
            circle_mask: paths.circle_mask()?,
            font: paths.font()?,
            font_color: cfg.color_config.font()?,
            avatar_url: avatar_url.to_string(),
            user_tag: user_tag.to_string(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn plan(&self) -> ComposeResult<FramePlan> {
        let mut engine = TextLayoutEngine::from_path(&self.font)?;
        let circle = load_resized(&self.circle_mask, Size::square(self.avatar_width))?;
        let avatar = prepare_avatar(&self.avatar_url, self.avatar_width, &circle)?;
        let nameplate = prepare_nameplate(
            &self.nameplate,
            &mut engine,
            &self.user_tag,
            self.font_px,
            self.nameplate_padding,
            self.nameplate_height,
        )?;
        let tag = rasterize_marks(
            &[Mark::text(
                engine.layout(&self.user_tag, self.font_px, self.font_color)?,
                self.tag_pos,
                Anchor::LeftBaseline,
            )],
            Some(&engine.font_data()),
        )?;

        FramePlan::builder(CanvasSource::Frame {
            size: self.image_size,
        })
        .paste(nameplate, self.nameplate_pos)
        .paste(avatar, self.avatar_pos)
        .sprite(tag)
        .downscale(THIRD_SCALE)
        .delay(DelayPolicy::Fixed(NAMEPLATE_DELAY_MS))
        .build()
    }
}

/// Resolved rounded-box geometry for the score overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileBoxes {
    pub x: f64,
    pub one_y: f64,
    pub two_y: f64,
    pub three_y: f64,
    pub four_y: f64,
    pub height: f64,
    pub radius: f64,
    pub text_x: f64,
    pub text_y_offset: f64,
    pub text_box_extra: f64,
    pub user_box_extra: f64,
    pub user_tag_x: f64,
    pub avatar_x: f64,
    pub avatar_y_offset: f64,
    pub avatar_width: u32,
}

impl ProfileBoxes {
    pub fn resolve(cfg: &ProfileBoxConfig) -> ComposeResult<Self> {
        let key = |k: &str| format!("numberConfig.{k}");
        Ok(Self {
            x: need(cfg.item_box_x, &key("itemBoxX"))?,
            one_y: need(cfg.item_box_one_y, &key("itemBoxOneY"))?,
            two_y: need(cfg.item_box_two_y, &key("itemBoxTwoY"))?,
            three_y: need(cfg.item_box_three_y, &key("itemBoxThreeY"))?,
            four_y: need(cfg.item_box_four_y, &key("itemBoxFourY"))?,
            height: need(cfg.item_box_height, &key("itemBoxHeight"))?,
            radius: need(cfg.border, &key("border"))?,
            text_x: need(cfg.item_text_x, &key("itemTextX"))?,
            text_y_offset: need(cfg.item_text_y_offset, &key("itemTextYOffset"))?,
            text_box_extra: need(cfg.item_text_box_extra, &key("itemTextBoxExtra"))?,
            user_box_extra: need(cfg.item_user_box_extra, &key("itemUserBoxExtra"))?,
            user_tag_x: need(cfg.item_user_tag_x, &key("itemUserTagX"))?,
            avatar_x: need(cfg.item_user_avatar_x, &key("itemUserAvatarX"))?,
            avatar_y_offset: need(cfg.item_user_avatar_y_offset, &key("itemUserAvatarYOffset"))?,
            avatar_width: need(cfg.item_user_avatar_width, &key("itemUserAvatarWidth"))?,
        })
    }
}

/// The user who sent a gift, shown in the "From" box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gifter {
    pub avatar_url: String,
    pub user_tag: String,
}

impl Gifter {
    /// Both halves must be present; an empty tag or avatar means no gift.
    pub fn from_args(avatar_url: &str, user_tag: &str) -> Option<Self> {
        if avatar_url.is_empty() || user_tag.is_empty() {
            return None;
        }
        Some(Self {
            avatar_url: avatar_url.to_string(),
            user_tag: user_tag.to_string(),
        })
    }
}

/// User box, optional gift boxes and optional score badge over each frame.
#[derive(Clone, Debug)]
pub struct ScoreOverlayJob {
    pub image_size: Size,
    pub font_px: f32,
    pub font: PathBuf,
    pub font_color: Rgba8,
    pub box_color: Rgba8,
    pub bucks_color: Rgba8,
    pub boxes: ProfileBoxes,
    pub avatar_url: String,
    pub user_tag: String,
    pub score: String,
    pub gifter: Option<Gifter>,
}

impl ScoreOverlayJob {
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        paths: &PathConfig,
        colors: &ColorTable,
        nums: &NumberConfig,
        boxes: &ProfileBoxConfig,
        avatar_url: &str,
        user_tag: &str,
        score: &str,
        gifter: Option<Gifter>,
    ) -> ComposeResult<Self> {
        let bucks_color = if score.is_empty() {
            Rgba8::TRANSPARENT
        } else {
            colors.bucks()?
        };
        Ok(Self {
            image_size: nums.image_size()?,
            font_px: nums.font_small_medium()?,
            font: paths.font()?,
            font_color: colors.font()?,
            box_color: colors.dark()?,
            bucks_color,
            boxes: ProfileBoxes::resolve(boxes)?,
            avatar_url: avatar_url.to_string(),
            user_tag: user_tag.to_string(),
            score: score.to_string(),
            gifter,
        })
    }

    /// Whether the score badge is drawn: a non-empty score on an ungifted item.
    pub fn shows_score(&self) -> bool {
        !self.score.is_empty() && self.gifter.is_none()
    }

    #[tracing::instrument(skip(self), fields(gifted = self.gifter.is_some()))]
    pub fn plan(&self) -> ComposeResult<FramePlan> {
        let b = &self.boxes;
        let mut engine = TextLayoutEngine::from_path(&self.font)?;
        let font = engine.font_data();
        let mask = circle_mask(b.avatar_width)?;

        let mut builder = FramePlan::builder(CanvasSource::Frame {
            size: self.image_size,
        });

        let user_y = match &self.gifter {
            Some(gifter) => {
                builder = builder
                    .sprite(self.label_box(&mut engine, &font, b.one_y, "To")?)
                    .sprite(self.label_box(&mut engine, &font, b.three_y, "From")?);
                builder = self.user_box(
                    builder,
                    &mut engine,
                    &font,
                    &mask,
                    b.four_y,
                    &gifter.avatar_url,
                    &gifter.user_tag,
                )?;
                b.two_y
            }
            None => b.one_y,
        };
        builder = self.user_box(
            builder,
            &mut engine,
            &font,
            &mask,
            user_y,
            &self.avatar_url,
            &self.user_tag,
        )?;

        if self.shows_score() {
            let dollars = format!("${}", self.score);
            let block = engine.layout_spans(
                &[("+", self.font_color), (&dollars, self.bucks_color)],
                self.font_px,
            )?;
            builder = builder.sprite(self.text_box(block, &font, b.two_y, b.text_x, b.text_box_extra)?);
        }

        builder
            .downscale(THIRD_SCALE)
            .delay(DelayPolicy::Source)
            .build()
    }

    fn label_box(
        &self,
        engine: &mut TextLayoutEngine,
        font: &vello_cpu::peniko::FontData,
        y: f64,
        label: &str,
    ) -> ComposeResult<Sprite> {
        let block = engine.layout(label, self.font_px, self.font_color)?;
        self.text_box(block, font, y, self.boxes.text_x, self.boxes.text_box_extra)
    }

    #[allow(clippy::too_many_arguments)]
    fn user_box(
        &self,
        builder: FramePlanBuilder,
        engine: &mut TextLayoutEngine,
        font: &vello_cpu::peniko::FontData,
        mask: &RgbaImage,
        y: f64,
        avatar_url: &str,
        tag: &str,
    ) -> ComposeResult<FramePlanBuilder> {
        let b = &self.boxes;
        let block = engine.layout(tag, self.font_px, self.font_color)?;
        let plate = self.text_box(block, font, y, b.user_tag_x, b.user_box_extra)?;
        let avatar: Arc<RgbaImage> = prepare_avatar(avatar_url, b.avatar_width, mask)?;
        let at = Pos::new(
            b.avatar_x.round() as i64,
            (y + b.avatar_y_offset).round() as i64,
        );
        Ok(builder.sprite(plate).paste(avatar, at))
    }

    /// Rounded box as wide as the text plus `extra`, with the text left-aligned on the box's
    /// baseline offset.
    fn text_box(
        &self,
        block: TextBlock,
        font: &vello_cpu::peniko::FontData,
        y: f64,
        text_x: f64,
        extra: f64,
    ) -> ComposeResult<Sprite> {
        let b = &self.boxes;
        let rect = kurbo::Rect::new(b.x, y, b.x + f64::from(block.width) + extra, y + b.height);
        rasterize_marks(
            &[
                Mark::RoundedRect {
                    rect,
                    radius: b.radius,
                    color: self.box_color,
                },
                Mark::Text {
                    block,
                    x: text_x,
                    baseline_y: y + b.text_y_offset,
                },
            ],
            Some(font),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/overlay.rs"]
mod tests;
