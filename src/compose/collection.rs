use std::path::PathBuf;

use crate::{
    assets::{color::Rgba8, font::TextLayoutEngine},
    compose::{
        plan::{CanvasSource, DelayPolicy, FramePlan},
        prepare::{background_fill, load_resized},
    },
    config::item::{ColorTable, ItemPreset, NumberConfig, PathConfig},
    foundation::core::{Pos, Size},
    foundation::error::ComposeResult,
    render::cpu::{Anchor, Mark, rasterize_marks},
};

const THIRD_SCALE: u32 = 3;

/// Collection card: rarity-colored frame with title and item name, inheriting source timing.
#[derive(Clone, Debug)]
pub struct CollectionJob {
    pub image_size: Size,
    pub item_size: Size,
    pub item_pos: Pos,
    pub title_pos: Pos,
    pub name_pos: Pos,
    pub font_px: f32,
    pub underlay: PathBuf,
    pub backplate: PathBuf,
    pub overlay: PathBuf,
    pub font: PathBuf,
    /// Background fill and name color.
    pub rarity_color: Rgba8,
    pub font_color: Rgba8,
    pub title: String,
    pub name: String,
}

impl CollectionJob {
    pub fn resolve(
        paths: &PathConfig,
        colors: &ColorTable,
        nums: &NumberConfig,
        color_key: &str,
        preset: ItemPreset,
        title: &str,
        name: &str,
    ) -> ComposeResult<Self> {
        let (item_size, item_pos) = nums.item_rect(preset)?;
        Ok(Self {
            image_size: nums.image_size()?,
            item_size,
            item_pos,
            title_pos: nums.title_pos()?,
            name_pos: nums.name_pos()?,
            font_px: nums.font_medium()?,
            underlay: paths.underlay()?,
            backplate: paths.backplate()?,
            overlay: paths.overlay()?,
            font: paths.font()?,
            rarity_color: colors.get(color_key)?,
            font_color: colors.font()?,
            title: title.to_string(),
            name: name.to_string(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn plan(&self) -> ComposeResult<FramePlan> {
        let mut engine = TextLayoutEngine::from_path(&self.font)?;
        let background = background_fill(self.rarity_color, &self.underlay, self.image_size)?;
        let backplate = load_resized(&self.backplate, self.image_size)?;
        let overlay = load_resized(&self.overlay, self.image_size)?;

        let marks = [
            Mark::text(
                engine.layout(&self.title, self.font_px, self.font_color)?,
                self.title_pos,
                Anchor::MiddleBaseline,
            ),
            Mark::text(
                engine.layout(&self.name, self.font_px, self.rarity_color)?,
                self.name_pos,
                Anchor::MiddleBaseline,
            ),
        ];
        let text = rasterize_marks(&marks, Some(&engine.font_data()))?;

        FramePlan::builder(CanvasSource::Template(background))
            .paste(backplate, Pos::ORIGIN)
            .content(self.item_size, self.item_pos)
            .paste(overlay, Pos::ORIGIN)
            .sprite(text)
            .downscale(THIRD_SCALE)
            .delay(DelayPolicy::Source)
            .build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/collection.rs"]
mod tests;
