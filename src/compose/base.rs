use std::path::PathBuf;

use crate::{
    compose::{
        plan::{CanvasSource, DelayPolicy, FramePlan},
        prepare::load_resized,
    },
    config::item::NumberConfig,
    foundation::core::{Pos, Size},
    foundation::error::ComposeResult,
};

/// Item frames pasted onto a pre-rendered base image at full size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseJob {
    pub image_size: Size,
    pub item_size: Size,
    pub item_pos: Pos,
    pub base_image: PathBuf,
}

impl BaseJob {
    pub fn resolve(nums: &NumberConfig, base_image: PathBuf) -> ComposeResult<Self> {
        let (item_size, item_pos) = nums.explicit_item_rect()?;
        Ok(Self {
            image_size: nums.image_size()?,
            item_size,
            item_pos,
            base_image,
        })
    }

    #[tracing::instrument(skip(self), fields(base = %self.base_image.display()))]
    pub fn plan(&self) -> ComposeResult<FramePlan> {
        let base = load_resized(&self.base_image, self.image_size)?;
        FramePlan::builder(CanvasSource::Template(base))
            .content(self.item_size, self.item_pos)
            .delay(DelayPolicy::Source)
            .build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/base.rs"]
mod tests;
