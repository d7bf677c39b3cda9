//! One-time asset preparation shared by the compositors. Everything here runs before the frame
//! loop.

use std::{path::Path, sync::Arc};

use image::RgbaImage;

use crate::{
    assets::{
        color::Rgba8,
        decode::{decode_image, load_image},
        fetch::fetch_bytes,
        font::TextLayoutEngine,
    },
    foundation::core::Size,
    foundation::error::{ComposeError, ComposeResult},
    render::composite::{intersect_alpha, resize, stencil_fill},
};

/// Open an asset and resize it to `size`.
pub fn load_resized(path: &Path, size: Size) -> ComposeResult<Arc<RgbaImage>> {
    let img = load_image(path)?;
    Ok(Arc::new(resize(&img, size)?))
}

/// Flat `color` shaped like the stencil at `path`.
pub fn background_fill(color: Rgba8, stencil_path: &Path, size: Size) -> ComposeResult<Arc<RgbaImage>> {
    let stencil = load_resized(stencil_path, size)?;
    Ok(Arc::new(stencil_fill(color, &stencil)))
}

/// Fetch an avatar, resize it to a `diameter` square and cut it to the mask's alpha.
#[tracing::instrument(skip(mask))]
pub fn prepare_avatar(url: &str, diameter: u32, mask: &RgbaImage) -> ComposeResult<Arc<RgbaImage>> {
    let size = Size::square(diameter).non_empty("avatar width")?;
    let bytes = fetch_bytes(url)?;
    let avatar = decode_image(&bytes)
        .map_err(|e| ComposeError::asset(format!("avatar '{url}': {e}")))?;
    let mut avatar = resize(&avatar, size)?;
    let mask = resize(mask, size)?;
    intersect_alpha(&mut avatar, &mask)?;
    Ok(Arc::new(avatar))
}

/// `floor(renderedWidth(tag)) + padding`.
pub fn nameplate_width(
    engine: &mut TextLayoutEngine,
    tag: &str,
    font_px: f32,
    padding: u32,
) -> ComposeResult<u32> {
    let width = engine.measure(tag, font_px)?;
    Ok((width.floor() as u32).saturating_add(padding))
}

/// Nameplate asset stretched to fit `tag`.
pub fn prepare_nameplate(
    path: &Path,
    engine: &mut TextLayoutEngine,
    tag: &str,
    font_px: f32,
    padding: u32,
    height: u32,
) -> ComposeResult<Arc<RgbaImage>> {
    let width = nameplate_width(engine, tag, font_px, padding)?;
    let size = Size::new(width, height).non_empty("nameplate size")?;
    load_resized(path, size)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/prepare.rs"]
mod tests;
