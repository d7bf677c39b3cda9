use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{AnimationDecoder, ImageFormat, RgbaImage};

use crate::foundation::error::{ComposeError, ComposeResult};

/// Delay assigned to a frame whose source carries no timing (a static image).
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// One decoded input frame, fully composed (GIF frame disposal already applied).
#[derive(Clone, Debug)]
pub struct SourceFrame {
    pub image: RgbaImage,
    pub delay_ms: u32,
}

/// Decode encoded image bytes to straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> ComposeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode a single still image from disk.
pub fn load_image(path: &Path) -> ComposeResult<RgbaImage> {
    let bytes = read_asset(path)?;
    decode_image(&bytes).map_err(|e| ComposeError::asset(format!("'{}': {e}", path.display())))
}

/// Decode every frame of an animation in display order.
///
/// GIFs yield one entry per frame with their own delays; anything else is treated as a single
/// still frame.
pub fn decode_frames(bytes: &[u8]) -> ComposeResult<Vec<SourceFrame>> {
    let format = image::guess_format(bytes).context("guess image format")?;
    if format != ImageFormat::Gif {
        return Ok(vec![SourceFrame {
            image: decode_image(bytes)?,
            delay_ms: DEFAULT_FRAME_DELAY_MS,
        }]);
    }

    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .context("open gif decoder")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("decode gif frames")?;
    if frames.is_empty() {
        return Err(ComposeError::asset("animation has no frames"));
    }

    Ok(frames
        .into_iter()
        .map(|frame| {
            let (num, den) = frame.delay().numer_denom_ms();
            SourceFrame {
                delay_ms: if den == 0 { 0 } else { num / den },
                image: frame.into_buffer(),
            }
        })
        .collect())
}

/// Read and decode an animation (or still image) from disk.
pub fn load_frames(path: &Path) -> ComposeResult<Vec<SourceFrame>> {
    let bytes = read_asset(path)?;
    decode_frames(&bytes).map_err(|e| ComposeError::asset(format!("'{}': {e}", path.display())))
}

pub(crate) fn read_asset(path: &Path) -> ComposeResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read asset bytes from '{}'", path.display()))
        .map_err(ComposeError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
