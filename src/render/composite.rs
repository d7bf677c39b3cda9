//! Pixel-level layer operations on straight-alpha RGBA8 canvases.
//!
//! Image pastes use "paste with mask" semantics: every channel, alpha included, is linearly
//! interpolated between canvas and source by the mask value. Text and badge sprites are
//! premultiplied and go through [`over`].

use image::{RgbaImage, imageops::FilterType};

use crate::{
    assets::color::Rgba8,
    foundation::core::{Pos, Size},
    foundation::error::{ComposeError, ComposeResult},
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Resize to exactly `size` (bicubic, like the template tooling the assets were drawn for).
pub fn resize(img: &RgbaImage, size: Size) -> ComposeResult<RgbaImage> {
    if size.is_empty() {
        return Err(ComposeError::asset(format!(
            "cannot resize to empty size {}x{}",
            size.width, size.height
        )));
    }
    if img.dimensions() == (size.width, size.height) {
        return Ok(img.clone());
    }
    Ok(image::imageops::resize(
        img,
        size.width,
        size.height,
        FilterType::CatmullRom,
    ))
}

/// Flat `color` canvas whose alpha channel is replaced by the stencil's alpha.
///
/// The color's own alpha is discarded: the stencil alone decides coverage.
pub fn stencil_fill(color: Rgba8, stencil: &RgbaImage) -> RgbaImage {
    let (w, h) = stencil.dimensions();
    let mut out = RgbaImage::new(w, h);
    for (dst, src) in out.pixels_mut().zip(stencil.pixels()) {
        dst.0 = [color.r, color.g, color.b, src[3]];
    }
    out
}

/// Replace `img`'s alpha with `alpha(img) * alpha(mask) / 255`.
///
/// The result never exceeds either input alpha, so pre-existing transparency survives.
pub fn intersect_alpha(img: &mut RgbaImage, mask: &RgbaImage) -> ComposeResult<()> {
    if img.dimensions() != mask.dimensions() {
        return Err(ComposeError::asset(format!(
            "alpha mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            img.width(),
            img.height()
        )));
    }
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px[3] = mul_div255(u16::from(px[3]), u16::from(m[3]));
    }
    Ok(())
}

/// Copy `src` onto `dst` at `at` verbatim (no mask), clipped to the canvas.
pub fn paste(dst: &mut RgbaImage, src: &RgbaImage, at: Pos) {
    for_each_overlap(dst, src, at, |d, s, _, _| *d = *s);
}

/// Paste `src` at `at`, interpolating every channel by `mask`'s alpha.
///
/// `mask` must have the same dimensions as `src`; it is sampled at the source coordinates.
pub fn paste_masked(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    at: Pos,
    mask: &RgbaImage,
) -> ComposeResult<()> {
    if src.dimensions() != mask.dimensions() {
        return Err(ComposeError::asset(format!(
            "paste mask is {}x{} but source is {}x{}",
            mask.width(),
            mask.height(),
            src.width(),
            src.height()
        )));
    }
    for_each_overlap(dst, src, at, |d, s, sx, sy| {
        let m = u16::from(mask.get_pixel(sx, sy)[3]);
        if m == 0 {
            return;
        }
        if m == 255 {
            *d = *s;
            return;
        }
        let inv = 255 - m;
        for i in 0..4 {
            d[i] = mul_div255(u16::from(s[i]), m).saturating_add(mul_div255(u16::from(d[i]), inv));
        }
    });
    Ok(())
}

/// Composite a premultiplied sprite over a straight-alpha canvas.
pub fn over_premul(dst: &mut RgbaImage, src_premul: &[u8], src_size: Size, at: Pos) -> ComposeResult<()> {
    let expected = src_size.width as usize * src_size.height as usize * 4;
    if src_premul.len() != expected {
        return Err(ComposeError::asset(
            "sprite byte length does not match its dimensions",
        ));
    }
    let (dw, dh) = dst.dimensions();
    for sy in 0..src_size.height {
        let dy = at.y + i64::from(sy);
        if dy < 0 || dy >= i64::from(dh) {
            continue;
        }
        for sx in 0..src_size.width {
            let dx = at.x + i64::from(sx);
            if dx < 0 || dx >= i64::from(dw) {
                continue;
            }
            let i = (sy as usize * src_size.width as usize + sx as usize) * 4;
            let s = [
                src_premul[i],
                src_premul[i + 1],
                src_premul[i + 2],
                src_premul[i + 3],
            ];
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = unpremultiply(over(premultiply(d.0), s));
        }
    }
    Ok(())
}

fn for_each_overlap(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    at: Pos,
    mut f: impl FnMut(&mut image::Rgba<u8>, &image::Rgba<u8>, u32, u32),
) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = at.x.max(0);
    let y0 = at.y.max(0);
    let x1 = (at.x + sw).min(dw);
    let y1 = (at.y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let sx = (dx - at.x) as u32;
            let sy = (dy - at.y) as u32;
            let s = *src.get_pixel(sx, sy);
            f(dst.get_pixel_mut(dx as u32, dy as u32), &s, sx, sy);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
