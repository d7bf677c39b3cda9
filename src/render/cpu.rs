//! CPU rasterization of vector marks (text runs, rounded boxes, circles) into premultiplied
//! sprites.
//!
//! Marks never change between frames, so each group is rasterized once with `vello_cpu` and the
//! resulting [`Sprite`] is composited per frame with [`over_premul`].

use crate::{
    assets::{color::Rgba8, font::TextBlock},
    foundation::core::{Pos, Size},
    foundation::error::{ComposeError, ComposeResult},
    render::composite::over_premul,
};

/// Horizontal extra around text bounds, as a fraction of the line height. Glyph outlines may
/// overhang their advance box (italics, swashes).
const TEXT_OVERHANG: f64 = 0.25;
const SPRITE_PADDING: f64 = 2.0;

/// Premultiplied RGBA8 pixels placed at `origin` on the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub origin: Pos,
    pub size: Size,
    pub rgba8_premul: Vec<u8>,
}

impl Sprite {
    pub fn empty() -> Self {
        Self {
            origin: Pos::ORIGIN,
            size: Size::default(),
            rgba8_premul: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Canvas-space bounds as `(x0, y0, x1, y1)`, end-exclusive.
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        (
            self.origin.x,
            self.origin.y,
            self.origin.x + i64::from(self.size.width),
            self.origin.y + i64::from(self.size.height),
        )
    }

    pub fn draw_onto(&self, canvas: &mut image::RgbaImage) -> ComposeResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        over_premul(canvas, &self.rgba8_premul, self.size, self.origin)
    }
}

/// Where a text anchor point sits relative to the shaped line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Horizontally centred on x, baseline on y.
    MiddleBaseline,
    /// Left edge on x, baseline on y.
    LeftBaseline,
}

/// A vector primitive in canvas coordinates.
#[derive(Clone, Debug)]
pub enum Mark {
    RoundedRect {
        rect: kurbo::Rect,
        radius: f64,
        color: Rgba8,
    },
    Circle {
        center: kurbo::Point,
        radius: f64,
        color: Rgba8,
    },
    Text {
        block: TextBlock,
        /// Left edge of the line.
        x: f64,
        baseline_y: f64,
    },
}

impl Mark {
    pub fn text(block: TextBlock, at: Pos, anchor: Anchor) -> Self {
        let x = match anchor {
            Anchor::MiddleBaseline => at.x as f64 - f64::from(block.width) / 2.0,
            Anchor::LeftBaseline => at.x as f64,
        };
        Mark::Text {
            block,
            x,
            baseline_y: at.y as f64,
        }
    }

    fn bounds(&self) -> Option<kurbo::Rect> {
        match self {
            Mark::RoundedRect { rect, .. } => (rect.area() > 0.0).then_some(*rect),
            Mark::Circle { center, radius, .. } => (*radius > 0.0).then(|| {
                kurbo::Rect::new(
                    center.x - radius,
                    center.y - radius,
                    center.x + radius,
                    center.y + radius,
                )
            }),
            Mark::Text {
                block,
                x,
                baseline_y,
            } => {
                if block.is_empty() {
                    return None;
                }
                let ascent = f64::from(block.ascent);
                let descent = f64::from(block.descent);
                let overhang = (ascent + descent) * TEXT_OVERHANG;
                Some(kurbo::Rect::new(
                    x - overhang,
                    baseline_y - ascent,
                    x + f64::from(block.width) + overhang,
                    baseline_y + descent,
                ))
            }
        }
    }
}

fn union_bounds(marks: &[Mark]) -> Option<kurbo::Rect> {
    marks
        .iter()
        .filter_map(Mark::bounds)
        .reduce(|a, b| a.union(b))
}

/// Rasterize `marks` (painted in order) into one tight sprite.
///
/// `font` is required only when a non-empty text mark is present.
#[tracing::instrument(skip_all, fields(marks = marks.len()))]
pub fn rasterize_marks(
    marks: &[Mark],
    font: Option<&vello_cpu::peniko::FontData>,
) -> ComposeResult<Sprite> {
    let Some(bounds) = union_bounds(marks) else {
        return Ok(Sprite::empty());
    };

    let x0 = (bounds.x0 - SPRITE_PADDING).floor();
    let y0 = (bounds.y0 - SPRITE_PADDING).floor();
    let x1 = (bounds.x1 + SPRITE_PADDING).ceil();
    let y1 = (bounds.y1 + SPRITE_PADDING).ceil();
    let width: u16 = ((x1 - x0) as u32)
        .try_into()
        .map_err(|_| ComposeError::text("sprite width exceeds u16"))?;
    let height: u16 = ((y1 - y0) as u32)
        .try_into()
        .map_err(|_| ComposeError::text("sprite height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for mark in marks {
        draw_mark(&mut ctx, mark, (x0, y0), font)?;
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(Sprite {
        origin: Pos::new(x0 as i64, y0 as i64),
        size: Size::new(u32::from(width), u32::from(height)),
        rgba8_premul: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn draw_mark(
    ctx: &mut vello_cpu::RenderContext,
    mark: &Mark,
    (ox, oy): (f64, f64),
    font: Option<&vello_cpu::peniko::FontData>,
) -> ComposeResult<()> {
    match mark {
        Mark::RoundedRect {
            rect,
            radius,
            color,
        } => {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((-ox, -oy)));
            ctx.set_paint(color.to_cpu_color());
            let rr = kurbo::RoundedRect::from_rect(*rect, *radius);
            ctx.fill_path(&shape_to_cpu(&rr));
        }
        Mark::Circle {
            center,
            radius,
            color,
        } => {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((-ox, -oy)));
            ctx.set_paint(color.to_cpu_color());
            ctx.fill_path(&shape_to_cpu(&kurbo::Circle::new(*center, *radius)));
        }
        Mark::Text {
            block,
            x,
            baseline_y,
        } => {
            if block.is_empty() {
                return Ok(());
            }
            let font =
                font.ok_or_else(|| ComposeError::text("text mark drawn without a font"))?;
            let top = baseline_y - f64::from(block.baseline);
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((x - ox, top - oy)));

            for line in block.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
    }
    Ok(())
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        p.push(el);
    }
    p
}

/// Straight-alpha circle stencil filling a `diameter` square.
pub fn circle_mask(diameter: u32) -> ComposeResult<image::RgbaImage> {
    let side = Size::square(diameter).non_empty("circle mask diameter")?;
    let r = f64::from(diameter) / 2.0;
    let sprite = rasterize_marks(
        &[Mark::Circle {
            center: kurbo::Point::new(r, r),
            radius: r,
            color: Rgba8::rgb(255, 255, 255),
        }],
        None,
    )?;
    let mut out = image::RgbaImage::new(side.width, side.height);
    sprite.draw_onto(&mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
