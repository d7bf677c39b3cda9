use std::{path::Path, sync::Arc};

use crate::{
    assets::{color::Rgba8, decode::read_asset},
    foundation::error::{ComposeError, ComposeResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A shaped single-line text block plus the metrics needed to anchor it.
#[derive(Clone)]
pub struct TextBlock {
    pub layout: Arc<parley::Layout<TextBrushRgba8>>,
    /// Sum of glyph advances in pixels (the "rendered width").
    pub width: f32,
    /// Distance from the layout top to the first baseline.
    pub baseline: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("width", &self.width)
            .field("baseline", &self.baseline)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish()
    }
}

impl TextBlock {
    pub fn is_empty(&self) -> bool {
        self.layout.lines().next().is_none() || self.width <= 0.0
    }
}

/// Strip characters that have no glyph representation (control codes) so measuring and drawing
/// agree on the same string.
pub fn normalize_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Stateful helper that shapes text with one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Arc<Vec<u8>>,
}

impl TextLayoutEngine {
    /// Register the font at `path` and build fresh Parley contexts around it.
    pub fn from_path(path: &Path) -> ComposeResult<Self> {
        let bytes = read_asset(path)?;
        Self::from_font_bytes(bytes)
            .map_err(|e| ComposeError::text(format!("font '{}': {e}", path.display())))
    }

    pub fn from_font_bytes(font_bytes: Vec<u8>) -> ComposeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ComposeError::text("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ComposeError::text("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes: Arc::new(font_bytes),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font handle for the CPU rasterizer.
    pub fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.font_bytes.as_ref().clone()),
            0,
        )
    }

    /// Shape `text` on a single unbounded line.
    pub fn layout(&mut self, text: &str, size_px: f32, color: Rgba8) -> ComposeResult<TextBlock> {
        self.layout_spans(&[(text, color)], size_px)
    }

    /// Shape consecutive differently-colored runs as one line, so each run starts where the
    /// previous one's advance ends.
    pub fn layout_spans(&mut self, spans: &[(&str, Rgba8)], size_px: f32) -> ComposeResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ComposeError::text(format!(
                "font size must be finite and > 0 (got {size_px})"
            )));
        }

        let mut text = String::new();
        let mut ranges = Vec::with_capacity(spans.len());
        for (part, color) in spans {
            let start = text.len();
            text.push_str(&normalize_text(part));
            ranges.push((start..text.len(), *color));
        }
        let default_color = spans.first().map(|(_, c)| *c).unwrap_or(Rgba8::TRANSPARENT);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            default_color,
        )));
        for (range, color) in ranges.into_iter().skip(1) {
            if !range.is_empty() {
                builder.push(
                    parley::style::StyleProperty::Brush(TextBrushRgba8::from(color)),
                    range,
                );
            }
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&text);
        layout.break_all_lines(None);

        // An empty line still reports a phantom advance.
        let mut width = 0.0f32;
        let mut first = None;
        for line in layout.lines() {
            let m = line.metrics();
            if !text.is_empty() {
                width = width.max(m.advance);
            }
            if first.is_none() {
                first = Some((m.baseline, m.ascent, m.descent));
            }
        }
        let (baseline, ascent, descent) = first.unwrap_or((0.0, 0.0, 0.0));

        Ok(TextBlock {
            layout: Arc::new(layout),
            width,
            baseline,
            ascent,
            descent,
        })
    }

    /// Rendered width of `text` in pixels.
    pub fn measure(&mut self, text: &str, size_px: f32) -> ComposeResult<f32> {
        Ok(self.layout(text, size_px, Rgba8::TRANSPARENT)?.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
