use std::sync::Arc;

use image::RgbaImage;

use crate::{
    assets::decode::SourceFrame,
    encode::sink::{FrameSink, OutputFrame, SinkConfig},
    foundation::core::{Pos, Size},
    foundation::error::{ComposeError, ComposeResult},
    render::{
        composite::{paste, paste_masked, resize},
        cpu::Sprite,
    },
};

/// Where each frame's canvas starts from.
#[derive(Clone, Debug)]
pub enum CanvasSource {
    /// A prepared template copied fresh for every frame.
    Template(Arc<RgbaImage>),
    /// The input frame itself, resized to `size`.
    Frame { size: Size },
}

/// Mask used for a [`LayerOp::Paste`].
#[derive(Clone, Debug)]
pub enum Mask {
    /// The pasted image's own alpha.
    Own,
    /// Another image's alpha; must match the pasted image's dimensions.
    Alpha(Arc<RgbaImage>),
}

/// One compositing step, applied in order to every frame.
#[derive(Clone, Debug)]
pub enum LayerOp {
    /// The current input frame resized to `size`, pasted opaque at `at`.
    Content { size: Size, at: Pos },
    /// A prepared image pasted with a mask.
    Paste {
        image: Arc<RgbaImage>,
        at: Pos,
        mask: Mask,
    },
    /// A pre-rasterized text or badge layer.
    Sprite(Arc<Sprite>),
}

/// Per-frame delay of the output animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayPolicy {
    Fixed(u32),
    /// Inherit each source frame's own delay.
    Source,
}

/// Immutable recipe that turns N input frames into N composited output frames.
///
/// Every asset the plan references is shared read-only; each frame renders into its own fresh
/// canvas.
#[derive(Clone, Debug)]
pub struct FramePlan {
    canvas: CanvasSource,
    ops: Vec<LayerOp>,
    downscale: Option<u32>,
    delay: DelayPolicy,
}

/// Builder for [`FramePlan`]. Operations apply in insertion order.
#[derive(Clone, Debug)]
pub struct FramePlanBuilder {
    canvas: CanvasSource,
    ops: Vec<LayerOp>,
    downscale: Option<u32>,
    delay: DelayPolicy,
}

impl FramePlanBuilder {
    pub fn content(mut self, size: Size, at: Pos) -> Self {
        self.ops.push(LayerOp::Content { size, at });
        self
    }

    pub fn paste(mut self, image: Arc<RgbaImage>, at: Pos) -> Self {
        self.ops.push(LayerOp::Paste {
            image,
            at,
            mask: Mask::Own,
        });
        self
    }

    pub fn paste_with_mask(mut self, image: Arc<RgbaImage>, at: Pos, mask: Arc<RgbaImage>) -> Self {
        self.ops.push(LayerOp::Paste {
            image,
            at,
            mask: Mask::Alpha(mask),
        });
        self
    }

    /// Empty sprites are dropped.
    pub fn sprite(mut self, sprite: Sprite) -> Self {
        if !sprite.is_empty() {
            self.ops.push(LayerOp::Sprite(Arc::new(sprite)));
        }
        self
    }

    /// Shrink every finished frame by an integer factor (floor division of dimensions).
    pub fn downscale(mut self, divisor: u32) -> Self {
        self.downscale = Some(divisor);
        self
    }

    pub fn delay(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    pub fn build(self) -> ComposeResult<FramePlan> {
        let canvas_size = match &self.canvas {
            CanvasSource::Template(t) => Size::new(t.width(), t.height()),
            CanvasSource::Frame { size } => *size,
        };
        canvas_size.non_empty("canvas size")?;

        if let Some(d) = self.downscale {
            if d == 0 {
                return Err(ComposeError::config("downscale divisor must be > 0"));
            }
            canvas_size.divided(d).non_empty("downscaled canvas size")?;
        }

        for op in &self.ops {
            match op {
                LayerOp::Content { size, .. } => {
                    size.non_empty("content size")?;
                }
                LayerOp::Paste {
                    image,
                    mask: Mask::Alpha(mask),
                    ..
                } if image.dimensions() != mask.dimensions() => {
                    return Err(ComposeError::asset(format!(
                        "paste mask is {}x{} but image is {}x{}",
                        mask.width(),
                        mask.height(),
                        image.width(),
                        image.height()
                    )));
                }
                _ => {}
            }
        }

        Ok(FramePlan {
            canvas: self.canvas,
            ops: self.ops,
            downscale: self.downscale,
            delay: self.delay,
        })
    }
}

impl FramePlan {
    pub fn builder(canvas: CanvasSource) -> FramePlanBuilder {
        FramePlanBuilder {
            canvas,
            ops: Vec::new(),
            downscale: None,
            delay: DelayPolicy::Source,
        }
    }

    pub fn ops(&self) -> &[LayerOp] {
        &self.ops
    }

    pub fn canvas_size(&self) -> Size {
        match &self.canvas {
            CanvasSource::Template(t) => Size::new(t.width(), t.height()),
            CanvasSource::Frame { size } => *size,
        }
    }

    /// Size of every emitted frame.
    pub fn output_size(&self) -> Size {
        match self.downscale {
            Some(d) => self.canvas_size().divided(d),
            None => self.canvas_size(),
        }
    }

    /// Composite one input frame.
    pub fn render_frame(&self, frame: &SourceFrame) -> ComposeResult<OutputFrame> {
        let mut canvas = match &self.canvas {
            CanvasSource::Template(t) => t.as_ref().clone(),
            CanvasSource::Frame { size } => resize(&frame.image, *size)?,
        };

        for op in &self.ops {
            match op {
                LayerOp::Content { size, at } => {
                    let content = resize(&frame.image, *size)?;
                    paste(&mut canvas, &content, *at);
                }
                LayerOp::Paste { image, at, mask } => {
                    let mask = match mask {
                        Mask::Own => image.as_ref(),
                        Mask::Alpha(m) => m.as_ref(),
                    };
                    paste_masked(&mut canvas, image, *at, mask)?;
                }
                LayerOp::Sprite(sprite) => sprite.draw_onto(&mut canvas)?,
            }
        }

        let image = match self.downscale {
            Some(d) => resize(&canvas, self.canvas_size().divided(d))?,
            None => canvas,
        };
        let delay_ms = match self.delay {
            DelayPolicy::Fixed(ms) => ms,
            DelayPolicy::Source => frame.delay_ms,
        };
        Ok(OutputFrame { image, delay_ms })
    }

    /// Composite every frame in order into `sink`.
    #[tracing::instrument(skip_all, fields(frames = frames.len(), ops = self.ops.len()))]
    pub fn render_into(&self, frames: &[SourceFrame], sink: &mut dyn FrameSink) -> ComposeResult<()> {
        if frames.is_empty() {
            return Err(ComposeError::asset("input animation has no frames"));
        }
        let out = self.output_size();
        sink.begin(SinkConfig {
            width: out.width,
            height: out.height,
            frame_count: frames.len(),
        })?;
        for (idx, frame) in frames.iter().enumerate() {
            let rendered = self.render_frame(frame)?;
            sink.push_frame(idx, &rendered)?;
        }
        tracing::debug!(width = out.width, height = out.height, "rendered frames");
        sink.end()
    }

    pub fn render_all(&self, frames: &[SourceFrame]) -> ComposeResult<Vec<OutputFrame>> {
        frames.iter().map(|f| self.render_frame(f)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
