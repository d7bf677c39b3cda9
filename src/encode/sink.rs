use image::RgbaImage;

use crate::foundation::error::ComposeResult;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
}

/// One finished output frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFrame {
    /// Straight-alpha RGBA8 pixels.
    pub image: RgbaImage,
    pub delay_ms: u32,
}

/// Sink contract for consuming composited frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0, one
/// call per input frame.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ComposeResult<()>;
    /// Push one frame in source order.
    fn push_frame(&mut self, idx: usize, frame: &OutputFrame) -> ComposeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ComposeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    pub(crate) frames: Vec<(usize, OutputFrame)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, OutputFrame)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ComposeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &OutputFrame) -> ComposeResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ComposeResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
