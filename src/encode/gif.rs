use anyhow::Context;
use base64::Engine as _;
use image::{
    Delay, Frame,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    encode::sink::{FrameSink, OutputFrame, SinkConfig},
    foundation::error::{ComposeError, ComposeResult},
};

/// Collects frames and encodes them as one infinitely looping GIF on `end`.
///
/// Every frame is written with restore-to-background disposal, so transparent regions never show
/// the previous frame through.
#[derive(Default)]
pub struct GifSink {
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
    bytes: Option<Vec<u8>>,
}

impl GifSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded GIF bytes; only available after `end`.
    pub fn into_bytes(self) -> ComposeResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| ComposeError::encode("gif sink was not finished"))
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> ComposeResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ComposeError::encode(format!(
                "gif dimensions must be non-zero (got {}x{})",
                cfg.width, cfg.height
            )));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(ComposeError::encode(format!(
                "gif dimensions exceed 65535 (got {}x{})",
                cfg.width, cfg.height
            )));
        }
        self.cfg = Some(cfg);
        self.frames = Vec::with_capacity(cfg.frame_count);
        self.bytes = None;
        Ok(())
    }

    fn push_frame(&mut self, _idx: usize, frame: &OutputFrame) -> ComposeResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ComposeError::encode("push_frame called before begin"))?;
        if frame.image.dimensions() != (cfg.width, cfg.height) {
            return Err(ComposeError::encode(format!(
                "frame is {}x{} but the gif is {}x{}",
                frame.image.width(),
                frame.image.height(),
                cfg.width,
                cfg.height
            )));
        }
        self.frames.push(Frame::from_parts(
            frame.image.clone(),
            0,
            0,
            Delay::from_numer_denom_ms(frame.delay_ms, 1),
        ));
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(frames = self.frames.len()))]
    fn end(&mut self) -> ComposeResult<()> {
        if self.frames.is_empty() {
            return Err(ComposeError::encode("cannot encode a gif with no frames"));
        }
        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            encoder
                .set_repeat(Repeat::Infinite)
                .context("set gif loop count")?;
            encoder
                .encode_frames(std::mem::take(&mut self.frames))
                .map_err(|e| ComposeError::encode(format!("gif encoding failed: {e}")))?;
        }
        tracing::debug!(bytes = out.len(), "encoded gif");
        self.bytes = Some(out);
        Ok(())
    }
}

/// Encode `frames` as an infinitely looping GIF.
pub fn encode_gif(frames: &[OutputFrame]) -> ComposeResult<Vec<u8>> {
    let first = frames
        .first()
        .ok_or_else(|| ComposeError::encode("cannot encode a gif with no frames"))?;
    let mut sink = GifSink::new();
    sink.begin(SinkConfig {
        width: first.image.width(),
        height: first.image.height(),
        frame_count: frames.len(),
    })?;
    for (i, f) in frames.iter().enumerate() {
        sink.push_frame(i, f)?;
    }
    sink.end()?;
    sink.into_bytes()
}

/// Standard (padded) base64 on a single line.
pub fn to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
