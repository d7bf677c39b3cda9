//! Compositors: each variant resolves a typed job from its configuration, prepares its assets
//! once, and hands a [`plan::FramePlan`] to the shared render loop.

/// Badge/boar announcement compositors (third- and half-scale).
pub mod announce;
/// Base-image compositor.
pub mod base;
/// Collection-card compositor.
pub mod collection;
/// Nameplate and score-badge user overlays.
pub mod overlay;
/// Frame plans: canvas source, layer operations, downscale and delay policy.
pub mod plan;
/// One-time asset preparation (avatars, nameplates, stencil fills).
pub mod prepare;

use std::path::Path;

use crate::{
    assets::decode::load_frames,
    encode::gif::GifSink,
    foundation::error::ComposeResult,
};

use plan::FramePlan;

/// Run `plan` over every frame of the animation at `input` and encode the result as a GIF.
#[tracing::instrument(skip(plan), fields(input = %input.display()))]
pub fn render_gif(plan: &FramePlan, input: &Path) -> ComposeResult<Vec<u8>> {
    let frames = load_frames(input)?;
    tracing::info!(frames = frames.len(), "compositing");
    let mut sink = GifSink::new();
    plan.render_into(&frames, &mut sink)?;
    sink.into_bytes()
}

/// Loose boolean flag (`true`, `1`, `yes`, case-insensitive).
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/compose/mod.rs"]
mod tests;
