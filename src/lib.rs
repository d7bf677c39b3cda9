//! Animated image compositors for the boar bot.
//!
//! Each compositor takes an input animation (or still), layers prepared assets, avatars and text
//! onto every frame through a [`FramePlan`], and encodes the result as an infinitely looping GIF
//! with restore-to-background disposal. The binary prints that GIF as one base64 line.
//!
//! - Resolve a job from JSON configuration ([`config`])
//! - Build its plan once ([`compose`])
//! - Stream frames into a [`FrameSink`] such as [`GifSink`]
//!
//! [`verify`] runs the `config.json` integrity checks.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod render;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use crate::assets::color::Rgba8;
pub use crate::assets::decode::SourceFrame;
pub use crate::compose::plan::{CanvasSource, DelayPolicy, FramePlan, LayerOp, Mask};
pub use crate::encode::gif::{GifSink, encode_gif, to_base64};
pub use crate::encode::sink::{FrameSink, InMemorySink, OutputFrame, SinkConfig};
pub use crate::foundation::core::{Pos, Size};
pub use crate::foundation::error::{ComposeError, ComposeResult};
pub use crate::render::cpu::Sprite;
