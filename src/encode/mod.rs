//! Encoding sinks.
//!
//! Sinks consume composited frames in order; [`gif::GifSink`] turns them into the final payload.

/// Animated GIF sink and base64 payload helpers.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
