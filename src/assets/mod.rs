//! Asset loading: colors, decoded frames, fetched avatars and fonts.

pub mod color;
pub mod decode;
pub mod fetch;
pub mod font;
