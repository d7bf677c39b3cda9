//! Pixel compositing and vector rasterization.

/// Straight-alpha paste, mask and resize operations.
pub mod composite;
/// `vello_cpu` sprites for text and shapes.
pub mod cpu;
