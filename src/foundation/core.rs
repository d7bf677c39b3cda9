use crate::foundation::error::{ComposeError, ComposeResult};

/// Pixel offset on a canvas. Negative values are allowed; pastes are clipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "[i64; 2]")]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Floor-halve both coordinates.
    pub fn halved(self) -> Self {
        Self {
            x: self.x.div_euclid(2),
            y: self.y.div_euclid(2),
        }
    }
}

impl From<[i64; 2]> for Pos {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "[u32; 2]")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Floor-halve both dimensions.
    pub fn halved(self) -> Self {
        self.divided(2)
    }

    /// Integer downscale by `divisor` (floor division, matching the frame downscale step).
    pub fn divided(self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        Self {
            width: self.width / divisor,
            height: self.height / divisor,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reject zero-area sizes; `what` names the offending layout key.
    pub fn non_empty(self, what: &str) -> ComposeResult<Self> {
        if self.is_empty() {
            return Err(ComposeError::config(format!(
                "{what} must have non-zero width and height (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(self)
    }
}

impl From<[u32; 2]> for Size {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
