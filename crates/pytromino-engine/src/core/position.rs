use serde::{Deserialize, Serialize};

/// A board coordinate or a block offset relative to a piece's reference block.
///
/// Row 0 is the bottom-most row in game semantics, so shifting "down"
/// decreases `y`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub const fn scaled(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Shifts the position down by `steps`. Negative steps shift up.
    #[must_use]
    pub const fn shifted_down(self, steps: i32) -> Self {
        Self::new(self.x, self.y - steps)
    }

    /// Shifts the position left by `steps`. Negative steps shift right.
    #[must_use]
    pub const fn shifted_left(self, steps: i32) -> Self {
        Self::new(self.x - steps, self.y)
    }
}
