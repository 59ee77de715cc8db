pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },
    #[display("grid has {actual} cells, board needs {expected}")]
    InvalidDimensions { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown piece type index: {index}")]
pub struct UnknownPieceType {
    pub index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("holder is closed")]
pub struct HolderClosed;
