use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::UnknownPieceType;

use super::{position::Position, transform::validated_apply};

/// Enum representing the type of piece.
///
/// Discriminants are the 1-based indices stored in board cells, so the
/// renderer can recover the color of a locked block from the cell alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 1,
    O = 2,
    L = 3,
    S = 4,
    T = 5,
    J = 6,
    Z = 7,
}

/// Uniform selection over the 7 piece types.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(1..=7) {
            1 => PieceKind::I,
            2 => PieceKind::O,
            3 => PieceKind::L,
            4 => PieceKind::S,
            5 => PieceKind::T,
            6 => PieceKind::J,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::J,
        PieceKind::Z,
    ];

    /// Returns the 1-based cell index of this kind.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Parses a piece kind from its cell index (1..=7).
    pub const fn from_index(index: u8) -> Result<Self, UnknownPieceType> {
        match index {
            1 => Ok(PieceKind::I),
            2 => Ok(PieceKind::O),
            3 => Ok(PieceKind::L),
            4 => Ok(PieceKind::S),
            5 => Ok(PieceKind::T),
            6 => Ok(PieceKind::J),
            7 => Ok(PieceKind::Z),
            _ => Err(UnknownPieceType { index }),
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::J => 'J',
            PieceKind::Z => 'Z',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'L' => Some(PieceKind::L),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'J' => Some(PieceKind::J),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Returns the canonical render color of this kind.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb::CYAN,
            PieceKind::O => Rgb::YELLOW,
            PieceKind::L => Rgb::ORANGE,
            PieceKind::S => Rgb::GREEN,
            PieceKind::T => Rgb::PURPLE,
            PieceKind::J => Rgb::BLUE,
            PieceKind::Z => Rgb::RED,
        }
    }

    /// Returns the canonical block offsets of this kind.
    ///
    /// Offsets are relative to the reference block at the origin, which is
    /// always included and doubles as the default rotation pivot.
    #[must_use]
    pub const fn block_offsets(self) -> [Position; 4] {
        const fn p(x: i32, y: i32) -> Position {
            Position::new(x, y)
        }
        match self {
            PieceKind::I => [p(0, 0), p(-1, 0), p(1, 0), p(2, 0)],
            PieceKind::O => [p(0, 0), p(0, -1), p(1, -1), p(1, 0)],
            PieceKind::L => [p(0, 0), p(-1, 0), p(1, 0), p(1, -1)],
            PieceKind::S => [p(0, 0), p(-1, 0), p(0, -1), p(1, -1)],
            PieceKind::T => [p(0, 0), p(0, -1), p(-1, 0), p(1, 0)],
            PieceKind::J => [p(0, 0), p(-1, -1), p(-1, 0), p(1, 0)],
            PieceKind::Z => [p(0, 0), p(0, -1), p(-1, -1), p(1, 0)],
        }
    }
}

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const CYAN: Self = Self(43, 172, 226);
    pub const YELLOW: Self = Self(253, 225, 2);
    pub const ORANGE: Self = Self(247, 150, 34);
    pub const GREEN: Self = Self(77, 184, 72);
    pub const PURPLE: Self = Self(146, 44, 140);
    pub const BLUE: Self = Self(0, 90, 156);
    pub const RED: Self = Self(238, 40, 51);
}

/// A tetromino: four blocks expressed as offsets from a reference block.
///
/// The offsets stay board-position-agnostic until the piece is placed; the
/// caller tracks the board anchor separately and combines the two in its
/// validators. Pieces behave as immutable values: every transforming
/// operation goes through
/// [`validated_apply`](super::transform::validated_apply) and returns a new
/// piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pytromino {
    pub(crate) blocks: ArrayVec<Position, 4>,
    pub(crate) pivot: Position,
    pub(crate) color: Rgb,
    pub(crate) kind: PieceKind,
    pub(crate) placed: bool,
}

impl Pytromino {
    /// Creates a piece of the given kind from the canonical shape table.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            blocks: kind.block_offsets().into_iter().collect(),
            pivot: Position::ORIGIN,
            color: kind.color(),
            kind,
            placed: false,
        }
    }

    /// Creates a piece from a cell index (1..=7).
    pub fn from_index(index: u8) -> Result<Self, UnknownPieceType> {
        PieceKind::from_index(index).map(Self::new)
    }

    #[must_use]
    pub fn blocks(&self) -> &[Position] {
        &self.blocks
    }

    #[must_use]
    pub fn pivot(&self) -> Position {
        self.pivot
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn index(&self) -> u8 {
        self.kind.index()
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Translates the piece to board coordinates at `anchor`.
    ///
    /// One-shot: the first call marks the piece as placed, any later call
    /// returns an unchanged copy instead of translating again.
    #[must_use]
    pub fn place_at(&self, anchor: Position) -> Self {
        if self.placed {
            return self.clone();
        }
        let mut placed = validated_apply(self, |pos| pos.add(anchor), false, |_| true);
        placed.placed = true;
        placed
    }

    /// Returns the block offsets satisfying `predicate`, in original order.
    pub fn filter_blocks(&self, predicate: impl Fn(Position) -> bool) -> Vec<Position> {
        self.blocks.iter().copied().filter(|&p| predicate(p)).collect()
    }

    /// Returns the distinct rows spanned by the blocks, in ascending order.
    #[must_use]
    pub fn unique_rows(&self) -> Vec<i32> {
        let mut rows: Vec<i32> = self.blocks.iter().map(|p| p.y).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}
