//! Pure coordinate transforms and the all-or-nothing validated apply.
//!
//! Movement, rotation, and drops all share one primitive: build a transform
//! closure and a validator closure, then call [`validated_apply`]. The only
//! thing that varies between "move left", "soft drop", or "rotate" is which
//! pair of closures the caller supplies, so collision rules live entirely in
//! the validator and never leak into the geometry.

use super::{piece::Pytromino, position::Position};

/// Rotates `pos` 90 degrees clockwise about `pivot`.
#[must_use]
pub const fn rotate_cw(pivot: Position, pos: Position) -> Position {
    Position::new(pivot.y - pos.y + pivot.x, pos.x - pivot.x + pivot.y)
}

/// Rotates `pos` 90 degrees counterclockwise about `pivot`.
///
/// Three clockwise rotations rather than the closed form.
#[must_use]
pub const fn rotate_ccw(pivot: Position, pos: Position) -> Position {
    rotate_cw(pivot, rotate_cw(pivot, rotate_cw(pivot, pos)))
}

/// Applies `transform` to every block offset of `piece`, committing the batch
/// only if `validator` accepts every resulting coordinate.
///
/// When `is_rotation` is set, the pivot offset is validated untransformed:
/// the pivot does not move under rotation, but the cell it sits on still has
/// to be valid. Under non-rotation transforms the pivot offset is validated
/// and transformed like any other block. The asymmetry is deliberate; the
/// `pivot` attribute itself is never altered either way.
///
/// The input piece is never mutated. On success the returned piece carries
/// the transformed offsets; on any validator failure it is a value-equal copy
/// of the input, so rejection is ordinary control flow rather than an error.
pub fn validated_apply<F, V>(
    piece: &Pytromino,
    transform: F,
    is_rotation: bool,
    validator: V,
) -> Pytromino
where
    F: Fn(Position) -> Position,
    V: Fn(Position) -> bool,
{
    let all_valid = piece.blocks().iter().all(|&pos| {
        if is_rotation && pos == piece.pivot() {
            validator(pos)
        } else {
            validator(transform(pos))
        }
    });
    let mut next = piece.clone();
    if all_valid {
        next.blocks = piece.blocks().iter().map(|&pos| transform(pos)).collect();
    }
    next
}
