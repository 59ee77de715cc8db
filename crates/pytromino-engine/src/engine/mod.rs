//! Game-loop layer on top of the core data model.
//!
//! - [`GameField`] - board, falling piece, anchor, piece queue, and hold slot
//! - [`GameStats`] - score and line-clear bookkeeping
//! - [`PieceQueue`] - random piece source with a one-piece preview
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! The field owns all mutable game state and drives every move through
//! [`validated_apply`](crate::core::validated_apply), supplying a transform
//! and a validator closed over the board and the piece's anchor. A typical
//! turn: the embedding loop calls movement operations on input, `descend` on
//! each gravity tick, and the field locks the piece into the board and clears
//! full rows once it can no longer fall.

pub use self::{game_field::*, game_stats::*, piece_queue::*};

mod game_field;
mod game_stats;
mod piece_queue;
