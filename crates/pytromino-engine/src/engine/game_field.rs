use rand::Rng as _;

use crate::{
    BoardError, HolderClosed,
    core::{
        board::{Board, Cell},
        holder::Holder,
        piece::{PieceKind, Pytromino},
        position::Position,
        transform::{self, validated_apply},
    },
};

use super::{
    game_stats::GameStats,
    piece_queue::{PieceQueue, PieceSeed},
};

/// Standard playfield width.
pub const DEFAULT_NUM_COLS: usize = 10;
/// Standard playfield height; the top two rows are spawn headroom that a
/// renderer typically keeps off-screen.
pub const DEFAULT_NUM_ROWS: usize = 22;

/// Checks whether a piece block may occupy `pos`.
///
/// On-board cells must be empty. Above the top row only the column bounds
/// apply, so a freshly spawned piece can hang partially off-screen; anywhere
/// else off the board counts as a wall.
fn is_free(board: &Board, pos: Position) -> bool {
    if board.is_valid_coordinate(pos) {
        return board.item(pos.x, pos.y).is_ok_and(Cell::is_empty);
    }
    usize::try_from(pos.y).is_ok_and(|y| y >= board.num_rows())
        && usize::try_from(pos.x).is_ok_and(|x| x < board.num_cols())
}

/// Scans for full rows bottom-up and pops each one, adjusting the target
/// index by the rows already removed below it so compaction skips nothing.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn clear_full_rows(board: &Board) -> Result<(Board, usize), BoardError> {
    let mut result = board.clone();
    let mut removed = 0_i32;
    for y in 0..board.num_rows() as i32 {
        if board.is_row_full(y)? {
            result = result.pop_row(y - removed)?;
            removed += 1;
        }
    }
    Ok((result, removed as usize))
}

/// Mutable game state for one session: the board, the falling piece and its
/// anchor, the piece queue, the hold slot, and the score.
///
/// Every movement operation builds a transform and a validator closed over
/// the board and the anchor, then runs them through
/// [`validated_apply`](crate::core::validated_apply); the piece reference is
/// replaced with the result either way, so a rejected move is simply a
/// no-op.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    piece: Pytromino,
    anchor: Position,
    queue: PieceQueue,
    holder: Holder<Pytromino>,
    stats: GameStats,
    game_over: bool,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a deterministic
    /// piece sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_board(Board::new(DEFAULT_NUM_COLS, DEFAULT_NUM_ROWS), seed)
    }

    /// Starts a session on an existing board, which may already hold locked
    /// blocks.
    #[must_use]
    pub fn with_board(board: Board, seed: PieceSeed) -> Self {
        let mut queue = PieceQueue::with_seed(seed);
        let piece = Pytromino::new(queue.pop_next());
        let anchor = Self::spawn_anchor(&board);
        let mut field = Self {
            board,
            piece,
            anchor,
            queue,
            holder: Holder::new(),
            stats: GameStats::new(),
            game_over: false,
        };
        field.game_over = !field.piece_fits();
        field
    }

    fn spawn_anchor(board: &Board) -> Position {
        let x = i32::try_from(board.num_cols() / 2)
            .unwrap_or(i32::MAX)
            .saturating_sub(1);
        let y = i32::try_from(board.num_rows())
            .unwrap_or(i32::MAX)
            .saturating_sub(1);
        Position::new(x, y)
    }

    fn piece_fits(&self) -> bool {
        self.piece
            .blocks()
            .iter()
            .all(|&block| is_free(&self.board, self.anchor.add(block)))
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Pytromino {
        &self.piece
    }

    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<&Pytromino> {
        self.holder.item()
    }

    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.queue.peek_next()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Moves the falling piece one column left. Returns whether it moved.
    pub fn move_left(&mut self) -> bool {
        self.apply_shift(1)
    }

    /// Moves the falling piece one column right. Returns whether it moved.
    pub fn move_right(&mut self) -> bool {
        self.apply_shift(-1)
    }

    fn apply_shift(&mut self, steps: i32) -> bool {
        let board = &self.board;
        let anchor = self.anchor;
        let next = validated_apply(
            &self.piece,
            |pos| pos.shifted_left(steps),
            false,
            |pos| is_free(board, anchor.add(pos)),
        );
        let moved = next.blocks() != self.piece.blocks();
        self.piece = next;
        moved
    }

    /// Drops the falling piece's offsets one row. Returns whether it moved.
    ///
    /// The pivot cell is validated in place here, matching the historical
    /// key-handler behavior of the drop binding.
    pub fn soft_drop(&mut self) -> bool {
        let board = &self.board;
        let anchor = self.anchor;
        let next = validated_apply(
            &self.piece,
            |pos| pos.shifted_down(1),
            true,
            |pos| is_free(board, anchor.add(pos)),
        );
        let moved = next.blocks() != self.piece.blocks();
        self.piece = next;
        moved
    }

    /// Rotates the falling piece 90 degrees clockwise. Returns whether it
    /// rotated.
    pub fn rotate_cw(&mut self) -> bool {
        let pivot = self.piece.pivot();
        self.apply_rotation(move |pos| transform::rotate_cw(pivot, pos))
    }

    /// Rotates the falling piece 90 degrees counterclockwise. Returns whether
    /// it rotated.
    pub fn rotate_ccw(&mut self) -> bool {
        let pivot = self.piece.pivot();
        self.apply_rotation(move |pos| transform::rotate_ccw(pivot, pos))
    }

    fn apply_rotation(&mut self, rotation: impl Fn(Position) -> Position) -> bool {
        let board = &self.board;
        let anchor = self.anchor;
        let next = validated_apply(&self.piece, rotation, true, |pos| {
            is_free(board, anchor.add(pos))
        });
        let rotated = next.blocks() != self.piece.blocks();
        self.piece = next;
        rotated
    }

    fn can_descend(&self) -> bool {
        self.piece
            .blocks()
            .iter()
            .all(|&block| is_free(&self.board, self.anchor.add(block).shifted_down(1)))
    }

    /// One gravity tick: the anchor descends one row, or the piece locks in
    /// when it cannot. Returns whether the piece is still falling.
    pub fn descend(&mut self) -> Result<bool, BoardError> {
        if self.game_over {
            return Ok(false);
        }
        if self.can_descend() {
            self.anchor = self.anchor.shifted_down(1);
            Ok(true)
        } else {
            self.lock_piece()?;
            Ok(false)
        }
    }

    /// Returns the anchor at which the falling piece would come to rest.
    #[must_use]
    pub fn drop_anchor(&self) -> Position {
        let mut anchor = self.anchor;
        loop {
            let candidate = anchor.shifted_down(1);
            let fits = self
                .piece
                .blocks()
                .iter()
                .all(|&block| is_free(&self.board, candidate.add(block)));
            if !fits {
                return anchor;
            }
            anchor = candidate;
        }
    }

    /// Drops the falling piece to rest and locks it in. Returns the number
    /// of lines cleared.
    pub fn hard_drop(&mut self) -> Result<usize, BoardError> {
        self.anchor = self.drop_anchor();
        self.lock_piece()
    }

    /// Merges the falling piece into the board, clears full rows, updates the
    /// score, and spawns the next piece. Returns the number of lines cleared.
    ///
    /// The session is over when the spawned piece collides immediately.
    pub fn lock_piece(&mut self) -> Result<usize, BoardError> {
        let placed = self.piece.place_at(self.anchor);
        let mut board = self.board.clone();
        for &pos in placed.blocks() {
            // Blocks still above the top row stay off the grid.
            if board.is_valid_coordinate(pos) {
                board = board.set_item(pos.x, pos.y, Cell::Piece(placed.kind()))?;
            }
        }
        let (board, cleared) = clear_full_rows(&board)?;
        self.board = board;
        self.stats.complete_piece_drop(cleared);
        self.holder.open();
        self.piece = Pytromino::new(self.queue.pop_next());
        self.anchor = Self::spawn_anchor(&self.board);
        if !self.piece_fits() {
            self.game_over = true;
        }
        Ok(cleared)
    }

    /// Stores the falling piece in the hold slot, swapping with any piece
    /// already held, and closes the slot until the next lock-in.
    ///
    /// A held piece keeps its rotation state and returns with it.
    pub fn hold(&mut self) -> Result<(), HolderClosed> {
        if !self.holder.is_open() {
            return Err(HolderClosed);
        }
        let stored = self.holder.take();
        self.holder.store(self.piece.clone())?;
        self.holder.close();
        self.piece = match stored {
            Some(piece) => piece,
            None => Pytromino::new(self.queue.pop_next()),
        };
        self.anchor = Self::spawn_anchor(&self.board);
        Ok(())
    }
}
