use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BoardError, UnknownPieceType};

use super::{piece::PieceKind, position::Position};

/// A single cell of the board grid.
///
/// Cells are numbered when converted to indices: 0 for empty, 1..=7 for the
/// seven piece types. The index is what a renderer uses to pick a color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.index(),
        }
    }

    pub fn from_index(index: u8) -> Result<Self, UnknownPieceType> {
        if index == 0 {
            Ok(Cell::Empty)
        } else {
            PieceKind::from_index(index).map(Cell::Piece)
        }
    }
}

/// A rectangular grid of cells addressed by (column, row).
///
/// The 2D grid is stored as a single vector, row 0 first. For a board that
/// looks like:
///
/// ```text
/// col  col  col
///  0    1    2
/// -------------
/// | 0 | 1 | 2 |  row 0
/// ----+---+----
/// | 3 | 4 | 5 |  row 1
/// -------------
/// ```
///
/// the underlying representation is `[0, 1, 2, 3, 4, 5]`, so cell (x, y)
/// lives at linear index `y * num_cols + x`.
///
/// Boards are immutable snapshots: every mutating operation returns a new
/// `Board` and leaves the receiver untouched. The all-or-nothing transform
/// logic in [`validated_apply`](super::transform::validated_apply) relies on
/// the same convention for pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    num_cols: usize,
    num_rows: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an all-empty board with the given dimensions.
    #[must_use]
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        Self {
            num_cols,
            num_rows,
            cells: vec![Cell::Empty; num_cols * num_rows],
        }
    }

    /// Creates a board from an existing grid of cells.
    pub fn from_cells(
        num_cols: usize,
        num_rows: usize,
        cells: Vec<Cell>,
    ) -> Result<Self, BoardError> {
        let expected = num_cols * num_rows;
        if cells.len() != expected {
            return Err(BoardError::InvalidDimensions {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            num_cols,
            num_rows,
            cells,
        })
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.num_cols && y < self.num_rows).then_some(y * self.num_cols + x)
    }

    /// Returns the cell at (x, y).
    ///
    /// This is the strict read: coordinates outside the board are an error,
    /// never a silent default. Callers probing speculative coordinates should
    /// gate on [`Self::is_valid_coordinate`] first.
    pub fn item(&self, x: i32, y: i32) -> Result<Cell, BoardError> {
        self.index_of(x, y)
            .map(|i| self.cells[i])
            .ok_or(BoardError::OutOfBounds { x, y })
    }

    /// Returns a new board with the cell at (x, y) replaced.
    pub fn set_item(&self, x: i32, y: i32, cell: Cell) -> Result<Self, BoardError> {
        let i = self
            .index_of(x, y)
            .ok_or(BoardError::OutOfBounds { x, y })?;
        let mut next = self.clone();
        next.cells[i] = cell;
        Ok(next)
    }

    /// Checks whether a coordinate names a cell on this board.
    ///
    /// Total function with no failure case; the tolerant existence check the
    /// strict accessors expect callers to use.
    #[must_use]
    pub fn is_valid_coordinate(&self, pos: Position) -> bool {
        self.index_of(pos.x, pos.y).is_some()
    }

    /// Returns the cells of row `y`, left to right by column.
    pub fn row(&self, y: i32) -> Result<&[Cell], BoardError> {
        let start = self
            .index_of(0, y)
            .ok_or(BoardError::OutOfBounds { x: 0, y })?;
        Ok(&self.cells[start..start + self.num_cols])
    }

    /// Checks whether every cell in row `y` is occupied.
    pub fn is_row_full(&self, y: i32) -> Result<bool, BoardError> {
        Ok(self.row(y)?.iter().all(|cell| !cell.is_empty()))
    }

    /// Returns a new board with row `y` removed.
    ///
    /// Rows above `y` shift down by one and a fresh all-empty row appears at
    /// the top; rows below `y` and the board dimensions are unchanged.
    pub fn pop_row(&self, y: i32) -> Result<Self, BoardError> {
        let start = self
            .index_of(0, y)
            .ok_or(BoardError::OutOfBounds { x: 0, y })?;
        let mut cells = Vec::with_capacity(self.cells.len());
        cells.extend_from_slice(&self.cells[..start]);
        cells.extend_from_slice(&self.cells[start + self.num_cols..]);
        cells.resize(self.cells.len(), Cell::Empty);
        Ok(Self {
            num_cols: self.num_cols,
            num_rows: self.num_rows,
            cells,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat((self.num_cols * 2).saturating_sub(1));
        writeln!(f, "{rule}")?;
        for row in self.cells.chunks(self.num_cols.max(1)) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.index())?;
            }
            writeln!(f)?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_indices(num_cols: usize, num_rows: usize, indices: &[u8]) -> Board {
        let cells = indices
            .iter()
            .map(|&i| Cell::from_index(i).unwrap())
            .collect();
        Board::from_cells(num_cols, num_rows, cells).unwrap()
    }

    #[test]
    fn test_item() {
        let board = board_from_indices(2, 2, &[1, 0, 2, 4]);
        assert_eq!(board.item(0, 1).unwrap().index(), 2);
        assert_eq!(board.item(1, 0).unwrap(), Cell::Empty);
        assert_eq!(board.item(0, 0).unwrap(), Cell::Piece(PieceKind::I));
    }

    #[test]
    fn test_item_out_of_bounds() {
        let board = Board::new(3, 2);
        assert_eq!(
            board.item(3, 0),
            Err(BoardError::OutOfBounds { x: 3, y: 0 })
        );
        assert_eq!(
            board.item(0, -1),
            Err(BoardError::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn test_set_item_returns_new_board() {
        let board = board_from_indices(2, 2, &[1, 0, 2, 4]);
        let original = board.clone();

        let updated = board.set_item(0, 1, Cell::Piece(PieceKind::L)).unwrap();
        assert_eq!(updated.item(0, 1).unwrap().index(), 3);
        // The input board is an unchanged snapshot.
        assert_eq!(board, original);
    }

    #[test]
    fn test_set_item_write_locality() {
        let board = board_from_indices(2, 2, &[1, 0, 2, 4]);
        let updated = board.set_item(1, 0, Cell::Piece(PieceKind::Z)).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                if (x, y) == (1, 0) {
                    continue;
                }
                assert_eq!(updated.item(x, y).unwrap(), board.item(x, y).unwrap());
            }
        }
    }

    #[test]
    fn test_from_cells_dimension_mismatch() {
        assert_eq!(
            Board::from_cells(3, 2, vec![Cell::Empty; 5]),
            Err(BoardError::InvalidDimensions {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_is_valid_coordinate() {
        let board = Board::new(2, 2);
        assert!(board.is_valid_coordinate(Position::new(1, 0)));
        assert!(board.is_valid_coordinate(Position::new(0, 1)));
        assert!(!board.is_valid_coordinate(Position::new(1, 2)));
        assert!(!board.is_valid_coordinate(Position::new(2, 1)));
        assert!(!board.is_valid_coordinate(Position::new(-1, 0)));
        assert!(!board.is_valid_coordinate(Position::new(0, -1)));
    }

    #[test]
    fn test_row() {
        let board = board_from_indices(2, 2, &[1, 0, 2, 4]);
        let indices = |y| {
            board
                .row(y)
                .unwrap()
                .iter()
                .map(|c| c.index())
                .collect::<Vec<_>>()
        };
        assert_eq!(indices(0), [1, 0]);
        assert_eq!(indices(1), [2, 4]);
        assert_eq!(board.row(2), Err(BoardError::OutOfBounds { x: 0, y: 2 }));
    }

    #[test]
    fn test_is_row_full() {
        let board = board_from_indices(2, 2, &[1, 0, 2, 4]);
        assert!(!board.is_row_full(0).unwrap());
        assert!(board.is_row_full(1).unwrap());

        // Full means no empty cell anywhere in the row.
        let board = board_from_indices(4, 1, &[7, 2, 4, 1]);
        assert!(board.is_row_full(0).unwrap());
    }

    #[test]
    fn test_pop_row_shifts_rows_down() {
        let board = board_from_indices(2, 3, &[1, 2, 3, 4, 5, 6]);
        let popped = board.pop_row(1).unwrap();

        assert_eq!(popped.num_cols(), 2);
        assert_eq!(popped.num_rows(), 3);
        // Row 0 untouched, old row 2 now at row 1, new top row empty.
        assert_eq!(popped.row(0).unwrap(), board.row(0).unwrap());
        assert_eq!(popped.row(1).unwrap(), board.row(2).unwrap());
        assert!(popped.row(2).unwrap().iter().all(|c| c.is_empty()));
        // The input board is unchanged.
        assert_eq!(board.row(1).unwrap()[0].index(), 3);
    }

    #[test]
    fn test_pop_bottom_row() {
        let board = board_from_indices(2, 2, &[1, 2, 3, 4]);
        let popped = board.pop_row(0).unwrap();
        assert_eq!(popped.row(0).unwrap(), board.row(1).unwrap());
        assert!(popped.row(1).unwrap().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_display_grid() {
        let board = board_from_indices(2, 3, &[0, 1, 2, 3, 4, 5]);
        let expected = "===\n0 1\n2 3\n4 5\n===";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_serde_round_trip() {
        let board = board_from_indices(2, 2, &[1, 0, 2, 4]);
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }
}
