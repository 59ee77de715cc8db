/// Score awarded for clearing `cleared` lines with one piece.
///
/// 1 to 3 lines score `(lines * 2 - 1) * 100`; clearing 4 or more at once is
/// a flat 800.
const fn line_clear_score(cleared: usize) -> usize {
    match cleared {
        0 => 0,
        1..=3 => (cleared * 2 - 1) * 100,
        _ => 800,
    }
}

/// Score and line-clear bookkeeping for one game session.
///
/// # Example
///
/// ```
/// use pytromino_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count; index 4 also counts
    /// clears of more than four lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates the statistics after a piece locks in, clearing `cleared_lines`.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        let bucket = if cleared_lines < self.line_cleared_counter.len() {
            cleared_lines
        } else {
            self.line_cleared_counter.len() - 1
        };
        self.line_cleared_counter[bucket] += 1;
        self.score += line_clear_score(cleared_lines);
    }
}
