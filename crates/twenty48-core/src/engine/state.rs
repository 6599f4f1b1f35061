use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{grid, ops};

/// Board edge length; the game is always played on a 4x4 grid.
pub const BOARD_SIZE: usize = 4;

// Internal alias for the row-major cell storage.
pub(crate) type Cells = [[u32; BOARD_SIZE]; BOARD_SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in the order the terminal check probes them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Relative odds of spawning a 2 versus a 4.
///
/// The defaults give the classic 80%/20% split. The pair must not be
/// all-zero; front-ends validate configured weights before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnWeights {
    pub two: u32,
    pub four: u32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        SpawnWeights { two: 80, four: 20 }
    }
}

impl SpawnWeights {
    pub(crate) fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        if rng.gen_range(0..self.two + self.four) < self.two {
            2
        } else {
            4
        }
    }
}

/// A 4x4 2048 board holding tile values row-major (0 = empty).
///
/// `Board` is a plain value: moves return a new board and never touch the
/// original, so callers may freely copy, compare, or discard boards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board(pub(crate) Cells);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(grid::empty());

    /// Construct a `Board` from its row-major cell values.
    #[inline]
    pub fn from_cells(cells: Cells) -> Self {
        Board(cells)
    }

    /// Consume this `Board`, returning the row-major cell values.
    #[inline]
    pub fn into_cells(self) -> Cells {
        self.0
    }

    /// Copy out the row-major cell values.
    #[inline]
    pub fn cells(&self) -> Cells {
        self.0
    }

    /// Value of the cell at `(row, col)`; 0 means empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// Example
    /// ```
    /// use twenty48_core::engine::{Board, Move};
    /// let b = Board::from_cells([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.shift(Move::Right).cells()[0], [0, 0, 0, 4]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (80%) or 4 (20%) tile into a uniformly random empty
    /// cell, using the provided RNG. A full board is returned unchanged.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_core::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::place_random_tile(self, rng, SpawnWeights::default())
    }

    /// Like [`Board::with_random_tile`], but with explicit spawn weights.
    #[inline]
    pub fn with_random_tile_weighted<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        weights: SpawnWeights,
    ) -> Self {
        ops::place_random_tile(self, rng, weights)
    }

    /// Convenience: like `with_random_tile` but uses the thread-local RNG.
    #[inline]
    pub fn with_random_tile_thread(self) -> Self {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Perform a move then insert a random tile if the move changed the board,
    /// using the provided RNG.
    ///
    /// ```
    /// use twenty48_core::engine::{Board, Move};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let b0 = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// let _b1 = b0.make_move(Move::Up, &mut rng);
    /// ```
    #[inline]
    pub fn make_move<R: Rng + ?Sized>(self, direction: Move, rng: &mut R) -> Self {
        let moved = self.shift(direction);
        if moved != self {
            moved.with_random_tile(rng)
        } else {
            self
        }
    }

    /// True iff no cell is empty.
    #[inline]
    pub fn is_full(self) -> bool {
        ops::is_board_full(self)
    }

    /// Return true if no legal moves remain: the board is full and shifting
    /// in every direction leaves it unchanged.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// // An empty board is not full, so the game is still on.
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool {
        ops::is_game_over(self)
    }

    /// Return the highest tile value (e.g., 2048) present on the board.
    #[inline]
    pub fn highest_tile(self) -> u32 {
        ops::highest_tile(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Iterate over tile values in row-major order (0 for empty).
    #[inline]
    pub fn tiles(self) -> impl Iterator<Item = u32> {
        self.0.into_iter().flatten()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Cells are 6 wide plus a leading pipe: enough for 131072, the
        // highest tile reachable on a 4x4 board.
        let rule = "-".repeat(BOARD_SIZE * 7 + 1);
        for row in &self.0 {
            writeln!(f, "{rule}")?;
            for &val in row {
                if val == 0 {
                    write!(f, "|{:^6}", "")?;
                } else {
                    write!(f, "|{val:^6}")?;
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}

impl From<Cells> for Board {
    fn from(cells: Cells) -> Self {
        Board::from_cells(cells)
    }
}

impl From<Board> for Cells {
    fn from(b: Board) -> Self {
        b.into_cells()
    }
}

impl IntoIterator for Board {
    type Item = u32;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<[u32; BOARD_SIZE], BOARD_SIZE>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_cells_round_trip() {
        let cells = [[2, 0, 0, 2], [4, 16, 8, 2], [2, 64, 32, 4], [1024, 1024, 64, 0]];
        let board = Board::from_cells(cells);
        assert_eq!(board.into_cells(), cells);
        assert_eq!(board.get(3, 0), 1024);
        assert_eq!(board.get(0, 1), 0);
    }

    #[test]
    fn it_tiles_iterates_row_major() {
        let board = Board::from_cells([[2, 4, 0, 0], [0; 4], [0; 4], [0, 0, 0, 8]]);
        let tiles: Vec<u32> = board.tiles().collect();
        assert_eq!(tiles.len(), 16);
        assert_eq!(&tiles[..2], &[2, 4]);
        assert_eq!(tiles[15], 8);
    }

    #[test]
    fn it_display_centers_tile_values() {
        let board = Board::from_cells([[2, 0, 0, 4], [0; 4], [0; 4], [0; 4]]);
        let text = board.to_string();
        assert!(text.contains("|  2   |      |      |  4   |"));
        // 4 rows, each a rule line plus a cell line, and a closing rule.
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn it_default_weights_are_80_20() {
        assert_eq!(SpawnWeights::default(), SpawnWeights { two: 80, four: 20 });
    }
}
