use rand::Rng;

use super::grid;
use super::state::{Board, Move, SpawnWeights, BOARD_SIZE};

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> Board {
    match direction {
        Move::Left | Move::Right => shift_rows(board, direction),
        Move::Up | Move::Down => shift_cols(board, direction),
    }
}

/// True iff no cell is empty.
pub fn is_board_full(board: Board) -> bool {
    board.tiles().all(|v| v != 0)
}

/// True if the board is full and no move in any direction changes it.
///
/// A board with an empty cell always has a legal move left.
pub fn is_game_over(board: Board) -> bool {
    if !is_board_full(board) {
        return false;
    }
    for direction in Move::ALL {
        if shift(board, direction) != board {
            return false;
        }
    }
    true
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&v| v == 0).count()
}

/// Highest tile value on the board (0 when the board is empty).
pub fn highest_tile(board: Board) -> u32 {
    board.tiles().max().unwrap_or(0)
}

/// Insert a random tile with default weights using the thread-local RNG.
///
/// For reproducible behavior, prefer `Board::with_random_tile(&mut impl Rng)`.
pub fn insert_random_tile(board: Board) -> Board {
    board.with_random_tile_thread()
}

/// Spawn a weighted random tile into a uniformly chosen empty cell.
/// A full board is returned unchanged.
pub(crate) fn place_random_tile<R: Rng + ?Sized>(
    board: Board,
    rng: &mut R,
    weights: SpawnWeights,
) -> Board {
    let mut cells = board.into_cells();
    let empty: Vec<(usize, usize)> = (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
        .filter(|&(row, col)| cells[row][col] == 0)
        .collect();
    if empty.is_empty() {
        return board;
    }
    let value = weights.pick(rng);
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    cells[row][col] = value;
    Board::from_cells(cells)
}

fn shift_rows(board: Board, move_dir: Move) -> Board {
    let mut cells = board.into_cells();
    for row in cells.iter_mut() {
        *row = match move_dir {
            Move::Left => collapse_left(*row),
            Move::Right => collapse_right(*row),
            _ => panic!("Trying to move up or down in shift rows"),
        };
    }
    Board::from_cells(cells)
}

fn shift_cols(board: Board, move_dir: Move) -> Board {
    let mut cols = grid::transpose(&board.into_cells());
    for col in cols.iter_mut() {
        *col = match move_dir {
            Move::Up => collapse_left(*col),
            Move::Down => collapse_right(*col),
            _ => panic!("Trying to move left or right in shift cols"),
        };
    }
    Board::from_cells(grid::transpose(&cols))
}

/// Collapse a single row toward its right end: merge equal adjacent tiles
/// once, then compact the survivors flush right.
///
/// The scan runs from the rightmost tile inward and skips past a merged
/// pair, so a tile merges at most once per move and ties resolve toward
/// the move direction: `[2, 2, 2, 0]` becomes `[0, 0, 2, 4]`.
fn collapse_right(row: [u32; BOARD_SIZE]) -> [u32; BOARD_SIZE] {
    let mut vals: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut idx = vals.len().saturating_sub(1);
    while idx > 0 {
        if vals[idx] == vals[idx - 1] {
            vals[idx] *= 2;
            vals[idx - 1] = 0;
            idx = idx.saturating_sub(2);
        } else {
            idx -= 1;
        }
    }
    let mut out = [0; BOARD_SIZE];
    let mut slot = BOARD_SIZE;
    for &val in vals.iter().rev().filter(|&&v| v != 0) {
        slot -= 1;
        out[slot] = val;
    }
    out
}

fn collapse_left(mut row: [u32; BOARD_SIZE]) -> [u32; BOARD_SIZE] {
    row.reverse();
    let mut out = collapse_right(row);
    out.reverse();
    out
}
