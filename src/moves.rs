use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::board::{Board, Cell, Color, Configuration, Direction, DIRECTIONS};

/// Slides from `from` in `dir` until a wall, the board edge or an occupied
/// cell stops it. Returns `None` when the robot cannot leave `from`.
#[inline]
pub fn slide(board: &Board, from: Cell, dir: Direction, occupied: &[Cell]) -> Option<Cell> {
    let mut pos = from;
    while let Some(next) = board.step(pos, dir) {
        if occupied.contains(&next) {
            break;
        }
        pos = next;
    }
    (pos != from).then_some(pos)
}

/// Every non-empty slide `color` can make from `robots`, at most one per direction.
#[inline]
pub fn legal_moves(
    board: &Board,
    robots: &Configuration,
    color: Color,
) -> ArrayVec<(Direction, Cell), 4> {
    let from = robots.get(color);
    let mut moves = ArrayVec::new();
    for dir in DIRECTIONS {
        if let Some(to) = slide(board, from, dir, robots.cells()) {
            moves.push((dir, to));
        }
    }
    moves
}

/// For each cell, the cells that land on it after one slide on an empty board.
#[derive(Clone, Debug)]
pub struct ReverseMoves {
    size: u8,
    origins: Vec<SmallVec<[Cell; 4]>>,
}

impl ReverseMoves {
    #[inline(always)]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline(always)]
    fn to_idx(&self, cell: Cell) -> usize {
        cell.y as usize * self.size as usize + cell.x as usize
    }

    #[inline(always)]
    pub fn origins(&self, cell: Cell) -> &[Cell] {
        &self.origins[self.to_idx(cell)]
    }
}

pub fn reverse_moves(board: &Board) -> ReverseMoves {
    let mut origins = vec![SmallVec::new(); board.cell_count()];
    for from in board.cells() {
        for dir in DIRECTIONS {
            if let Some(landing) = slide(board, from, dir, &[]) {
                origins[board.to_idx(landing)].push(from);
            }
        }
    }
    ReverseMoves {
        size: board.size(),
        origins,
    }
}
