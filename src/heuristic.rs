use std::collections::VecDeque;

use crate::board::{Board, Cell};
use crate::moves::{reverse_moves, ReverseMoves};

pub const UNREACHABLE: u8 = u8::MAX;

/// Walls-only slide distance from every cell to one target cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    size: u8,
    dist: Vec<u8>,
}

impl DistanceField {
    pub fn for_target(board: &Board, target: Cell) -> Self {
        backward_distances(target, &reverse_moves(board))
    }

    #[inline(always)]
    fn to_idx(&self, cell: Cell) -> usize {
        cell.y as usize * self.size as usize + cell.x as usize
    }

    /// Slides needed from `cell` ignoring robots, `None` if it cannot get there at all.
    #[inline(always)]
    pub fn get(&self, cell: Cell) -> Option<u8> {
        match self.dist[self.to_idx(cell)] {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Same as [`get`](Self::get) with unreachable cells ranked last.
    #[inline(always)]
    pub fn estimate(&self, cell: Cell) -> u8 {
        self.dist[self.to_idx(cell)]
    }
}

pub fn backward_distances(target: Cell, reverse: &ReverseMoves) -> DistanceField {
    let size = reverse.size();
    let mut field = DistanceField {
        size,
        dist: vec![UNREACHABLE; size as usize * size as usize],
    };
    let mut queue = VecDeque::with_capacity(field.dist.len());

    let target_idx = field.to_idx(target);
    field.dist[target_idx] = 0;
    queue.push_back(target);

    while let Some(current) = queue.pop_front() {
        let next_dist = field.dist[field.to_idx(current)].saturating_add(1);
        for &origin in reverse.origins(current) {
            let idx = field.to_idx(origin);
            if field.dist[idx] == UNREACHABLE {
                field.dist[idx] = next_dist;
                queue.push_back(origin);
            }
        }
    }

    field
}
