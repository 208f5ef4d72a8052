use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::{Board, Configuration, Move, Target, COLORS};
use crate::heuristic::DistanceField;
use crate::moves::legal_moves;

type Path = SmallVec<[Move; 16]>;

/// How visited configurations are identified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Which robot stands on which cell.
    #[default]
    ColorAware,
    /// Only the set of occupied cells. Compatibility mode: two configurations
    /// that differ by swapped robots collapse into one node, which can prune
    /// the only optimal line.
    ColorAgnostic,
}

impl DedupPolicy {
    #[inline(always)]
    pub fn key(self, board: &Board, robots: &Configuration) -> u32 {
        let mut idx = robots.cells().map(|c| board.to_idx(c) as u8);
        if self == DedupPolicy::ColorAgnostic {
            idx.sort_unstable();
        }
        u32::from_le_bytes(idx)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    pub dedup: DedupPolicy,
    /// Configurations at this many moves are not expanded further.
    pub max_depth: Option<usize>,
    /// Stop after dequeuing this many distinct configurations.
    pub max_states: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub solution: Option<Vec<Move>>,
    pub states_explored: usize,
    /// A limit in [`SolveOptions`] cut the search short, so a missing
    /// solution means "not found within the limits" rather than "unsolvable".
    pub truncated: bool,
}

impl SearchOutcome {
    pub fn solution_len(&self) -> Option<usize> {
        self.solution.as_ref().map(Vec::len)
    }
}

struct State {
    robots: Configuration,
    path: Path,
    heuristic: u8,
}

impl Eq for State {}
impl PartialEq for State {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

// Shortest path first; the walls-only distance only breaks ties inside a
// depth level, so the first goal dequeued is optimal.
impl Ord for State {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .path
            .len()
            .cmp(&self.path.len())
            .then_with(|| other.heuristic.cmp(&self.heuristic))
    }
}

impl PartialOrd for State {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn solve(board: &Board, start: &Configuration, target: &Target) -> SearchOutcome {
    solve_with(board, start, target, &SolveOptions::default())
}

pub fn solve_with(
    board: &Board,
    start: &Configuration,
    target: &Target,
    options: &SolveOptions,
) -> SearchOutcome {
    let distances = DistanceField::for_target(board, target.cell);
    let dedup = options.dedup;

    let mut open_set = BinaryHeap::with_capacity(4096);
    let mut visited: FxHashSet<u32> =
        FxHashSet::with_capacity_and_hasher(1 << 16, Default::default());
    let mut states_explored = 0;
    let mut truncated = false;

    open_set.push(State {
        robots: *start,
        path: Path::new(),
        heuristic: distances.estimate(start.get(target.color)),
    });

    while let Some(current) = open_set.pop() {
        if !visited.insert(dedup.key(board, &current.robots)) {
            continue;
        }
        states_explored += 1;

        if target.is_reached(&current.robots) {
            debug!(
                "solved in {} moves after {} states",
                current.path.len(),
                states_explored
            );
            return SearchOutcome {
                solution: Some(current.path.into_vec()),
                states_explored,
                truncated: false,
            };
        }

        if options.max_states.is_some_and(|cap| states_explored >= cap) {
            truncated = true;
            break;
        }
        if options.max_depth.is_some_and(|depth| current.path.len() >= depth) {
            truncated = true;
            continue;
        }

        for color in COLORS {
            for (direction, to) in legal_moves(board, &current.robots, color) {
                let robots = current.robots.with_robot(color, to);
                if visited.contains(&dedup.key(board, &robots)) {
                    continue;
                }

                let mut path = current.path.clone();
                path.push(Move {
                    color,
                    direction,
                    to,
                });

                open_set.push(State {
                    robots,
                    path,
                    heuristic: distances.estimate(robots.get(target.color)),
                });
            }
        }
    }

    debug!(
        "no solution after {} states (truncated: {})",
        states_explored, truncated
    );
    SearchOutcome {
        solution: None,
        states_explored,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Color, Direction};

    fn open_board(size: u8) -> Board {
        let mut board = Board::new(size).unwrap();
        board.add_border();
        board
    }

    fn swapped_pair() -> (Configuration, Configuration) {
        let a = Configuration::new([
            Cell::new(1, 1),
            Cell::new(5, 2),
            Cell::new(0, 6),
            Cell::new(3, 3),
        ]);
        let b = Configuration::new([
            Cell::new(5, 2),
            Cell::new(1, 1),
            Cell::new(0, 6),
            Cell::new(3, 3),
        ]);
        (a, b)
    }

    #[test]
    fn color_aware_keys_keep_swaps_apart() {
        let board = open_board(8);
        let (a, b) = swapped_pair();
        let aware = DedupPolicy::ColorAware;
        assert_ne!(aware.key(&board, &a), aware.key(&board, &b));
    }

    #[test]
    fn color_agnostic_keys_collapse_swaps() {
        let board = open_board(8);
        let (a, b) = swapped_pair();
        let agnostic = DedupPolicy::ColorAgnostic;
        assert_eq!(agnostic.key(&board, &a), agnostic.key(&board, &b));
        let moved = a.with_robot(Color::Red, Cell::new(1, 0));
        assert_ne!(agnostic.key(&board, &a), agnostic.key(&board, &moved));
    }

    #[test]
    fn already_on_target() {
        let board = open_board(8);
        let (start, _) = swapped_pair();
        let target = Target {
            cell: Cell::new(3, 3),
            color: Color::Yellow,
        };
        let outcome = solve(&board, &start, &target);
        assert_eq!(outcome.solution, Some(Vec::new()));
        assert_eq!(outcome.states_explored, 1);
    }

    #[test]
    fn single_slide() {
        let board = open_board(8);
        let start = Configuration::new([
            Cell::new(0, 0),
            Cell::new(7, 7),
            Cell::new(0, 7),
            Cell::new(3, 5),
        ]);
        let target = Target {
            cell: Cell::new(7, 0),
            color: Color::Red,
        };
        let outcome = solve(&board, &start, &target);
        assert_eq!(
            outcome.solution,
            Some(vec![Move {
                color: Color::Red,
                direction: Direction::East,
                to: Cell::new(7, 0),
            }])
        );
        assert!(outcome.states_explored >= 1);
        assert!(!outcome.truncated);
    }

    #[test]
    fn needs_a_blocker() {
        // Red can only stop on (4,0) if another robot waits on (5,0).
        let board = open_board(8);
        let start = Configuration::new([
            Cell::new(0, 0),
            Cell::new(5, 7),
            Cell::new(0, 7),
            Cell::new(7, 7),
        ]);
        let target = Target {
            cell: Cell::new(4, 0),
            color: Color::Red,
        };
        let outcome = solve(&board, &start, &target);
        let solution = outcome.solution.unwrap();
        assert_eq!(solution.len(), 2);
        assert_eq!(solution[0].color, Color::Blue);
        assert_eq!(solution[0].to, Cell::new(5, 0));
        assert_eq!(solution[1].to, Cell::new(4, 0));
    }

    #[test]
    fn unreachable_target_is_none() {
        let mut board = open_board(4);
        board.add_hub();
        let start = Configuration::new([
            Cell::new(0, 0),
            Cell::new(3, 3),
            Cell::new(0, 3),
            Cell::new(3, 0),
        ]);
        let target = Target {
            cell: Cell::new(1, 1),
            color: Color::Green,
        };
        let outcome = solve(&board, &start, &target);
        assert_eq!(outcome.solution, None);
        assert!(!outcome.truncated);
        assert!(outcome.states_explored > 1);
    }

    #[test]
    fn limits_mark_truncation() {
        let mut board = open_board(4);
        board.add_hub();
        let start = Configuration::new([
            Cell::new(0, 0),
            Cell::new(3, 3),
            Cell::new(0, 3),
            Cell::new(3, 0),
        ]);
        let target = Target {
            cell: Cell::new(1, 1),
            color: Color::Green,
        };
        let options = SolveOptions {
            max_states: Some(10),
            ..SolveOptions::default()
        };
        let outcome = solve_with(&board, &start, &target, &options);
        assert_eq!(outcome.solution, None);
        assert!(outcome.truncated);
        assert_eq!(outcome.states_explored, 10);

        let options = SolveOptions {
            max_depth: Some(1),
            ..SolveOptions::default()
        };
        let outcome = solve_with(&board, &start, &target, &options);
        assert!(outcome.truncated);
    }

    #[test]
    fn policies_agree_on_length() {
        let board = open_board(8);
        let start = Configuration::new([
            Cell::new(0, 0),
            Cell::new(5, 7),
            Cell::new(0, 7),
            Cell::new(7, 7),
        ]);
        let target = Target {
            cell: Cell::new(4, 0),
            color: Color::Red,
        };
        let aware = solve(&board, &start, &target);
        let agnostic = solve_with(
            &board,
            &start,
            &target,
            &SolveOptions {
                dedup: DedupPolicy::ColorAgnostic,
                ..SolveOptions::default()
            },
        );
        assert_eq!(aware.solution_len(), agnostic.solution_len());
    }
}
