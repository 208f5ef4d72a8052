//! Solver and generator for Ricochet Robots puzzles.
//!
//! Robots slide until a wall, the board edge or another robot stops them;
//! a puzzle is solved when the target-colored robot rests on the target cell.
//! [`solve`] finds a shortest sequence of slides, [`Generator`] builds random
//! puzzles whose optimal length falls inside a window, and [`game_id`]
//! converts puzzles to and from a short shareable string.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use ricochet_solver::{decode_game_id, encode_game_id, generate_solvable_puzzle, solve};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let generated = generate_solvable_puzzle((2, 6), &mut rng).unwrap();
//! let id = encode_game_id(&generated.puzzle).unwrap();
//! let puzzle = decode_game_id(&id).unwrap();
//! let outcome = solve(&puzzle.board, &puzzle.robots, &puzzle.target);
//! assert_eq!(outcome.solution_len(), Some(generated.solution.len()));
//! ```

pub mod board;
pub mod game_id;
pub mod generator;
pub mod heuristic;
pub mod moves;
pub mod round;
pub mod solver;

pub use crate::board::{
    Board, BoardError, Cell, Color, Configuration, Direction, Move, Puzzle, Target, COLORS,
    DEFAULT_BOARD_SIZE, DIRECTIONS, ROBOT_COUNT,
};
pub use crate::game_id::{
    decode_game_id, decode_game_id_sized, encode_game_id, GameIdError, WallType,
};
pub use crate::generator::{
    generate_solvable_puzzle, GenerateError, GeneratedPuzzle, Generator, GeneratorConfig,
};
pub use crate::heuristic::{backward_distances, DistanceField};
pub use crate::moves::{legal_moves, reverse_moves, slide, ReverseMoves};
pub use crate::round::{verify_solution, MoveError, Round};
pub use crate::solver::{solve, solve_with, DedupPolicy, SearchOutcome, SolveOptions};
