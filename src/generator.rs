use log::{debug, info, warn};
use rand::Rng;

use crate::board::{
    Board, BoardError, Cell, Configuration, Direction, Move, Puzzle, Target, COLORS,
    DEFAULT_BOARD_SIZE, ROBOT_COUNT,
};
use crate::solver::{solve_with, DedupPolicy, SolveOptions};

const CORNER_WALLS: [(Direction, Direction); 4] = [
    (Direction::North, Direction::West),
    (Direction::North, Direction::East),
    (Direction::South, Direction::West),
    (Direction::South, Direction::East),
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid move bounds: min {min} > max {max}")]
    InvalidBounds { min: usize, max: usize },
    #[error("no puzzle with an optimal length in [{min}, {max}] after {attempts} attempts")]
    Exhausted {
        min: usize,
        max: usize,
        attempts: usize,
    },
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub board_size: u8,
    /// Accepted optimal solution lengths, inclusive.
    pub min_moves: usize,
    pub max_moves: usize,
    /// Extra wall pieces to try to place besides the border and hub.
    pub wall_budget: usize,
    pub wall_attempts: usize,
    /// Candidates built before giving up.
    pub max_attempts: usize,
    /// Search budget per candidate; candidates that exceed it are rejected.
    ///
    /// Long optimal solutions need far more states than short ones, so a
    /// tight budget biases accepted puzzles toward the low end of the window.
    /// At the 16x16 default, lengths of 11 and 12 are rarely accepted. Raise
    /// it or set `None` when the upper end of the window matters.
    pub max_states_per_attempt: Option<usize>,
    /// Depth cutoff for the acceptance search, `None` means `max_moves`.
    /// A cutoff below `min_moves` accepts nothing.
    pub max_depth: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            board_size: DEFAULT_BOARD_SIZE,
            min_moves: 4,
            max_moves: 12,
            wall_budget: 20,
            wall_attempts: 1000,
            max_attempts: 2000,
            max_states_per_attempt: Some(250_000),
            max_depth: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    pub puzzle: Puzzle,
    /// One optimal solution found while accepting the puzzle.
    pub solution: Vec<Move>,
    pub states_explored: usize,
    pub attempts: usize,
}

/// Builds random boards and keeps the first whose optimal solution length
/// falls inside the configured window.
#[derive(Debug)]
pub struct Generator<R> {
    config: GeneratorConfig,
    rng: R,
}

impl<R: Rng> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Generator { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&mut self) -> Result<GeneratedPuzzle, GenerateError> {
        let GeneratorConfig {
            min_moves: min,
            max_moves: max,
            ..
        } = self.config;
        if min > max {
            return Err(GenerateError::InvalidBounds { min, max });
        }

        let options = SolveOptions {
            dedup: DedupPolicy::ColorAware,
            max_depth: Some(self.config.max_depth.unwrap_or(max)),
            max_states: self.config.max_states_per_attempt,
        };

        for attempt in 1..=self.config.max_attempts {
            let puzzle = self.build_candidate()?;
            let outcome = solve_with(&puzzle.board, &puzzle.robots, &puzzle.target, &options);
            match outcome.solution {
                Some(solution) if (min..=max).contains(&solution.len()) => {
                    info!(
                        "accepted puzzle after {} attempts: {} moves, {} states",
                        attempt,
                        solution.len(),
                        outcome.states_explored
                    );
                    return Ok(GeneratedPuzzle {
                        puzzle,
                        solution,
                        states_explored: outcome.states_explored,
                        attempts: attempt,
                    });
                }
                Some(solution) => {
                    debug!("attempt {}: rejected, {} moves", attempt, solution.len());
                }
                None => {
                    debug!(
                        "attempt {}: rejected, no solution within limits ({} states)",
                        attempt, outcome.states_explored
                    );
                }
            }
        }

        warn!(
            "gave up after {} attempts without a {}..={} move puzzle",
            self.config.max_attempts, min, max
        );
        Err(GenerateError::Exhausted {
            min,
            max,
            attempts: self.config.max_attempts,
        })
    }

    /// One random board with robots and a target, not yet checked for solvability.
    pub fn build_candidate(&mut self) -> Result<Puzzle, BoardError> {
        let mut board = Board::new(self.config.board_size)?;
        board.add_hub();
        board.add_border();
        self.place_walls(&mut board);

        let mut occupied: Vec<Cell> = Vec::with_capacity(ROBOT_COUNT + 1);
        for _ in 0..=ROBOT_COUNT {
            let cell = self.free_cell(&board, &occupied);
            occupied.push(cell);
        }
        let target_cell = occupied[ROBOT_COUNT];
        let mut cells = [target_cell; ROBOT_COUNT];
        cells.copy_from_slice(&occupied[..ROBOT_COUNT]);
        let color = COLORS[self.rng.gen_range(0..COLORS.len())];

        Ok(Puzzle {
            board,
            robots: Configuration::new(cells),
            target: Target {
                cell: target_cell,
                color,
            },
        })
    }

    fn place_walls(&mut self, board: &mut Board) {
        let size = board.size();
        let last = size - 1;
        let mut forbidden = vec![false; board.cell_count()];

        // Hub plus a one cell margin.
        let hub = board.hub_origin();
        for x in hub.x - 1..hub.x + 3 {
            for y in hub.y - 1..hub.y + 3 {
                forbidden[board.to_idx(Cell::new(x, y))] = true;
            }
        }

        let mut placed = 0;
        let mut attempts = 0;
        while placed < self.config.wall_budget && attempts < self.config.wall_attempts {
            attempts += 1;
            let cell = Cell::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if forbidden[board.to_idx(cell)] {
                continue;
            }

            let on_top_or_bottom = cell.y == 0 || cell.y == last;
            let on_left_or_right = cell.x == 0 || cell.x == last;
            if on_top_or_bottom && on_left_or_right {
                continue;
            }

            let flip = self.rng.gen_bool(0.5);
            if on_top_or_bottom {
                board.add_wall(cell, if flip { Direction::East } else { Direction::West });
            } else if on_left_or_right {
                board.add_wall(cell, if flip { Direction::North } else { Direction::South });
            } else {
                if board.walls_at(cell) != 0 {
                    continue;
                }
                let (a, b) = CORNER_WALLS[self.rng.gen_range(0..CORNER_WALLS.len())];
                board.add_wall(cell, a);
                board.add_wall(cell, b);
            }

            for dx in -1i16..=1 {
                for dy in -1i16..=1 {
                    let x = cell.x as i16 + dx;
                    let y = cell.y as i16 + dy;
                    if board.is_valid(x, y) {
                        forbidden[board.to_idx(Cell::new(x as u8, y as u8))] = true;
                    }
                }
            }
            placed += 1;
        }
        debug!("placed {} walls in {} attempts", placed, attempts);
    }

    fn free_cell(&mut self, board: &Board, occupied: &[Cell]) -> Cell {
        let size = board.size();
        loop {
            let cell = Cell::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !board.is_hub(cell) && !occupied.contains(&cell) {
                return cell;
            }
        }
    }
}

/// Generates a default-sized puzzle whose optimal length lies in `bounds`.
pub fn generate_solvable_puzzle<R: Rng>(
    bounds: (usize, usize),
    rng: &mut R,
) -> Result<GeneratedPuzzle, GenerateError> {
    let config = GeneratorConfig {
        min_moves: bounds.0,
        max_moves: bounds.1,
        ..GeneratorConfig::default()
    };
    Generator::new(config, rng).generate()
}
