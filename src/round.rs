use arrayvec::ArrayVec;

use crate::board::{Cell, Color, Configuration, Direction, Move, Puzzle};
use crate::moves::{legal_moves, slide};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("{color} cannot move {direction}")]
    NoMovement { color: Color, direction: Direction },
    #[error("{0} is not a legal slide from the current position")]
    IllegalMove(Move),
    #[error("the round is already solved")]
    AlreadySolved,
}

/// A puzzle being played: the starting position plus the moves made so far.
#[derive(Clone, Debug)]
pub struct Round {
    puzzle: Puzzle,
    robots: Configuration,
    history: Vec<Move>,
}

impl Round {
    pub fn new(puzzle: Puzzle) -> Self {
        let robots = puzzle.robots;
        Round {
            puzzle,
            robots,
            history: Vec::new(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn robots(&self) -> &Configuration {
        &self.robots
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_solved(&self) -> bool {
        self.puzzle.target.is_reached(&self.robots)
    }

    pub fn legal_moves(&self, color: Color) -> ArrayVec<(Direction, Cell), 4> {
        legal_moves(&self.puzzle.board, &self.robots, color)
    }

    pub fn play(&mut self, color: Color, direction: Direction) -> Result<Move, MoveError> {
        if self.is_solved() {
            return Err(MoveError::AlreadySolved);
        }
        let from = self.robots.get(color);
        let to = slide(&self.puzzle.board, from, direction, self.robots.cells())
            .ok_or(MoveError::NoMovement { color, direction })?;
        let mv = Move {
            color,
            direction,
            to,
        };
        self.robots = self.robots.with_robot(color, to);
        self.history.push(mv);
        Ok(mv)
    }

    /// Plays back recorded moves, checking each lands where it says it does.
    /// Moves recorded after the target is reached are illegal.
    pub fn replay(&mut self, moves: &[Move]) -> Result<(), MoveError> {
        for &mv in moves {
            if self.is_solved() {
                return Err(MoveError::IllegalMove(mv));
            }
            let from = self.robots.get(mv.color);
            match slide(&self.puzzle.board, from, mv.direction, self.robots.cells()) {
                Some(to) if to == mv.to => {
                    self.robots = self.robots.with_robot(mv.color, to);
                    self.history.push(mv);
                }
                _ => return Err(MoveError::IllegalMove(mv)),
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.robots = self.puzzle.robots;
        self.history.clear();
    }
}

/// `true` if `moves` are legal slides that end with the target reached.
pub fn verify_solution(puzzle: &Puzzle, moves: &[Move]) -> bool {
    let mut round = Round::new(puzzle.clone());
    round.replay(moves).is_ok() && round.is_solved()
}
