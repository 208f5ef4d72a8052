//! Compact text form of a puzzle: `ROBOTS-TARGET-WALLS`, upper-case hex.
//!
//! * `ROBOTS`: robot count, then `x`,`y` for each robot in
//!   [`COLORS`](crate::board::COLORS) order.
//! * `TARGET`: color index, `x`, `y`.
//! * `WALLS`: one `x`,`y`,`type` triplet per cell with walls, see [`WallType`].
//!
//! Every field is a single nibble, which is what caps boards at 16x16.

use smallvec::SmallVec;

use crate::board::{
    Board, BoardError, Cell, Color, Configuration, Direction, Puzzle, Target,
    DEFAULT_BOARD_SIZE, ROBOT_COUNT,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameIdError {
    #[error("expected 3 '-' separated segments, found {0}")]
    SegmentCount(usize),
    #[error("{segment} segment has invalid length {len}")]
    SegmentLength { segment: &'static str, len: usize },
    #[error("invalid hex digit {0:?}")]
    InvalidHex(char),
    #[error("expected 4 robots, found {0}")]
    RobotCount(u8),
    #[error("color index {0} out of range")]
    ColorIndex(u8),
    #[error("wall type {0} out of range")]
    WallType(u8),
    #[error("cell ({x},{y}) is outside a {size}x{size} board")]
    OutOfBounds { x: u8, y: u8, size: u8 },
    #[error("two robots share cell {0}")]
    OverlappingRobots(Cell),
    #[error("wall flags {flags:#06b} at {cell} have no wall type")]
    UnencodableWall { cell: Cell, flags: u8 },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// The eight wall shapes a Game ID can carry, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallType {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
    North = 4,
    South = 5,
    West = 6,
    East = 7,
}

pub const WALL_TYPES: [WallType; 8] = [
    WallType::NorthWest,
    WallType::NorthEast,
    WallType::SouthWest,
    WallType::SouthEast,
    WallType::North,
    WallType::South,
    WallType::West,
    WallType::East,
];

impl WallType {
    pub const fn flags(self) -> u8 {
        let n = Direction::North.wall_bit();
        let s = Direction::South.wall_bit();
        let e = Direction::East.wall_bit();
        let w = Direction::West.wall_bit();
        match self {
            WallType::NorthWest => n | w,
            WallType::NorthEast => n | e,
            WallType::SouthWest => s | w,
            WallType::SouthEast => s | e,
            WallType::North => n,
            WallType::South => s,
            WallType::West => w,
            WallType::East => e,
        }
    }

    /// Exact match only; any other combination cannot round-trip.
    pub fn from_flags(flags: u8) -> Option<WallType> {
        WALL_TYPES.iter().copied().find(|t| t.flags() == flags)
    }

    pub fn from_index(index: u8) -> Option<WallType> {
        WALL_TYPES.get(index as usize).copied()
    }
}

pub fn encode_game_id(puzzle: &Puzzle) -> Result<String, GameIdError> {
    let board = &puzzle.board;
    let mut id = String::with_capacity(1 + ROBOT_COUNT * 2 + 4 + board.cell_count() * 3);
    push_nibble(&mut id, ROBOT_COUNT as u8);
    for (_, cell) in puzzle.robots.iter() {
        push_cell(&mut id, cell);
    }

    id.push('-');
    push_nibble(&mut id, puzzle.target.color.index() as u8);
    push_cell(&mut id, puzzle.target.cell);

    id.push('-');
    for (cell, flags) in board.wall_cells() {
        let wall_type =
            WallType::from_flags(flags).ok_or(GameIdError::UnencodableWall { cell, flags })?;
        push_cell(&mut id, cell);
        push_nibble(&mut id, wall_type as u8);
    }

    Ok(id)
}

pub fn decode_game_id(id: &str) -> Result<Puzzle, GameIdError> {
    decode_game_id_sized(id, DEFAULT_BOARD_SIZE)
}

/// Decodes onto a board of the given size; the string itself does not carry it.
pub fn decode_game_id_sized(id: &str, size: u8) -> Result<Puzzle, GameIdError> {
    let mut board = Board::new(size)?;

    let segments: SmallVec<[&str; 3]> = id.trim().split('-').collect();
    let [robot_str, target_str, wall_str] = segments[..] else {
        return Err(GameIdError::SegmentCount(segments.len()));
    };

    let robot_digits = nibbles(robot_str)?;
    let Some((&count, positions)) = robot_digits.split_first() else {
        return Err(GameIdError::SegmentLength {
            segment: "robots",
            len: 0,
        });
    };
    if count as usize != ROBOT_COUNT {
        return Err(GameIdError::RobotCount(count));
    }
    if positions.len() != ROBOT_COUNT * 2 {
        return Err(GameIdError::SegmentLength {
            segment: "robots",
            len: robot_str.len(),
        });
    }
    let mut cells = [Cell::new(0, 0); ROBOT_COUNT];
    for (slot, pair) in cells.iter_mut().zip(positions.chunks_exact(2)) {
        *slot = cell(&board, pair[0], pair[1])?;
    }
    let robots = Configuration::new(cells);
    for (i, a) in cells.iter().enumerate() {
        if cells[i + 1..].contains(a) {
            return Err(GameIdError::OverlappingRobots(*a));
        }
    }

    let target_digits = nibbles(target_str)?;
    let [color_idx, x, y] = target_digits[..] else {
        return Err(GameIdError::SegmentLength {
            segment: "target",
            len: target_str.len(),
        });
    };
    let color =
        Color::from_index(color_idx as usize).ok_or(GameIdError::ColorIndex(color_idx))?;
    let target = Target {
        cell: cell(&board, x, y)?,
        color,
    };

    let wall_digits = nibbles(wall_str)?;
    if wall_digits.len() % 3 != 0 {
        return Err(GameIdError::SegmentLength {
            segment: "walls",
            len: wall_str.len(),
        });
    }
    for triplet in wall_digits.chunks_exact(3) {
        let at = cell(&board, triplet[0], triplet[1])?;
        let wall_type =
            WallType::from_index(triplet[2]).ok_or(GameIdError::WallType(triplet[2]))?;
        // Repeated cells merge their flags.
        let flags = board.walls_at(at) | wall_type.flags();
        board.set_walls(at, flags);
    }

    Ok(Puzzle {
        board,
        robots,
        target,
    })
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[inline]
fn push_nibble(id: &mut String, value: u8) {
    id.push(HEX_DIGITS[(value & 0xF) as usize] as char);
}

#[inline]
fn push_cell(id: &mut String, cell: Cell) {
    push_nibble(id, cell.x);
    push_nibble(id, cell.y);
}

fn nibbles(segment: &str) -> Result<Vec<u8>, GameIdError> {
    segment
        .chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or(GameIdError::InvalidHex(c))
        })
        .collect()
}

fn cell(board: &Board, x: u8, y: u8) -> Result<Cell, GameIdError> {
    let cell = Cell::new(x, y);
    if board.contains(cell) {
        Ok(cell)
    } else {
        Err(GameIdError::OutOfBounds {
            x,
            y,
            size: board.size(),
        })
    }
}
