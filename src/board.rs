use std::fmt;
use std::ops::Index;
use std::str::FromStr;

pub const DEFAULT_BOARD_SIZE: u8 = 16;
pub const MIN_BOARD_SIZE: u8 = 4;
// Coordinates are stored and encoded as single hex nibbles.
pub const MAX_BOARD_SIZE: u8 = 16;
pub const ROBOT_COUNT: usize = 4;

const WALL_NORTH: u8 = 1 << 0;
const WALL_EAST: u8 = 1 << 1;
const WALL_SOUTH: u8 = 1 << 2;
const WALL_WEST: u8 = 1 << 3;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("unsupported board size {0}: expected an even size between 4 and 16")]
    UnsupportedSize(u8),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    #[inline(always)]
    pub const fn new(x: u8, y: u8) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal direction. North is towards `y == 0`, west towards `x == 0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// Wall flag for the side of a cell facing this direction.
    #[inline(always)]
    pub const fn wall_bit(self) -> u8 {
        match self {
            Direction::North => WALL_NORTH,
            Direction::East => WALL_EAST,
            Direction::South => WALL_SOUTH,
            Direction::West => WALL_WEST,
        }
    }

    #[inline(always)]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    #[inline(always)]
    const fn offset(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

/// Canonical color order, shared by configurations and the Game ID codec.
pub const COLORS: [Color; ROBOT_COUNT] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

impl Color {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Color> {
        COLORS.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown robot color {0:?}")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLORS
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Square grid with per-cell wall flags.
///
/// A flag marks a wall on one side of one cell. Crossing between two
/// neighbours is blocked when either of them carries the flag facing the
/// other, so walls only need to be recorded on one side.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    size: u8,
    walls: Vec<u8>,
}

impl Board {
    pub fn new(size: u8) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) || size % 2 != 0 {
            return Err(BoardError::UnsupportedSize(size));
        }
        let cells = size as usize * size as usize;
        Ok(Board {
            size,
            walls: vec![0u8; cells],
        })
    }

    #[inline(always)]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    #[inline(always)]
    pub fn is_valid(&self, x: i16, y: i16) -> bool {
        let size = self.size as i16;
        x >= 0 && x < size && y >= 0 && y < size
    }

    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    #[inline(always)]
    pub fn to_idx(&self, cell: Cell) -> usize {
        cell.y as usize * self.size as usize + cell.x as usize
    }

    #[inline(always)]
    pub fn cell_at(&self, idx: usize) -> Cell {
        let size = self.size as usize;
        Cell::new((idx % size) as u8, (idx / size) as u8)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(move |idx| self.cell_at(idx))
    }

    #[inline(always)]
    pub fn walls_at(&self, cell: Cell) -> u8 {
        self.walls[self.to_idx(cell)]
    }

    #[inline(always)]
    pub fn has_wall(&self, cell: Cell, dir: Direction) -> bool {
        self.walls_at(cell) & dir.wall_bit() != 0
    }

    pub fn add_wall(&mut self, cell: Cell, dir: Direction) {
        let idx = self.to_idx(cell);
        self.walls[idx] |= dir.wall_bit();
    }

    pub fn set_walls(&mut self, cell: Cell, flags: u8) {
        let idx = self.to_idx(cell);
        self.walls[idx] = flags & (WALL_NORTH | WALL_EAST | WALL_SOUTH | WALL_WEST);
    }

    /// Cells carrying at least one wall flag, row-major.
    pub fn wall_cells(&self) -> impl Iterator<Item = (Cell, u8)> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, &flags)| flags != 0)
            .map(move |(idx, &flags)| (self.cell_at(idx), flags))
    }

    #[inline(always)]
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dx, dy) = dir.offset();
        let x = cell.x as i16 + dx;
        let y = cell.y as i16 + dy;
        self.is_valid(x, y).then(|| Cell::new(x as u8, y as u8))
    }

    /// Neighbour in `dir` if the boundary between the two cells is open.
    #[inline(always)]
    pub fn step(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let next = self.neighbor(cell, dir)?;
        if self.has_wall(cell, dir) || self.has_wall(next, dir.opposite()) {
            return None;
        }
        Some(next)
    }

    pub fn add_border(&mut self) {
        let last = self.size - 1;
        for i in 0..self.size {
            self.add_wall(Cell::new(i, 0), Direction::North);
            self.add_wall(Cell::new(i, last), Direction::South);
            self.add_wall(Cell::new(0, i), Direction::West);
            self.add_wall(Cell::new(last, i), Direction::East);
        }
    }

    /// Top-left cell of the central 2x2 hub.
    #[inline(always)]
    pub fn hub_origin(&self) -> Cell {
        let center = self.size / 2 - 1;
        Cell::new(center, center)
    }

    #[inline(always)]
    pub fn is_hub(&self, cell: Cell) -> bool {
        let origin = self.hub_origin();
        (origin.x..=origin.x + 1).contains(&cell.x) && (origin.y..=origin.y + 1).contains(&cell.y)
    }

    /// Walls the hub off on every outward side so no robot can enter it.
    pub fn add_hub(&mut self) {
        let origin = self.hub_origin();
        for x in origin.x..=origin.x + 1 {
            for y in origin.y..=origin.y + 1 {
                let cell = Cell::new(x, y);
                if x == origin.x {
                    self.add_wall(cell, Direction::West);
                } else {
                    self.add_wall(cell, Direction::East);
                }
                if y == origin.y {
                    self.add_wall(cell, Direction::North);
                } else {
                    self.add_wall(cell, Direction::South);
                }
            }
        }
    }
}

/// Positions of all robots, indexed by color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Configuration {
    cells: [Cell; ROBOT_COUNT],
}

impl Configuration {
    pub const fn new(cells: [Cell; ROBOT_COUNT]) -> Self {
        Configuration { cells }
    }

    #[inline(always)]
    pub fn get(&self, color: Color) -> Cell {
        self.cells[color.index()]
    }

    #[inline(always)]
    pub fn cells(&self) -> &[Cell; ROBOT_COUNT] {
        &self.cells
    }

    /// Copy of this configuration with one robot moved.
    #[inline(always)]
    pub fn with_robot(&self, color: Color, cell: Cell) -> Self {
        let mut cells = self.cells;
        cells[color.index()] = cell;
        Configuration { cells }
    }

    #[inline(always)]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn robot_at(&self, cell: Cell) -> Option<Color> {
        COLORS.iter().copied().find(|&c| self.get(c) == cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, Cell)> + '_ {
        COLORS.iter().map(move |&c| (c, self.get(c)))
    }

    pub fn all_distinct(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, a)| self.cells[i + 1..].iter().all(|b| a != b))
    }
}

impl Index<Color> for Configuration {
    type Output = Cell;

    fn index(&self, color: Color) -> &Cell {
        &self.cells[color.index()]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Target {
    pub cell: Cell,
    pub color: Color,
}

impl Target {
    #[inline(always)]
    pub fn is_reached(&self, robots: &Configuration) -> bool {
        robots.get(self.color) == self.cell
    }
}

/// One completed slide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub color: Color,
    pub direction: Direction,
    pub to: Cell,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.color, self.direction, self.to)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Puzzle {
    pub board: Board,
    pub robots: Configuration,
    pub target: Target,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_odd_and_oversized_boards() {
        assert_eq!(Board::new(7), Err(BoardError::UnsupportedSize(7)));
        assert_eq!(Board::new(18), Err(BoardError::UnsupportedSize(18)));
        assert_eq!(Board::new(2), Err(BoardError::UnsupportedSize(2)));
        assert!(Board::new(8).is_ok());
    }

    #[test]
    fn one_sided_wall_blocks_both_ways() {
        let mut board = Board::new(8).unwrap();
        let a = Cell::new(2, 3);
        let b = Cell::new(3, 3);
        board.add_wall(a, Direction::East);
        assert_eq!(board.step(a, Direction::East), None);
        assert_eq!(board.step(b, Direction::West), None);
        assert_eq!(board.step(b, Direction::East), Some(Cell::new(4, 3)));
    }

    #[test]
    fn hub_is_sealed() {
        let mut board = Board::new(16).unwrap();
        board.add_hub();
        assert_eq!(board.hub_origin(), Cell::new(7, 7));
        assert!(board.is_hub(Cell::new(8, 8)));
        assert!(!board.is_hub(Cell::new(9, 8)));
        assert_eq!(board.step(Cell::new(6, 7), Direction::East), None);
        assert_eq!(board.step(Cell::new(8, 9), Direction::North), None);
        assert_eq!(board.step(Cell::new(7, 7), Direction::East), Some(Cell::new(8, 7)));
    }

    #[test]
    fn idx_round_trips() {
        let board = Board::new(16).unwrap();
        for cell in board.cells() {
            assert_eq!(board.cell_at(board.to_idx(cell)), cell);
        }
        assert_eq!(board.cells().count(), 256);
    }

    #[test]
    fn configuration_moves_by_value() {
        let start = Configuration::new([
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(2, 0),
            Cell::new(3, 0),
        ]);
        let moved = start.with_robot(Color::Green, Cell::new(2, 5));
        assert_eq!(start[Color::Green], Cell::new(2, 0));
        assert_eq!(moved[Color::Green], Cell::new(2, 5));
        assert_eq!(moved.robot_at(Cell::new(1, 0)), Some(Color::Blue));
        assert!(moved.all_distinct());
        assert!(!start.with_robot(Color::Red, Cell::new(3, 0)).all_distinct());
    }

    #[test]
    fn parses_colors() {
        assert_eq!("Yellow".parse::<Color>(), Ok(Color::Yellow));
        assert!("purple".parse::<Color>().is_err());
        assert_eq!(Color::from_index(1), Some(Color::Blue));
        assert_eq!(Color::from_index(4), None);
    }
}
