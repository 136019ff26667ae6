use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::ops;
use serde::{Deserialize, Serialize};

/// Side length of the board. Fixed at 4.
pub const SIZE: usize = 4;

pub type Tile = u32;
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// True for moves whose lines are walked from the far edge (Right/Down),
    /// so that merging always compacts toward index 0 of the walked line.
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Move::Left | Move::Right)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("unknown direction {0:?} (expected up/down/left/right)")]
    Unknown(String),
}

/// Accepts `up`/`down`/`left`/`right` and browser key names (`ArrowUp`, ...),
/// case-insensitively.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let name = key.strip_prefix("arrow").unwrap_or(&key);
        match name {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            _ => Err(ParseMoveError::Unknown(s.to_string())),
        }
    }
}

/// A cell position on the board, zero-based from the top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Row-major index in `0..16`.
    #[inline]
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }
}

/// The 4x4 board of tile values. `0` is an empty cell; anything else is a
/// power of two.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid([[Tile; SIZE]; SIZE]);

impl Grid {
    /// A constant empty board (all zeros).
    pub const EMPTY: Grid = Grid([[0; SIZE]; SIZE]);

    #[inline]
    pub const fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Self {
        Grid(rows)
    }

    #[inline]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Tile {
        self.0[at.row][at.col]
    }

    #[inline]
    pub fn set(&mut self, at: Coord, value: Tile) {
        self.0[at.row][at.col] = value;
    }

    /// Iterate `(Coord, value)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &value)| (Coord::new(row, col), value))
        })
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells().filter(|&(_, v)| v == 0).map(|(at, _)| at)
    }

    pub fn count_empty(&self) -> usize {
        self.empty_cells().count()
    }

    pub fn count_non_empty(&self) -> usize {
        SIZE * SIZE - self.count_empty()
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells().map(|(_, v)| u64::from(v)).sum()
    }

    /// Highest tile value on the board (0 on an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.cells().map(|(_, v)| v).max().unwrap_or(0)
    }

    /// Return the grid resulting from sliding/merging tiles in `dir`, together
    /// with what the move did. No random insert.
    #[inline]
    pub fn shift(&self, dir: Move) -> (Grid, MoveOutcome) {
        ops::shift(self, dir)
    }

    /// True while at least one move would change the board.
    #[inline]
    pub fn can_move(&self) -> bool {
        ops::can_move(self)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Grid").field(&self.0).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{:^7}", v),
    }
}

/// What a single move did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// True if any cell differs from the pre-move board.
    pub changed: bool,
    /// Cells where a merged tile landed, in line order.
    pub merged: Vec<Coord>,
    /// Score earned by the move: the sum of every doubled value.
    pub gained: Score,
}

/// Board plus running score for one game.
///
/// The random source is passed in by the caller on every call that needs one,
/// so a seeded generator replays a game exactly.
///
/// ```
/// use slide_2048::engine::{GameState, Move};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut game = GameState::new(&mut rng);
/// assert_eq!(game.grid().count_non_empty(), 2);
///
/// let outcome = game.shift(Move::Left);
/// if outcome.changed {
///     game.spawn_random(&mut rng);
/// }
/// assert!(game.can_move());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    grid: Grid,
    score: Score,
}

impl GameState {
    /// Start a fresh game: empty board, zero score, two random tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut state = GameState::default();
        state.init(rng);
        state
    }

    /// Build a state from an arbitrary board and score (no spawning).
    pub fn from_parts(grid: Grid, score: Score) -> Self {
        GameState { grid, score }
    }

    /// Reset board and score, then spawn two tiles. Returns where they landed.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) -> [Option<Coord>; 2] {
        self.grid = Grid::EMPTY;
        self.score = 0;
        let first = self.spawn_random(rng);
        let second = self.spawn_random(rng);
        [first, second]
    }

    /// Insert a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
    ///
    /// Returns `None` without touching the board when it is full.
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        ops::insert_random_tile(&mut self.grid, rng)
    }

    /// Slide/merge every line toward `dir`, adding merge values to the score.
    pub fn shift(&mut self, dir: Move) -> MoveOutcome {
        let (next, outcome) = ops::shift(&self.grid, dir);
        if outcome.changed {
            self.grid = next;
            self.score += outcome.gained;
        }
        outcome
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        ops::can_move(&self.grid)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }
}
