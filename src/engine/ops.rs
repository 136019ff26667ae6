use rand::Rng;

use super::state::{Coord, Grid, Move, MoveOutcome, Score, Tile, SIZE};

/// Result of sliding a single line toward index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlide {
    pub line: [Tile; SIZE],
    /// Final positions (in the slid line) of tiles produced by a merge.
    pub merged: Vec<usize>,
    pub gained: Score,
}

/// Compact a line toward index 0, merging equal neighbours once.
///
/// Single pass: a freshly merged tile never merges again in the same move, so
/// `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
pub fn slide_line(line: [Tile; SIZE]) -> LineSlide {
    let mut packed: Vec<Tile> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut merged = Vec::new();
    let mut gained: Score = 0;
    for i in 0..packed.len().saturating_sub(1) {
        if packed[i] != 0 && packed[i] == packed[i + 1] {
            packed[i] *= 2;
            packed[i + 1] = 0;
            gained += Score::from(packed[i]);
            // every earlier merge left one hole in front of this tile
            merged.push(i - merged.len());
        }
    }

    let mut out = [0; SIZE];
    for (slot, v) in out.iter_mut().zip(packed.into_iter().filter(|&v| v != 0)) {
        *slot = v;
    }
    LineSlide { line: out, merged, gained }
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(grid: &Grid, dir: Move) -> (Grid, MoveOutcome) {
    let mut next = *grid;
    let mut merged = Vec::new();
    let mut gained: Score = 0;
    for line_idx in 0..SIZE {
        let slid = slide_line(extract_line(grid, dir, line_idx));
        write_line(&mut next, dir, line_idx, slid.line);
        merged.extend(slid.merged.iter().map(|&pos| line_coord(dir, line_idx, pos)));
        gained += slid.gained;
    }
    let changed = next != *grid;
    (next, MoveOutcome { changed, merged, gained })
}

/// Map a position along a walked line back to its board coordinate.
///
/// Lines are walked in the direction of travel, so position 0 is always the
/// edge tiles slide toward.
pub(crate) fn line_coord(dir: Move, line_idx: usize, pos: usize) -> Coord {
    let along = if dir.is_reversed() { SIZE - 1 - pos } else { pos };
    if dir.is_horizontal() {
        Coord::new(line_idx, along)
    } else {
        Coord::new(along, line_idx)
    }
}

pub(crate) fn extract_line(grid: &Grid, dir: Move, line_idx: usize) -> [Tile; SIZE] {
    std::array::from_fn(|pos| grid.get(line_coord(dir, line_idx, pos)))
}

fn write_line(grid: &mut Grid, dir: Move, line_idx: usize, line: [Tile; SIZE]) {
    for (pos, &v) in line.iter().enumerate() {
        grid.set(line_coord(dir, line_idx, pos), v);
    }
}

/// True if an empty cell or an equal horizontal/vertical neighbour pair exists.
pub fn can_move(grid: &Grid) -> bool {
    let rows = grid.rows();
    for r in 0..SIZE {
        for c in 0..SIZE {
            let v = rows[r][c];
            if v == 0 {
                return true;
            }
            if c + 1 < SIZE && v == rows[r][c + 1] {
                return true;
            }
            if r + 1 < SIZE && v == rows[r + 1][c] {
                return true;
            }
        }
    }
    false
}

/// True if no legal moves remain.
#[inline]
pub fn is_game_over(grid: &Grid) -> bool {
    !can_move(grid)
}

/// Insert a random 2 (90%) or 4 (10%) tile into a random empty cell.
pub fn insert_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Coord> {
    let empty: Vec<Coord> = grid.empty_cells().collect();
    if empty.is_empty() {
        return None;
    }
    let at = empty[rng.gen_range(0..empty.len())];
    grid.set(at, generate_random_tile(rng));
    Some(at)
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}
