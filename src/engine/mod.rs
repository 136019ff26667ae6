//! Engine module: the 4x4 board, slide/merge moves, tile spawning and the
//! game-over predicate. Everything here is pure state transition; the only
//! nondeterminism is the caller-supplied RNG used for spawns.
//!
//! - `GameState` is board + score with the operations a host drives.
//! - `Grid` is the bare board; free functions mirror its methods.
//! - Line-level work lives in `ops` to keep things tidy.

mod ops;
pub mod state;

pub use state::{Coord, GameState, Grid, Move, MoveOutcome, ParseMoveError, Score, Tile, SIZE};

pub use ops::{can_move, insert_random_tile, is_game_over, shift, slide_line, LineSlide};
