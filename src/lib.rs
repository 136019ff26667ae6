//! slide-2048: the game-logic core of a 2048-style sliding tile puzzle.
//!
//! This crate provides:
//! - A 4x4 `Grid` and `GameState` with the four game operations
//!   (`init`, `spawn_random`, `shift`, `can_move`) in the `engine` module
//! - A `Session` controller that drives move -> spawn -> game-over checks and
//!   owns the Active/Terminal phase (`session` module)
//! - TOML host configuration with key bindings (`config` module)
//! - A browser binding behind the `wasm` feature
//!
//! Quick start:
//! ```
//! use slide_2048::engine::{GameState, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = GameState::new(&mut rng);
//! let outcome = game.shift(Move::Left);
//! if outcome.changed {
//!     game.spawn_random(&mut rng);
//! }
//! assert_eq!(game.score(), outcome.gained);
//! ```
//!
//! Full loop (what a host does per keypress):
//! ```
//! use slide_2048::engine::Move;
//! use slide_2048::session::{Session, Turn};
//!
//! let mut session = Session::from_seed(123);
//! let mut moves = 0u32;
//! while !session.is_over() && moves < 16 {
//!     for dir in Move::ALL {
//!         if let Turn::Moved { game_over, .. } = session.play(dir) {
//!             moves += 1;
//!             if game_over {
//!                 break;
//!             }
//!         }
//!     }
//! }
//! assert!(session.moves() > 0);
//! ```
//!
pub mod config;
pub mod engine;
pub mod session;
#[cfg(feature = "wasm")]
pub mod wasm;
