//! Session controller: owns one game's state, its random source and the
//! Active/Terminal phase, and drives move -> spawn -> game-over check for
//! every input a host feeds it.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::{Coord, GameState, Grid, Move, MoveOutcome, ParseMoveError, Score, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Active,
    /// No legal move remains. Absorbing until `Session::new_game`.
    Terminal,
}

/// What one input did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The game is over; input was dropped.
    Ignored,
    /// The move changed nothing: no spawn, no score change.
    Blocked,
    Moved {
        outcome: MoveOutcome,
        spawned: Option<Coord>,
        game_over: bool,
    },
}

impl Turn {
    /// True if the board changed.
    pub fn changed(&self) -> bool {
        matches!(self, Turn::Moved { .. })
    }
}

/// One game session.
///
/// ```
/// use slide_2048::engine::Move;
/// use slide_2048::session::{Phase, Session, Turn};
///
/// let mut session = Session::from_seed(123);
/// assert_eq!(session.phase(), Phase::Active);
/// for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
///     if let Turn::Moved { spawned, .. } = session.play(dir) {
///         assert!(spawned.is_some());
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    state: GameState,
    rng: R,
    phase: Phase,
    moves: u64,
}

impl Session<StdRng> {
    /// Deterministic session: the same seed replays the same spawns.
    pub fn from_seed(seed: u64) -> Self {
        Session::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Session::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    /// Take ownership of `rng` and start the first game.
    pub fn new(rng: R) -> Self {
        let mut session = Session {
            state: GameState::default(),
            rng,
            phase: Phase::Active,
            moves: 0,
        };
        session.new_game();
        session
    }

    /// Throw away the current game and start over. Returns the two spawns.
    pub fn new_game(&mut self) -> [Option<Coord>; 2] {
        let spawned = self.state.init(&mut self.rng);
        self.phase = Phase::Active;
        self.moves = 0;
        info!("new game started: spawned {:?}", spawned);
        spawned
    }

    /// Apply one move.
    pub fn play(&mut self, dir: Move) -> Turn {
        if self.phase == Phase::Terminal {
            debug!("ignoring {dir}: game is over");
            return Turn::Ignored;
        }

        let outcome = self.state.shift(dir);
        if !outcome.changed {
            debug!("{dir} changed nothing");
            return Turn::Blocked;
        }

        self.moves += 1;
        let spawned = self.state.spawn_random(&mut self.rng);
        let game_over = !self.state.can_move();
        debug!(
            "move {} ({dir}): +{} merged={:?} spawned={:?}",
            self.moves, outcome.gained, outcome.merged, spawned
        );
        if game_over {
            self.phase = Phase::Terminal;
            info!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.state.score(),
                self.state.grid().highest_tile()
            );
        }
        Turn::Moved { outcome, spawned, game_over }
    }

    /// Resolve a key name (see `Move::from_str`) and play it.
    pub fn handle_key(&mut self, key: &str) -> Result<Turn, ParseMoveError> {
        let dir: Move = key.parse()?;
        Ok(self.play(dir))
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.state.score()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Accepted (board-changing) moves in the current game.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.state.grid().highest_tile()
    }
}
