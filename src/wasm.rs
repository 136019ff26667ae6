//! Browser binding. The page owns rendering and key listeners; it forwards
//! `KeyboardEvent.key` strings here and reads back flat row-major arrays.

use wasm_bindgen::prelude::*;

use crate::engine::Coord;
use crate::session::{Session, Turn};

#[wasm_bindgen]
pub struct WasmGame {
    session: Session,
    last_merged: Vec<u32>,
    last_spawned: Vec<u32>,
}

fn flat(at: Coord) -> u32 {
    at.index() as u32
}

#[wasm_bindgen]
impl WasmGame {
    /// Seed comes from the page (e.g. `Math.random() * 2 ** 32`).
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WasmGame {
        let mut game = WasmGame {
            session: Session::from_seed(u64::from(seed)),
            last_merged: Vec::new(),
            last_spawned: Vec::new(),
        };
        game.new_game();
        game
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        let spawned = self.session.new_game();
        self.last_merged.clear();
        self.last_spawned = spawned.into_iter().flatten().map(flat).collect();
    }

    /// Returns true when the board changed and should be redrawn.
    ///
    /// An unknown key becomes a `JsError`, which can only be constructed on
    /// wasm32; native tests cover the same rejection via `Session::handle_key`.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> Result<bool, JsError> {
        let turn = self
            .session
            .handle_key(key)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(self.record(turn))
    }

    /// Tile values, row-major, 0 for empty.
    pub fn cells(&self) -> Vec<u32> {
        self.session.grid().cells().map(|(_, v)| v).collect()
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    /// Flat indices where merges landed on the last accepted move.
    #[wasm_bindgen(js_name = lastMerged)]
    pub fn last_merged(&self) -> Vec<u32> {
        self.last_merged.clone()
    }

    /// Flat indices of tiles spawned by the last accepted move or new game.
    #[wasm_bindgen(js_name = lastSpawned)]
    pub fn last_spawned(&self) -> Vec<u32> {
        self.last_spawned.clone()
    }
}

impl WasmGame {
    fn record(&mut self, turn: Turn) -> bool {
        match turn {
            Turn::Moved { outcome, spawned, .. } => {
                self.last_merged = outcome.merged.into_iter().map(flat).collect();
                self.last_spawned = spawned.into_iter().map(flat).collect();
                true
            }
            Turn::Ignored | Turn::Blocked => false,
        }
    }
}
