//! Move choosers that can sit at a Hex board

use crate::ai::{SearchConfig, SearchEngine};
use crate::board::{Board, Move, Player};
use crate::connectivity::Connectivity;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Anything that can pick a move for one side
pub trait HexPlayer {
    /// Side this player controls
    fn id(&self) -> Player;

    /// Choose an empty cell. None only when the board is full.
    fn play(&mut self, board: &Board) -> Option<Move>;
}

/// Uniformly random mover with its own seeded generator
pub struct RandomPlayer {
    id: Player,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(id: Player) -> Self {
        Self::with_seed(id, 42)
    }

    pub fn with_seed(id: Player, seed: u64) -> Self {
        Self {
            id,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl HexPlayer for RandomPlayer {
    fn id(&self) -> Player {
        self.id
    }

    fn play(&mut self, board: &Board) -> Option<Move> {
        board.possible_moves().choose(&mut self.rng).copied()
    }
}

/// Alpha-beta player
pub struct SearchPlayer {
    id: Player,
    engine: SearchEngine,
}

impl SearchPlayer {
    pub fn new(id: Player, config: SearchConfig) -> Self {
        Self {
            id,
            engine: SearchEngine::new(config),
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    fn search(&self, root: &Connectivity) -> Option<Move> {
        #[cfg(feature = "parallel")]
        let outcome = self.engine.search_parallel(root, self.id);
        #[cfg(not(feature = "parallel"))]
        let outcome = self.engine.search(root, self.id);
        outcome.best_move
    }
}

impl HexPlayer for SearchPlayer {
    fn id(&self) -> Player {
        self.id
    }

    fn play(&mut self, board: &Board) -> Option<Move> {
        let root = Connectivity::build(board);
        self.search(&root).or_else(|| {
            // Lost or terminal root: any legal move will do
            let fallback = root.possible_moves().first().copied();
            tracing::debug!("{} search found no move, falling back to {:?}", self.id, fallback);
            fallback
        })
    }
}
