//! GameConfig - who plays, on what board, with which search settings

use crate::ai::{SearchConfig, DEFAULT_DEPTH, TERMINAL_SCORE};
use crate::board::Player;
use crate::player::{HexPlayer, RandomPlayer, SearchPlayer};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BOARD_SIZE: usize = 7;

/// Kind of player occupying a seat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Alpha-beta search
    #[default]
    Search,
    /// Uniform random choice
    Random,
}

/// Settings for a game or match (JSON-loadable)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length
    pub size: usize,
    /// Plies searched before the heuristic takes over
    pub depth: u32,
    /// Score for an already-connected position
    pub terminal_score: f32,
    pub player1: PlayerKind,
    pub player2: PlayerKind,
    /// Seed for random players (None = 42)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            depth: DEFAULT_DEPTH,
            terminal_score: TERMINAL_SCORE,
            player1: PlayerKind::Search,
            player2: PlayerKind::Random,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Search settings for search-driven seats
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::with_depth(self.depth).with_terminal_score(self.terminal_score)
    }

    /// Seat kind for a side
    pub fn kind_for(&self, player: Player) -> PlayerKind {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Instantiate the player for a side. `seed_offset` varies random seats between games.
    pub fn build_player(&self, player: Player, seed_offset: u64) -> Box<dyn HexPlayer> {
        build_player(self.kind_for(player), player, self, seed_offset)
    }
}

/// Create a boxed player of the given kind
pub fn build_player(
    kind: PlayerKind,
    id: Player,
    config: &GameConfig,
    seed_offset: u64,
) -> Box<dyn HexPlayer> {
    match kind {
        PlayerKind::Search => Box::new(SearchPlayer::new(id, config.search_config())),
        PlayerKind::Random => {
            let seed = config
                .seed
                .unwrap_or(42)
                .wrapping_add(seed_offset)
                .wrapping_add(id.id() as u64);
            Box::new(RandomPlayer::with_seed(id, seed))
        }
    }
}
