//! HEXGAME Core - Hex engine and AI
//!
//! This crate provides the core logic for the connection game Hex:
//! - Board geometry (N×N rhombus, six-neighbor adjacency)
//! - Incremental win detection with union-find and virtual edge nodes
//! - Shortest-path evaluation (0/1-weight Dijkstra)
//! - Depth-limited alpha-beta search
//! - Random and search-driven players, and the game loop

pub mod board;
pub mod connectivity;
pub mod eval;
pub mod ai;
pub mod player;
pub mod game;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Move, Player, NEIGHBOR_OFFSETS};
pub use connectivity::Connectivity;
pub use eval::{evaluate, min_plays_to_win};
pub use ai::{depth_cutoff, SearchConfig, SearchEngine, SearchOutcome, SearchStats};
pub use player::{HexPlayer, RandomPlayer, SearchPlayer};
pub use game::{play_game, play_game_with, Game, GameRecord, MoveOutcome};
pub use config::{GameConfig, PlayerKind};
pub use error::{HexError, InvalidMoveReason};
