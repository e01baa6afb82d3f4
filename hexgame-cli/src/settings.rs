//! Shared command-line settings layered over an optional config file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hexgame_core::{GameConfig, PlayerKind};

/// Seat kind as accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeatArg {
    Search,
    Random,
}

impl From<SeatArg> for PlayerKind {
    fn from(seat: SeatArg) -> Self {
        match seat {
            SeatArg::Search => PlayerKind::Search,
            SeatArg::Random => PlayerKind::Random,
        }
    }
}

/// Flags common to every command. Unset flags fall back to the config file,
/// then to built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct SettingsArgs {
    /// JSON game configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board side length
    #[arg(long)]
    pub size: Option<usize>,

    /// Search depth in plies
    #[arg(long)]
    pub depth: Option<u32>,

    /// Score given to an already-connected position
    #[arg(long)]
    pub terminal_score: Option<f32>,

    /// Player 1 kind
    #[arg(long, value_enum)]
    pub player1: Option<SeatArg>,

    /// Player 2 kind
    #[arg(long, value_enum)]
    pub player2: Option<SeatArg>,

    /// Seed for random players (drawn at random when absent)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SettingsArgs {
    /// Merge flags over the config file (or defaults)
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(score) = self.terminal_score {
            config.terminal_score = score;
        }
        if let Some(seat) = self.player1 {
            config.player1 = seat.into();
        }
        if let Some(seat) = self.player2 {
            config.player2 = seat.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if config.seed.is_none() {
            let seed = rand::random();
            tracing::info!("Using random seed {}", seed);
            config.seed = Some(seed);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let path = std::env::temp_dir().join(format!("hexgame-cli-settings-{}.json", std::process::id()));
        let file = GameConfig {
            size: 9,
            depth: 3,
            seed: Some(5),
            ..Default::default()
        };
        file.save(&path).unwrap();

        let args = SettingsArgs {
            config: Some(path.clone()),
            depth: Some(1),
            player2: Some(SeatArg::Search),
            ..Default::default()
        };
        let resolved = args.resolve().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(resolved.size, 9);
        assert_eq!(resolved.depth, 1);
        assert_eq!(resolved.player2, PlayerKind::Search);
        assert_eq!(resolved.seed, Some(5));
    }

    #[test]
    fn test_missing_seed_is_filled() {
        let resolved = SettingsArgs::default().resolve().unwrap();
        assert!(resolved.seed.is_some());
        assert_eq!(resolved.size, GameConfig::default().size);
    }

    #[test]
    fn test_bad_config_path_has_context() {
        let args = SettingsArgs {
            config: Some(PathBuf::from("/nonexistent/hexgame.json")),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
