//! Play command - one game, rendered move by move

use anyhow::{Context, Result};
use clap::Args;

use hexgame_core::{play_game_with, GameConfig, Player};

use crate::settings::SettingsArgs;

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Only print the final board and result
    #[arg(long)]
    pub quiet: bool,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = args.settings.resolve()?;

    tracing::info!(
        "Starting game: {:?} vs {:?} on {}x{} (depth={})",
        config.player1,
        config.player2,
        config.size,
        config.size,
        config.depth
    );

    let record = play_single(&config, args.quiet)?;

    if args.quiet {
        println!("{}", record.board);
    }
    println!("{} wins in {} moves!", record.winner, record.len());

    Ok(())
}

fn play_single(config: &GameConfig, quiet: bool) -> Result<hexgame_core::GameRecord> {
    let mut player1 = config.build_player(Player::One, 0);
    let mut player2 = config.build_player(Player::Two, 0);

    play_game_with(
        config.size,
        player1.as_mut(),
        player2.as_mut(),
        |game, side, mv| {
            if !quiet {
                println!("{} plays {}", side, mv);
                println!("{}", game.board());
            }
        },
    )
    .context("Game aborted")
}
