//! Match command - play a series of games between two player kinds
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use hexgame_core::config::build_player;
use hexgame_core::{play_game, GameConfig, Move, Player, PlayerKind};

use crate::settings::SettingsArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Number of games to play (seats alternate)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which entrant took a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
enum Entrant {
    /// The kind configured as player 1
    A,
    /// The kind configured as player 2
    B,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameSummary {
    game_number: usize,
    first_player: Entrant,
    winner: Entrant,
    winning_seat: Player,
    moves: Vec<(Player, Move)>,
}

impl GameSummary {
    fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    entrant_a: PlayerKind,
    entrant_b: PlayerKind,
    games: Vec<GameSummary>,
    a_wins: usize,
    b_wins: usize,
    first_player_wins: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Resolve configuration
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs) -> Result<()> {
    let config = args.settings.resolve()?;

    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games, {}x{}, depth={})",
        config.player1,
        config.player2,
        args.games,
        config.size,
        config.size,
        config.depth
    );

    let results = play_match(&config, args.games)?;

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(config: &GameConfig, games: usize) -> Result<MatchResults> {
    let mut summaries = Vec::with_capacity(games);

    for game_num in 0..games {
        // Alternate seats for fairness
        let first_player = if game_num % 2 == 0 { Entrant::A } else { Entrant::B };

        let summary = play_single_game(config, game_num + 1, first_player)
            .with_context(|| format!("Game {} failed", game_num + 1))?;

        tracing::info!(
            "Game {}: {:?} wins as {} ({} moves)",
            summary.game_number,
            summary.winner,
            summary.winning_seat,
            summary.move_count()
        );

        summaries.push(summary);
    }

    Ok(compute_match_statistics(config, summaries))
}

/// Report match results
fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        print_json_results(results)?;
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game with `first_player` occupying the Player 1 seat
fn play_single_game(
    config: &GameConfig,
    game_number: usize,
    first_player: Entrant,
) -> Result<GameSummary> {
    let (kind_one, kind_two) = match first_player {
        Entrant::A => (config.player1, config.player2),
        Entrant::B => (config.player2, config.player1),
    };

    let offset = game_number as u64;
    let mut player1 = build_player(kind_one, Player::One, config, offset);
    let mut player2 = build_player(kind_two, Player::Two, config, offset);

    let record = play_game(config.size, player1.as_mut(), player2.as_mut())?;

    let winner = match (first_player, record.winner) {
        (Entrant::A, Player::One) | (Entrant::B, Player::Two) => Entrant::A,
        _ => Entrant::B,
    };

    Ok(GameSummary {
        game_number,
        first_player,
        winner,
        winning_seat: record.winner,
        moves: record.moves,
    })
}

/// Compute aggregate statistics from game summaries
fn compute_match_statistics(config: &GameConfig, games: Vec<GameSummary>) -> MatchResults {
    let a_wins = games.iter().filter(|g| g.winner == Entrant::A).count();
    let b_wins = games.iter().filter(|g| g.winner == Entrant::B).count();
    let first_player_wins = games
        .iter()
        .filter(|g| g.winning_seat == Player::One)
        .count();

    let total_moves: usize = games.iter().map(|g| g.move_count()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        entrant_a: config.player1,
        entrant_b: config.player2,
        games,
        a_wins,
        b_wins,
        first_player_wins,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    println!("{}", render_json(results)?);
    Ok(())
}

/// Pretty JSON report of a match
fn render_json(results: &MatchResults) -> Result<String> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        first_player: Entrant,
        winner: Entrant,
        winning_seat: Player,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        entrant_a: PlayerKind,
        entrant_b: PlayerKind,
        total_games: usize,
        a_wins: usize,
        b_wins: usize,
        first_player_wins: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        entrant_a: results.entrant_a,
        entrant_b: results.entrant_b,
        total_games: results.games.len(),
        a_wins: results.a_wins,
        b_wins: results.b_wins,
        first_player_wins: results.first_player_wins,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                first_player: g.first_player,
                winner: g.winner,
                winning_seat: g.winning_seat,
                moves: g.move_count(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output).context("Failed to serialize match results")
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "A ({:?}) wins: {} ({:.1}%)",
        results.entrant_a,
        results.a_wins,
        percent(results.a_wins, total)
    );
    println!(
        "B ({:?}) wins: {} ({:.1}%)",
        results.entrant_b,
        results.b_wins,
        percent(results.b_wins, total)
    );
    println!(
        "First-player wins: {} ({:.1}%)",
        results.first_player_wins,
        percent(results.first_player_wins, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} moved first, {:?} won as {} in {} moves",
            game.game_number,
            game.first_player,
            game.winner,
            game.winning_seat,
            game.move_count()
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
