//! Authoritative game state and the turn loop

use crate::board::{Board, Move, Player};
use crate::connectivity::Connectivity;
use crate::error::HexError;
use crate::player::HexPlayer;
use serde::{Deserialize, Serialize};

/// What a confirmed placement led to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    Won(Player),
}

/// Finished game summary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub winner: Player,
    pub moves: Vec<(Player, Move)>,
    pub board: Board,
}

impl GameRecord {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// A game in progress. Player 1 moves first.
#[derive(Clone, Debug)]
pub struct Game {
    index: Connectivity,
    to_move: Player,
    history: Vec<(Player, Move)>,
    winner: Option<Player>,
}

impl Game {
    pub fn new(size: usize) -> Result<Self, HexError> {
        Ok(Self::from_board(&Board::new(size)?, Player::One))
    }

    /// Resume from an arbitrary position
    pub fn from_board(board: &Board, to_move: Player) -> Self {
        let index = Connectivity::build(board);
        let winner = [Player::One, Player::Two]
            .into_iter()
            .find(|&p| index.has_connected(p));
        Self {
            index,
            to_move,
            history: Vec::new(),
            winner,
        }
    }

    pub fn board(&self) -> &Board {
        self.index.board()
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn history(&self) -> &[(Player, Move)] {
        &self.history
    }

    pub fn has_connected(&self, player: Player) -> bool {
        self.index.has_connected(player)
    }

    /// Place a stone for the side to move. Invalid moves leave the game unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, HexError> {
        if let Some(winner) = self.winner {
            return Ok(MoveOutcome::Won(winner));
        }

        let player = self.to_move;
        self.index.place_piece(mv.row, mv.col, player)?;
        self.history.push((player, mv));
        tracing::debug!("{} plays {}", player, mv);

        if self.index.has_connected(player) {
            self.winner = Some(player);
            return Ok(MoveOutcome::Won(player));
        }

        self.to_move = player.opponent();
        Ok(MoveOutcome::Continue)
    }

    /// Ask the side to move for a move and apply it
    pub fn step(&mut self, player: &mut dyn HexPlayer) -> Result<(Move, MoveOutcome), HexError> {
        let mv = player.play(self.board()).ok_or(HexError::NoLegalMoves)?;
        let outcome = self.apply(mv)?;
        Ok((mv, outcome))
    }

    fn into_record(self, winner: Player) -> GameRecord {
        GameRecord {
            winner,
            moves: self.history,
            board: self.index.board().clone(),
        }
    }
}

/// Play a full game between two players, calling `on_move` after every placement
pub fn play_game_with(
    size: usize,
    player1: &mut dyn HexPlayer,
    player2: &mut dyn HexPlayer,
    mut on_move: impl FnMut(&Game, Player, Move),
) -> Result<GameRecord, HexError> {
    let mut game = Game::new(size)?;

    loop {
        let side = game.to_move();
        let current: &mut dyn HexPlayer = match side {
            Player::One => &mut *player1,
            Player::Two => &mut *player2,
        };

        let (mv, outcome) = game.step(current)?;
        on_move(&game, side, mv);

        if let MoveOutcome::Won(winner) = outcome {
            tracing::info!("{} wins after {} moves", winner, game.history().len());
            return Ok(game.into_record(winner));
        }
    }
}

/// Play a full game between two players
pub fn play_game(
    size: usize,
    player1: &mut dyn HexPlayer,
    player2: &mut dyn HexPlayer,
) -> Result<GameRecord, HexError> {
    play_game_with(size, player1, player2, |_, _, _| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SearchConfig;
    use crate::player::{RandomPlayer, SearchPlayer};

    /// Replays a fixed list of moves
    struct Scripted {
        id: Player,
        moves: Vec<Move>,
    }

    impl HexPlayer for Scripted {
        fn id(&self) -> Player {
            self.id
        }

        fn play(&mut self, _board: &Board) -> Option<Move> {
            if self.moves.is_empty() {
                None
            } else {
                Some(self.moves.remove(0))
            }
        }
    }

    #[test]
    fn test_apply_alternates_and_detects_win() {
        let mut game = Game::new(2).unwrap();
        assert_eq!(game.apply(Move::new(0, 0)).unwrap(), MoveOutcome::Continue);
        assert_eq!(game.to_move(), Player::Two);
        assert_eq!(game.apply(Move::new(1, 0)).unwrap(), MoveOutcome::Continue);
        assert_eq!(game.apply(Move::new(0, 1)).unwrap(), MoveOutcome::Won(Player::One));
        assert_eq!(game.winner(), Some(Player::One));
        assert!(game.board().has_connected(Player::One));
    }

    #[test]
    fn test_invalid_move_keeps_state() {
        let mut game = Game::new(3).unwrap();
        game.apply(Move::new(1, 1)).unwrap();
        let err = game.apply(Move::new(1, 1)).unwrap_err();
        assert!(matches!(err, HexError::InvalidMove { row: 1, col: 1, .. }));
        assert_eq!(game.to_move(), Player::Two);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_scripted_game_records_moves() {
        let mut p1 = Scripted {
            id: Player::One,
            moves: vec![Move::new(0, 0), Move::new(0, 1)],
        };
        let mut p2 = Scripted {
            id: Player::Two,
            moves: vec![Move::new(1, 0)],
        };

        let record = play_game(2, &mut p1, &mut p2).unwrap();
        assert_eq!(record.winner, Player::One);
        assert_eq!(
            record.moves,
            vec![
                (Player::One, Move::new(0, 0)),
                (Player::Two, Move::new(1, 0)),
                (Player::One, Move::new(0, 1)),
            ]
        );
    }

    #[test]
    fn test_player_without_move_reports_no_legal_moves() {
        let mut p1 = Scripted {
            id: Player::One,
            moves: vec![Move::new(1, 1)],
        };
        let mut p2 = Scripted {
            id: Player::Two,
            moves: vec![],
        };
        assert_eq!(play_game(3, &mut p1, &mut p2).unwrap_err(), HexError::NoLegalMoves);
    }

    #[test]
    fn test_illegal_player_aborts() {
        let mut p1 = Scripted {
            id: Player::One,
            moves: vec![Move::new(0, 0)],
        };
        let mut p2 = Scripted {
            id: Player::Two,
            moves: vec![Move::new(0, 0)],
        };
        let err = play_game(3, &mut p1, &mut p2).unwrap_err();
        assert!(matches!(err, HexError::InvalidMove { .. }));
    }

    #[test]
    fn test_random_games_always_finish() {
        for seed in 0..20 {
            let mut p1 = RandomPlayer::with_seed(Player::One, seed);
            let mut p2 = RandomPlayer::with_seed(Player::Two, seed + 100);
            let record = play_game(5, &mut p1, &mut p2).unwrap();

            assert!(record.board.has_connected(record.winner));
            assert!(!record.board.has_connected(record.winner.opponent()));
            assert_eq!(record.moves[0].0, Player::One);
            assert_eq!(record.moves.last().map(|m| m.0), Some(record.winner));
        }
    }

    #[test]
    fn test_search_beats_random_on_small_board() {
        let mut wins = 0;
        for seed in 0..4 {
            let config = SearchConfig::default().with_terminal_score(100.0);
            let mut p1 = SearchPlayer::new(Player::One, config);
            let mut p2 = RandomPlayer::with_seed(Player::Two, seed);
            let record = play_game(4, &mut p1, &mut p2).unwrap();
            if record.winner == Player::One {
                wins += 1;
            }
        }
        assert!(wins >= 3, "search won only {} of 4", wins);
    }

    #[test]
    fn test_on_move_sees_each_placement() {
        let mut p1 = RandomPlayer::with_seed(Player::One, 1);
        let mut p2 = RandomPlayer::with_seed(Player::Two, 2);
        let mut seen = Vec::new();
        let record = play_game_with(3, &mut p1, &mut p2, |game, side, mv| {
            assert_eq!(game.history().last(), Some(&(side, mv)));
            seen.push(mv);
        })
        .unwrap();
        assert_eq!(seen.len(), record.len());
    }
}
