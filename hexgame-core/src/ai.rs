//! Depth-limited minimax with alpha-beta pruning

use crate::board::{Board, Move, Player};
use crate::connectivity::Connectivity;
use crate::eval::evaluate;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Plies searched before the heuristic takes over
pub const DEFAULT_DEPTH: u32 = 2;

/// Magnitude returned when a side has already connected
pub const TERMINAL_SCORE: f32 = 1.0;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Decides whether to stop recursing at a node: (board, depth) -> stop
pub type CutoffFn = dyn Fn(&Board, u32) -> bool + Send + Sync;

/// Scores a leaf from the searching player's view: (board, player) -> score
pub type HeuristicFn = dyn Fn(&Board, Player) -> f32 + Send + Sync;

/// Stop once `max_depth` plies have been played from the root
pub fn depth_cutoff(max_depth: u32) -> impl Fn(&Board, u32) -> bool + Send + Sync + 'static {
    move |_, depth| depth >= max_depth
}

/// Pluggable search policy
#[derive(Clone)]
pub struct SearchConfig {
    cutoff: Arc<CutoffFn>,
    heuristic: Arc<HeuristicFn>,
    pub terminal_score: f32,
}

impl SearchConfig {
    pub fn new<C, H>(cutoff: C, heuristic: H) -> Self
    where
        C: Fn(&Board, u32) -> bool + Send + Sync + 'static,
        H: Fn(&Board, Player) -> f32 + Send + Sync + 'static,
    {
        Self {
            cutoff: Arc::new(cutoff),
            heuristic: Arc::new(heuristic),
            terminal_score: TERMINAL_SCORE,
        }
    }

    /// Fixed-depth cutoff with the path-length heuristic
    pub fn with_depth(max_depth: u32) -> Self {
        Self::new(depth_cutoff(max_depth), evaluate)
    }

    pub fn with_terminal_score(mut self, terminal_score: f32) -> Self {
        self.terminal_score = terminal_score;
        self
    }

    pub fn should_stop(&self, board: &Board, depth: u32) -> bool {
        (self.cutoff)(board, depth)
    }

    pub fn score(&self, board: &Board, player: Player) -> f32 {
        (self.heuristic)(board, player)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("terminal_score", &self.terminal_score)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, root included
    pub nodes: u64,
    /// Nodes scored by the heuristic
    pub leaves: u64,
    /// Nodes where a side had already connected
    pub terminals: u64,
    /// Nodes abandoned by an alpha or beta cut
    pub prunes: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.terminals += other.terminals;
        self.prunes += other.prunes;
    }
}

/// Result of a root search
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// None when the root was terminal, cut off, or every move scored -inf
    pub best_move: Option<Move>,
    pub score: f32,
    pub stats: SearchStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Maximizing,
    Minimizing,
}

impl Role {
    fn other(self) -> Self {
        match self {
            Role::Maximizing => Role::Minimizing,
            Role::Minimizing => Role::Maximizing,
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Alpha-beta searcher over connectivity snapshots
#[derive(Clone, Debug, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for `player` on a plain board
    pub fn best_move(&self, board: &Board, player: Player) -> Option<Move> {
        self.search(&Connectivity::build(board), player).best_move
    }

    /// Full search from `root` with `player` to act
    pub fn search(&self, root: &Connectivity, player: Player) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let (score, best_move) = self.alpha_beta(
            root,
            player,
            Role::Maximizing,
            f32::NEG_INFINITY,
            f32::INFINITY,
            0,
            &mut stats,
        );

        tracing::debug!(
            "{} search: move={:?} score={} nodes={} prunes={}",
            player,
            best_move,
            score,
            stats.nodes,
            stats.prunes
        );

        SearchOutcome {
            best_move,
            score,
            stats,
        }
    }

    /// Root-parallel search; each root move gets a full window.
    ///
    /// Picks the first row-major move with the highest value, which is the
    /// move the sequential search returns.
    #[cfg(feature = "parallel")]
    pub fn search_parallel(&self, root: &Connectivity, player: Player) -> SearchOutcome {
        use rayon::prelude::*;

        let mut stats = SearchStats {
            nodes: 1,
            ..Default::default()
        };

        if let Some(score) = self.settle(root, player, Role::Maximizing, 0, &mut stats) {
            return SearchOutcome {
                best_move: None,
                score,
                stats,
            };
        }

        let moves = root.possible_moves();
        if moves.is_empty() {
            stats.leaves += 1;
            return SearchOutcome {
                best_move: None,
                score: self.config.score(root.board(), player),
                stats,
            };
        }

        let results: Vec<(Move, f32, SearchStats)> = moves
            .par_iter()
            .map(|&mv| {
                let mut branch = SearchStats::default();
                let child = root.apply_move(mv, player);
                let (value, _) = self.alpha_beta(
                    &child,
                    player,
                    Role::Minimizing,
                    f32::NEG_INFINITY,
                    f32::INFINITY,
                    1,
                    &mut branch,
                );
                (mv, value, branch)
            })
            .collect();

        let mut score = f32::NEG_INFINITY;
        let mut best_move = None;
        for (mv, value, branch) in results {
            stats.merge(&branch);
            if value > score {
                score = value;
                best_move = Some(mv);
            }
        }

        SearchOutcome {
            best_move,
            score,
            stats,
        }
    }

    /// Terminal and cutoff checks shared by every node
    fn settle(
        &self,
        node: &Connectivity,
        player: Player,
        role: Role,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Option<f32> {
        // The side that moved last is the one waiting to respond
        let (waiting, lost_score) = match role {
            Role::Maximizing => (player.opponent(), -self.config.terminal_score),
            Role::Minimizing => (player, self.config.terminal_score),
        };

        if node.has_connected(waiting) {
            stats.terminals += 1;
            return Some(lost_score);
        }

        if self.config.should_stop(node.board(), depth) {
            stats.leaves += 1;
            return Some(self.config.score(node.board(), player));
        }

        None
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &self,
        node: &Connectivity,
        player: Player,
        role: Role,
        mut alpha: f32,
        mut beta: f32,
        depth: u32,
        stats: &mut SearchStats,
    ) -> (f32, Option<Move>) {
        stats.nodes += 1;

        if let Some(score) = self.settle(node, player, role, depth, stats) {
            return (score, None);
        }

        let moves = node.possible_moves();
        if moves.is_empty() {
            // Full board with no winner; score it rather than fail
            stats.leaves += 1;
            return (self.config.score(node.board(), player), None);
        }

        let mover = match role {
            Role::Maximizing => player,
            Role::Minimizing => player.opponent(),
        };

        let mut best = match role {
            Role::Maximizing => f32::NEG_INFINITY,
            Role::Minimizing => f32::INFINITY,
        };
        let mut best_move = None;

        for mv in moves {
            let child = node.apply_move(mv, mover);
            let (value, _) =
                self.alpha_beta(&child, player, role.other(), alpha, beta, depth + 1, stats);

            match role {
                Role::Maximizing => {
                    if value > best {
                        best = value;
                        best_move = Some(mv);
                        alpha = alpha.max(best);
                    }
                    if best >= beta {
                        stats.prunes += 1;
                        return (best, best_move);
                    }
                }
                Role::Minimizing => {
                    if value < best {
                        best = value;
                        best_move = Some(mv);
                        beta = beta.min(best);
                    }
                    if best <= alpha {
                        stats.prunes += 1;
                        return (best, best_move);
                    }
                }
            }
        }

        (best, best_move)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    /// Plain minimax with the same tie-break, no pruning
    fn minimax(
        node: &Connectivity,
        player: Player,
        maximizing: bool,
        depth: u32,
        config: &SearchConfig,
        nodes: &mut u64,
    ) -> (f32, Option<Move>) {
        *nodes += 1;
        let waiting = if maximizing { player.opponent() } else { player };
        if node.has_connected(waiting) {
            let score = config.terminal_score;
            return (if maximizing { -score } else { score }, None);
        }
        if config.should_stop(node.board(), depth) {
            return (config.score(node.board(), player), None);
        }
        let moves = node.possible_moves();
        if moves.is_empty() {
            return (config.score(node.board(), player), None);
        }

        let mover = if maximizing { player } else { player.opponent() };
        let mut best = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };
        let mut best_move = None;
        for mv in moves {
            let child = node.apply_move(mv, mover);
            let (value, _) = minimax(&child, player, !maximizing, depth + 1, config, nodes);
            let better = if maximizing { value > best } else { value < best };
            if better {
                best = value;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }

    /// Random non-terminal 3x3 position with `stones` stones, Player 1 to move
    fn random_position(rng: &mut ChaCha8Rng, stones: usize) -> Board {
        loop {
            let mut board = Board::new(3).unwrap();
            let mut cells: Vec<usize> = (0..9).collect();
            cells.shuffle(rng);
            for (turn, &idx) in cells.iter().take(stones).enumerate() {
                let player = if turn % 2 == 0 { Player::One } else { Player::Two };
                board.place(idx / 3, idx % 3, player).unwrap();
            }
            if !board.has_connected(Player::One) && !board.has_connected(Player::Two) {
                return board;
            }
        }
    }

    #[test]
    fn test_opponent_already_connected_short_circuits() {
        let board = Board::from_rows(&[". B .", ". B .", ". B ."]).unwrap();
        let engine = SearchEngine::default();
        let outcome = engine.search(&Connectivity::build(&board), Player::One);

        assert_eq!(outcome.score, -1.0);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.stats.nodes, 1);
        assert_eq!(outcome.stats.terminals, 1);
    }

    #[test]
    fn test_cutoff_at_root_returns_heuristic() {
        let board = Board::from_rows(&["R . .", "R . .", "R . ."]).unwrap();
        let engine = SearchEngine::new(SearchConfig::with_depth(0));
        let outcome = engine.search(&Connectivity::build(&board), Player::One);

        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, evaluate(&board, Player::One));
    }

    #[test]
    fn test_takes_first_winning_move() {
        let board = Board::from_rows(&[". . .", "R R .", "B B ."]).unwrap();
        let engine = SearchEngine::new(SearchConfig::with_depth(2).with_terminal_score(100.0));
        let mv = engine.best_move(&board, Player::One);

        // (0,2) and (1,2) both connect; row-major order prefers (0,2)
        assert_eq!(mv, Some(Move::new(0, 2)));
    }

    #[test]
    fn test_blocks_single_threat() {
        let board = Board::from_rows(&[
            "B . . R",
            "B . . R",
            "B . . R",
            ". . . .",
        ]).unwrap();
        let engine = SearchEngine::new(SearchConfig::with_depth(2).with_terminal_score(100.0));
        assert_eq!(engine.best_move(&board, Player::One), Some(Move::new(3, 0)));
    }

    #[test]
    fn test_custom_heuristic_is_used() {
        // Prefer the highest-numbered column for the stone just placed
        let config = SearchConfig::new(depth_cutoff(1), |board: &Board, player: Player| {
            let mut best = 0.0f32;
            for row in 0..board.size() {
                for col in 0..board.size() {
                    if board.get(row, col).and_then(|c| c.owner()) == Some(player) {
                        best = best.max(col as f32);
                    }
                }
            }
            best
        });
        let engine = SearchEngine::new(config);
        let board = Board::new(3).unwrap();
        assert_eq!(engine.best_move(&board, Player::One), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_empty_two_by_two_returns_move() {
        let board = Board::new(2).unwrap();
        let outcome = SearchEngine::default().search(&Connectivity::build(&board), Player::One);
        assert!(outcome.best_move.is_some());
        assert!(outcome.stats.nodes > 1);
    }

    #[test]
    fn test_alpha_beta_matches_minimax_small_boards() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = SearchConfig::with_depth(9);
        let engine = SearchEngine::new(config.clone());

        let mut positions = vec![Board::new(2).unwrap()];
        for stones in [2, 2, 2, 4, 4, 4, 6] {
            positions.push(random_position(&mut rng, stones));
        }

        for board in positions {
            let root = Connectivity::build(&board);
            let outcome = engine.search(&root, Player::One);
            let mut plain_nodes = 0;
            let (value, mv) = minimax(&root, Player::One, true, 0, &config, &mut plain_nodes);

            assert_eq!(outcome.score, value, "value mismatch on\n{}", board);
            assert_eq!(outcome.best_move, mv, "move mismatch on\n{}", board);
            assert!(outcome.stats.nodes <= plain_nodes);
        }
    }

    #[test]
    fn test_pruning_skips_nodes() {
        let board = Board::new(3).unwrap();
        let config = SearchConfig::with_depth(3);
        let outcome = SearchEngine::new(config.clone()).search(&Connectivity::build(&board), Player::One);

        let mut plain_nodes = 0;
        minimax(&Connectivity::build(&board), Player::One, true, 0, &config, &mut plain_nodes);

        assert!(outcome.stats.prunes > 0);
        assert!(outcome.stats.nodes < plain_nodes);
    }

    #[test]
    fn test_search_does_not_mutate_root() {
        let board = Board::from_rows(&["R . .", ". B .", ". . ."]).unwrap();
        let root = Connectivity::build(&board);
        let _ = SearchEngine::default().search(&root, Player::Two);
        assert_eq!(root.board(), &board);
    }

    #[test]
    fn test_full_board_without_opponent_win_scores_heuristic() {
        // Only the root player has connected, so the terminal check passes
        let board = Board::from_rows(&["R R", "B B"]).unwrap();
        let engine = SearchEngine::new(SearchConfig::with_depth(5));
        let outcome = engine.search(&Connectivity::build(&board), Player::One);

        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, evaluate(&board, Player::One));
        assert_eq!(outcome.score, f32::INFINITY);
        assert_eq!(outcome.stats.nodes, 1);
        assert_eq!(outcome.stats.leaves, 1);
        assert_eq!(outcome.stats.terminals, 0);
    }

    #[test]
    fn test_engine_exposes_config() {
        let engine = SearchEngine::new(SearchConfig::with_depth(3).with_terminal_score(50.0));
        let board = Board::new(3).unwrap();
        assert_eq!(engine.config().terminal_score, 50.0);
        assert!(engine.config().should_stop(&board, 3));
        assert!(!engine.config().should_stop(&board, 2));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_full_board_scores_heuristic() {
        let board = Board::from_rows(&["R R", "B B"]).unwrap();
        let engine = SearchEngine::new(SearchConfig::with_depth(5));
        let outcome = engine.search_parallel(&Connectivity::build(&board), Player::One);

        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, evaluate(&board, Player::One));
        assert_eq!(outcome.stats.leaves, 1);
        assert_eq!(outcome.stats.terminals, 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let engine = SearchEngine::new(SearchConfig::with_depth(3));
        for stones in [0, 2, 3, 4] {
            let board = random_position(&mut rng, stones);
            let root = Connectivity::build(&board);
            let seq = engine.search(&root, Player::One);
            let par = engine.search_parallel(&root, Player::One);
            assert_eq!(seq.best_move, par.best_move);
            assert_eq!(seq.score, par.score);
        }
    }
}
