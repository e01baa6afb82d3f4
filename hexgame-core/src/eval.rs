//! Position evaluation by shortest connecting path

use crate::board::{Board, Cell, Player};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Minimum number of extra stones `player` needs to join their edges.
///
/// Own stones cost 0 to traverse, empty cells 1, opponent stones are walls.
/// Returns None when the opponent has sealed every path.
pub fn min_plays_to_win(board: &Board, player: Player) -> Option<u32> {
    let size = board.size();
    let own = Cell::from(player);
    let step_cost = |cell: Cell| -> Option<u32> {
        match cell {
            c if c == own => Some(0),
            Cell::Empty => Some(1),
            _ => None,
        }
    };

    let mut dist = vec![u32::MAX; size * size];
    let mut frontier = BinaryHeap::new();

    for (row, col) in board.start_edge(player) {
        if let Some(cost) = step_cost(board.cell(row, col)) {
            dist[row * size + col] = cost;
            frontier.push(Reverse((cost, row, col)));
        }
    }

    while let Some(Reverse((cost, row, col))) = frontier.pop() {
        if board.is_end_edge(player, row, col) {
            return Some(cost);
        }
        if cost > dist[row * size + col] {
            continue; // stale entry
        }
        for (nr, nc) in board.neighbors(row, col) {
            let Some(step) = step_cost(board.cell(nr, nc)) else {
                continue;
            };
            let next = cost + step;
            let slot = &mut dist[nr * size + nc];
            if next < *slot {
                *slot = next;
                frontier.push(Reverse((next, nr, nc)));
            }
        }
    }

    None
}

/// Path-length advantage of `player`: opponent distance minus own distance.
///
/// Sealed players count as infinitely far. Positive favors `player`.
pub fn evaluate(board: &Board, player: Player) -> f32 {
    let mine = min_plays_to_win(board, player);
    let theirs = min_plays_to_win(board, player.opponent());

    match (mine, theirs) {
        (Some(m), Some(t)) => t as f32 - m as f32,
        (Some(_), None) => f32::INFINITY,
        (None, Some(_)) => f32::NEG_INFINITY,
        // Cannot happen on a Hex board; keep the score ordered
        (None, None) => 0.0,
    }
}
