//! Incremental win detection with a disjoint-set forest
//!
//! Every board cell has a node at `4 + row * size + col`. Four extra nodes
//! stand for the board edges, so "has this player joined their edges" is a
//! single root comparison.

use crate::board::{Board, Cell, Move, Player};
use crate::error::HexError;

/// Virtual node for Player 1's left edge
pub const LEFT_EDGE: usize = 0;
/// Virtual node for Player 1's right edge
pub const RIGHT_EDGE: usize = 1;
/// Virtual node for Player 2's top edge
pub const TOP_EDGE: usize = 2;
/// Virtual node for Player 2's bottom edge
pub const BOTTOM_EDGE: usize = 3;

const VIRTUAL_NODES: usize = 4;

/// Board plus union-find over its stones (clone to branch)
#[derive(Clone, Debug)]
pub struct Connectivity {
    board: Board,
    parent: Vec<usize>,
}

impl Connectivity {
    /// Index a board by replaying every stone in row-major order
    pub fn build(board: &Board) -> Self {
        let size = board.size();
        let mut index = Self {
            board: board.clone(),
            parent: (0..size * size + VIRTUAL_NODES).collect(),
        };

        for row in 0..size {
            for col in 0..size {
                if let Some(player) = board.cell(row, col).owner() {
                    index.link(row, col, player);
                }
            }
        }

        index
    }

    /// The grid this index mirrors
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn possible_moves(&self) -> Vec<Move> {
        self.board.possible_moves()
    }

    /// Validated placement for authoritative state
    pub fn place_piece(&mut self, row: usize, col: usize, player: Player) -> Result<(), HexError> {
        self.board.place(row, col, player)?;
        self.link(row, col, player);
        Ok(())
    }

    /// Return a copy with `mv` played. `mv` must come from `possible_moves`.
    pub fn apply_move(&self, mv: Move, player: Player) -> Self {
        let mut next = self.clone();
        next.board.set(mv.row, mv.col, player.into());
        next.link(mv.row, mv.col, player);
        next
    }

    /// Whether `player` has joined their two edges
    pub fn has_connected(&self, player: Player) -> bool {
        let (a, b) = edge_nodes(player);
        self.root(a) == self.root(b)
    }

    /// Root of `node`, compressing the path behind it
    pub fn find(&mut self, node: usize) -> usize {
        let root = self.root(node);

        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets of `a` and `b`. Returns false if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[ra] = rb;
        true
    }

    /// Node index of board cell (row, col)
    #[inline]
    pub fn cell_node(&self, row: usize, col: usize) -> usize {
        VIRTUAL_NODES + row * self.board.size() + col
    }

    fn root(&self, mut node: usize) -> usize {
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    /// Join a freshly placed stone to its edge node and same-colored neighbors
    fn link(&mut self, row: usize, col: usize, player: Player) {
        let node = self.cell_node(row, col);
        let last = self.board.size() - 1;

        match player {
            Player::One if col == 0 => {
                self.union(LEFT_EDGE, node);
            }
            Player::One if col == last => {
                self.union(RIGHT_EDGE, node);
            }
            Player::Two if row == 0 => {
                self.union(TOP_EDGE, node);
            }
            Player::Two if row == last => {
                self.union(BOTTOM_EDGE, node);
            }
            _ => {}
        }

        let own = Cell::from(player);
        let friends: Vec<(usize, usize)> = self
            .board
            .neighbors(row, col)
            .filter(|&(r, c)| self.board.cell(r, c) == own)
            .collect();
        for (r, c) in friends {
            let neighbor = self.cell_node(r, c);
            self.union(neighbor, node);
        }
    }
}

/// The two virtual nodes a player must join
pub fn edge_nodes(player: Player) -> (usize, usize) {
    match player {
        Player::One => (LEFT_EDGE, RIGHT_EDGE),
        Player::Two => (TOP_EDGE, BOTTOM_EDGE),
    }
}
