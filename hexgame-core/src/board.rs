//! Hex board geometry with row/column addressing

use crate::error::{HexError, InvalidMoveReason};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest playable board side
pub const MIN_BOARD_SIZE: usize = 2;

/// Neighbor offsets (drow, dcol) on the rhombic grid
/// Index: 0=W, 1=E, 2=NW, 3=SE, 4=NE, 5=SW
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [
    (0, -1),  // W
    (0, 1),   // E
    (-1, 0),  // NW
    (1, 0),   // SE
    (-1, 1),  // NE
    (1, -1),  // SW
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity. Player 1 joins left and right, Player 2 top and bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric id (1 or 2)
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::One),
            Cell::Player2 => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'R',
            Cell::Player2 => 'B',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            'R' => Some(Cell::Player1),
            'B' => Some(Cell::Player2),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::Player1,
            Player::Two => Cell::Player2,
        }
    }
}

/// A stone placement target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square grid of cells in row-major order (clone to branch)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of side `size`
    pub fn new(size: usize) -> Result<Self, HexError> {
        if size < MIN_BOARD_SIZE {
            return Err(HexError::BoardTooSmall(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Build a board from rendered rows (`.`, `R`, `B`; whitespace ignored)
    pub fn from_rows(rows: &[&str]) -> Result<Self, HexError> {
        let mut board = Self::new(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != board.size {
                return Err(HexError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    board.size
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or_else(|| {
                    HexError::InvalidBoard(format!("unknown symbol '{}' at ({}, {})", symbol, row, col))
                })?;
                board.set(row, col, cell);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at (row, col), or None when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if self.in_bounds(row, col) {
            Some(self.cell(row, col))
        } else {
            None
        }
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    /// Place a stone; the only way stones reach an authoritative board
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), HexError> {
        self.check_placement(row, col)?;
        self.set(row, col, player.into());
        Ok(())
    }

    /// Reject out-of-bounds or occupied targets
    pub fn check_placement(&self, row: usize, col: usize) -> Result<(), HexError> {
        if !self.in_bounds(row, col) {
            return Err(HexError::InvalidMove {
                row,
                col,
                reason: InvalidMoveReason::OutOfBounds { size: self.size },
            });
        }
        match self.cell(row, col) {
            Cell::Empty => Ok(()),
            occupied => Err(HexError::InvalidMove {
                row,
                col,
                reason: InvalidMoveReason::Occupied(occupied),
            }),
        }
    }

    /// All empty cells, rows then columns
    pub fn possible_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Number of stones owned by `player`
    pub fn stone_count(&self, player: Player) -> usize {
        let target = Cell::from(player);
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// In-bounds neighbors of (row, col)
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size;
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < size && c < size).then_some((r, c))
        })
    }

    /// Cells of the edge a player's chain starts from (left for 1, top for 2)
    pub fn start_edge(&self, player: Player) -> impl Iterator<Item = (usize, usize)> {
        (0..self.size).map(move |i| match player {
            Player::One => (i, 0),
            Player::Two => (0, i),
        })
    }

    /// Whether (row, col) lies on the edge a player's chain must reach
    #[inline]
    pub fn is_end_edge(&self, player: Player, row: usize, col: usize) -> bool {
        match player {
            Player::One => col == self.size - 1,
            Player::Two => row == self.size - 1,
        }
    }

    /// Full-scan connection check (depth-first from the start edge)
    pub fn has_connected(&self, player: Player) -> bool {
        let own = Cell::from(player);
        let mut visited = vec![false; self.cells.len()];
        let mut stack = Vec::new();

        for (row, col) in self.start_edge(player) {
            if self.cell(row, col) == own {
                visited[row * self.size + col] = true;
                stack.push((row, col));
            }
        }

        while let Some((row, col)) = stack.pop() {
            if self.is_end_edge(player, row, col) {
                return true;
            }
            for (nr, nc) in self.neighbors(row, col) {
                let idx = nr * self.size + nc;
                if !visited[idx] && self.cell(nr, nc) == own {
                    visited[idx] = true;
                    stack.push((nr, nc));
                }
            }
        }

        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{}", " ".repeat(row))?;
            for col in 0..self.size {
                write!(f, " {}", self.cell(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
