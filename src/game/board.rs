use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::error::MoveError;

/// Minimum run length that wins the game.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PlayerId),
}

impl Cell {
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(id),
        }
    }
}

/// A board coordinate. Row 0 is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Scan axes, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Right,
    Down,
    DownRight,
    DownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
        }
    }
}

/// The cells of a winning line.
///
/// The seed comes first, followed by the run in the positive direction and
/// then the run in the negative direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSet {
    pub player: PlayerId,
    pub direction: Direction,
    pub positions: Vec<Position>,
}

impl WinSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Positions in row-major order, independent of where the scan started.
    pub fn sorted(&self) -> Vec<Position> {
        let mut positions = self.positions.clone();
        positions.sort();
        positions
    }
}

/// Where a disc landed and which cell, if any, it converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub row: usize,
    pub overwritten: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows || col >= self.cols {
            return Cell::Empty;
        }
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Number of occupied cells in a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..self.rows)
            .filter(|&row| self.get(row, col) != Cell::Empty)
            .count()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Drop a disc into a column.
    ///
    /// The disc settles on the lowest empty row. With `overwrite` set, an
    /// opposing disc directly above the landing cell is converted to
    /// `player`; an empty or same-player cell above is left alone.
    pub fn drop_piece(
        &mut self,
        col: usize,
        player: PlayerId,
        overwrite: bool,
    ) -> Result<Landing, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }

        let row = (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;
        self.set(row, col, Cell::Occupied(player));

        let mut overwritten = None;
        if overwrite && row > 0 {
            if let Cell::Occupied(above) = self.get(row - 1, col) {
                if above != player {
                    self.set(row - 1, col, Cell::Occupied(player));
                    overwritten = Some(Position::new(row - 1, col));
                }
            }
        }

        Ok(Landing { row, overwritten })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Find a winning line through (row, col).
    ///
    /// Each axis is scanned in both directions from the seed; the first axis
    /// whose run reaches [`WIN_LENGTH`] wins.
    pub fn winning_line(&self, row: usize, col: usize) -> Option<WinSet> {
        let player = self.get(row, col).player()?;

        Direction::ALL.into_iter().find_map(|direction| {
            let (dr, dc) = direction.delta();
            let mut positions = vec![Position::new(row, col)];
            positions.extend(self.run(row, col, dr, dc, player));
            positions.extend(self.run(row, col, -dr, -dc, player));

            (positions.len() >= WIN_LENGTH).then_some(WinSet {
                player,
                direction,
                positions,
            })
        })
    }

    /// Consecutive `player` cells stepping away from (row, col), excluding the start.
    fn run(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        player: PlayerId,
    ) -> Vec<Position> {
        let mut out = Vec::new();
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while r >= 0
            && c >= 0
            && (r as usize) < self.rows
            && (c as usize) < self.cols
            && self.get(r as usize, c as usize) == Cell::Occupied(player)
        {
            out.push(Position::new(r as usize, c as usize));
            r += dr;
            c += dc;
        }
        out
    }

    /// Grid as rows of optional player ids, for snapshots.
    pub fn to_rows(&self) -> Vec<Vec<Option<PlayerId>>> {
        (0..self.rows)
            .map(|row| (0..self.cols).map(|col| self.get(row, col).player()).collect())
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}
