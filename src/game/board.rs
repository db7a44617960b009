use super::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a run that wins the game.
pub const CONNECT: usize = 4;

/// One direction of each axis pair, as (row delta, col delta). The opposite
/// direction is obtained by negating both components.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (-1, 1), // diagonal, bottom-left to top-right
    (1, 1),  // diagonal, top-left to bottom-right
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Owned(Player),
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Owned(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A cell coordinate. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Step `n` cells along `(dr, dc)`, or `None` if that leaves the grid.
    fn offset(self, (dr, dc): (isize, isize), n: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr * n)?;
        let col = self.col.checked_add_signed(dc * n)?;
        (row < ROWS && col < COLS).then_some(Position { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Grid {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Like [`Grid::get`], but out-of-range coordinates yield `None`.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Check if a column is full. Columns outside the grid count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land in.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drop a piece into a column, returning where it landed
    pub fn place(&mut self, col: usize, player: Player) -> Result<Position, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = Cell::Owned(player);
        Ok(Position { row, col })
    }

    /// Check if the grid is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn count_pieces(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Scan the four axis pairs through `pos` and return the first run of at
    /// least [`CONNECT`] cells owned by the same player, ordered from one end
    /// of the run to the other.
    pub fn winning_line(&self, pos: Position) -> Option<Vec<Position>> {
        let player = self.cell(pos)?.owner()?;

        AXES.iter().find_map(|&axis| {
            let backward = self.run_length(pos, axis, -1, player);
            let forward = self.run_length(pos, axis, 1, player);
            if 1 + backward + forward < CONNECT {
                return None;
            }
            let start = -(backward as isize);
            let line = (start..=forward as isize)
                .filter_map(|n| pos.offset(axis, n))
                .collect();
            Some(line)
        })
    }

    /// Number of contiguous `player` cells strictly after `pos` in `sign`
    /// direction along `axis`.
    fn run_length(&self, pos: Position, axis: (isize, isize), sign: isize, player: Player) -> usize {
        (1..)
            .map_while(|n| pos.offset(axis, sign * n))
            .take_while(|&p| self.cell(p) == Some(Cell::Owned(player)))
            .count()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
