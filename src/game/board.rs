use crate::error::GameError;

use super::player::Player;

/// Number of rows on every board.
pub const HEIGHT: usize = 6;
/// Narrowest accepted board.
pub const MIN_WIDTH: usize = 4;
/// Widest accepted board.
pub const MAX_WIDTH: usize = 50;
/// Coins in a line needed to win.
pub const RUN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player whose coin fills this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// Line orientation of a run, named by how it extends from its first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Rightwards along a row
    Horizontal,
    /// Downwards along a column
    Vertical,
    /// Down and to the right (`\`)
    DiagonalDown,
    /// Down and to the left (`/`)
    DiagonalUp,
}

impl Direction {
    /// Scan order used when several directions succeed from the same cell.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row, column) step between consecutive cells
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (1, -1),
        }
    }
}

/// Four same-colored coins in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub player: Player,
    /// (row, column) of the first cell in scan order
    pub start: (usize, usize),
    pub direction: Direction,
}

impl Run {
    /// Coordinates of the cells making up the run, starting at `start`.
    pub fn cells(&self) -> [(usize, usize); RUN_LENGTH] {
        let (dr, dc) = self.direction.step();
        let (row, col) = self.start;
        let mut cells = [(row, col); RUN_LENGTH];
        for (k, cell) in cells.iter_mut().enumerate() {
            let k = k as isize;
            // A run is only ever built from in-bounds cells, so these cannot wrap.
            *cell = (
                row.wrapping_add_signed(dr * k),
                col.wrapping_add_signed(dc * k),
            );
        }
        cells
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().contains(&(row, col))
    }
}

/// Drop grid with a fixed height and a width chosen per game.
///
/// Row 0 is the top, row `HEIGHT - 1` the bottom. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board, rejecting widths outside `MIN_WIDTH..=MAX_WIDTH`
    pub fn new(width: usize) -> Result<Self, GameError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(GameError::InvalidSize {
                width,
                height: HEIGHT,
            });
        }
        Ok(Board {
            width,
            cells: vec![Cell::Empty; width * HEIGHT],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if the coordinates lie outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < HEIGHT && col < self.width,
            "cell ({row}, {col}) outside {HEIGHT}x{} board",
            self.width
        );
        self.cells[row * self.width + col]
    }

    /// Number of coins stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..HEIGHT)
            .filter(|&row| !self.cell_at(row, col).is_empty())
            .count()
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        !self.cell_at(0, col).is_empty()
    }

    /// Drop a coin in a column, returns the row where it landed.
    ///
    /// The column must be inside the board; callers validate it first.
    pub fn drop_coin(&mut self, col: usize, player: Player) -> Result<usize, GameError> {
        assert!(
            col < self.width,
            "column {col} outside board of width {}",
            self.width
        );

        // Find the lowest empty row in this column
        for row in (0..HEIGHT).rev() {
            let idx = row * self.width + col;
            if self.cells[idx].is_empty() {
                self.cells[idx] = player.to_cell();
                return Ok(row);
            }
        }

        Err(GameError::ColumnFull { column: col })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Every run on the board, in scan order: rows top to bottom, columns
    /// left to right, then `Direction::ALL` order.
    pub fn runs(&self) -> impl Iterator<Item = Run> + '_ {
        (0..HEIGHT)
            .flat_map(move |row| (0..self.width).map(move |col| (row, col)))
            .flat_map(move |(row, col)| {
                Direction::ALL
                    .into_iter()
                    .filter_map(move |direction| self.run_from(row, col, direction))
            })
    }

    /// The first run in scan order, if any.
    pub fn winning_run(&self) -> Option<Run> {
        self.runs().next()
    }

    /// Check whether the cell at (row, col) is part of any run
    pub fn has_win_at(&self, row: usize, col: usize) -> bool {
        self.runs().any(|run| run.contains(row, col))
    }

    fn run_from(&self, row: usize, col: usize, direction: Direction) -> Option<Run> {
        let player = self.cell_at(row, col).player()?;
        let (dr, dc) = direction.step();

        for k in 1..RUN_LENGTH as isize {
            let r = row.checked_add_signed(dr * k).filter(|&r| r < HEIGHT)?;
            let c = col.checked_add_signed(dc * k).filter(|&c| c < self.width)?;
            if self.cell_at(r, c) != Cell::Occupied(player) {
                return None;
            }
        }

        Some(Run {
            player,
            start: (row, col),
            direction,
        })
    }
}
