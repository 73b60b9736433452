use tracing::{debug, info};

use crate::error::GameError;

use super::board::{Board, Cell, Run, HEIGHT};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// `moves` is the winner's own move count, including the winning move.
    Win { player: Player, moves: u32 },
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub player: Player,
    pub row: usize,
    pub column: usize,
    /// Game outcome right after this placement
    pub outcome: Outcome,
}

/// Turn sequencing, placement and end-of-game detection for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    active_player: Player,
    move_counts: [u32; 2],
    outcome: Outcome,
}

impl GameEngine {
    /// Start a game on a board of the given width
    pub fn new(width: usize) -> Result<Self, GameError> {
        Ok(GameEngine {
            board: Board::new(width)?,
            active_player: Player::FIRST,
            move_counts: [0; 2],
            outcome: Outcome::InProgress,
        })
    }

    /// Start a game with explicit dimensions. Only `HEIGHT` rows are supported.
    pub fn with_dimensions(width: usize, height: usize) -> Result<Self, GameError> {
        if height != HEIGHT {
            return Err(GameError::InvalidSize { width, height });
        }
        Self::new(width)
    }

    /// Drop the active player's coin into a zero-based column.
    ///
    /// Rejected moves leave the board, the counters and the turn untouched.
    pub fn submit_move(&mut self, column: usize) -> Result<Placement, GameError> {
        if self.outcome.is_terminal() {
            debug!(column, "move rejected, game already over");
            return Err(GameError::GameAlreadyOver);
        }
        if column >= self.board.width() {
            debug!(column, width = self.board.width(), "move rejected, column out of range");
            return Err(GameError::OutOfRange {
                column,
                width: self.board.width(),
            });
        }

        let player = self.active_player;
        let row = self.board.drop_coin(column, player).inspect_err(|_| {
            debug!(player = player.name(), column, "move rejected, column full");
        })?;
        self.move_counts[player.index()] += 1;
        debug!(
            player = player.name(),
            row,
            column,
            moves = self.move_counts[player.index()],
            "coin placed"
        );

        if let Some(run) = self.board.winning_run() {
            // Only the mover's coin is new, so the run can only be theirs.
            debug_assert_eq!(run.player, player);
            let moves = self.move_count(run.player);
            self.outcome = Outcome::Win {
                player: run.player,
                moves,
            };
            info!(
                winner = run.player.name(),
                moves,
                start_row = run.start.0,
                start_column = run.start.1,
                direction = ?run.direction,
                "game won"
            );
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
            info!(total_moves = self.total_moves(), "game drawn");
        } else {
            self.active_player = player.other();
        }

        Ok(Placement {
            player,
            row,
            column,
            outcome: self.outcome,
        })
    }

    /// Player to move; after a win this stays the winner
    pub fn current_player(&self) -> Player {
        self.active_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// True once the last cell was filled without producing a run
    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// The run that decided the game, if it was won
    pub fn winning_run(&self) -> Option<Run> {
        match self.outcome {
            Outcome::Win { .. } => self.board.winning_run(),
            _ => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.board.cell_at(row, col)
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Completed placements by one player
    pub fn move_count(&self, player: Player) -> u32 {
        self.move_counts[player.index()]
    }

    pub fn total_moves(&self) -> u32 {
        self.move_counts.iter().sum()
    }

    /// Columns that can still take a coin; empty once the game is over
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }
}
