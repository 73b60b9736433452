//! Plain-text rendering of the grid and the status lines shared by both
//! front ends. Colors are applied here only, never stored in the game.

use crossterm::style::{style, Color, Stylize};

use crate::error::GameError;
use crate::game::{Board, Cell, Outcome, Player, Run};

const COIN: &str = " ● ";
const EMPTY: &str = "   ";

/// Wrap `text` in terminal color codes when `enabled`.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Yellow => Color::Yellow,
        Player::Red => Color::Red,
    }
}

fn border(width: usize, left: char, joint: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for col in 0..width {
        if col > 0 {
            line.push(joint);
        }
        line.push_str("───");
    }
    line.push(right);
    line
}

/// Render the board as a box table with a border between every row and
/// 1-based column numbers underneath. Cells of `highlight` are drawn bold.
pub fn render_grid(board: &Board, highlight: Option<&Run>, color: bool) -> String {
    let width = board.width();
    let mut lines = vec![border(width, '┌', '┬', '┐')];

    for row in 0..board.height() {
        let mut line = String::from("│");
        for col in 0..width {
            let cell = match board.cell_at(row, col) {
                Cell::Empty => EMPTY.to_string(),
                Cell::Occupied(player) if color => {
                    let coin = style(COIN).with(player_color(player));
                    if highlight.is_some_and(|run| run.contains(row, col)) {
                        coin.bold().to_string()
                    } else {
                        coin.to_string()
                    }
                }
                Cell::Occupied(_) => COIN.to_string(),
            };
            line.push_str(&cell);
            line.push('│');
        }
        lines.push(line);

        if row + 1 < board.height() {
            lines.push(border(width, '├', '┼', '┤'));
        }
    }

    lines.push(border(width, '└', '┴', '┘'));

    let numbers: String = (1..=width).map(|n| format!(" {n:^3}")).collect();
    lines.push(numbers.trim_end().to_string());

    lines.join("\n")
}

pub fn turn_prompt(player: Player) -> String {
    format!("Enter a column number to introduce your coin.\n{player}'s turn.")
}

/// Final result line, or `None` while the game is running.
pub fn outcome_message(outcome: Outcome) -> Option<String> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win { player, moves } => Some(format!(
            "{} won in {moves} moves!",
            player.name().to_uppercase()
        )),
        Outcome::Draw => Some("DRAW!".to_string()),
    }
}

/// What to tell the player after a rejected move.
pub fn move_error_message(err: &GameError) -> String {
    match err {
        GameError::ColumnFull { .. } => {
            "This column is full, please choose another one.".to_string()
        }
        GameError::OutOfRange { width, .. } => {
            format!("Invalid column number, please enter a valid one (1 to {width}).")
        }
        GameError::GameAlreadyOver => "Game over! Press 'r' to restart.".to_string(),
        GameError::InvalidSize { .. } => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameEngine;

    #[test]
    fn test_empty_grid_layout() {
        let board = Board::new(4).unwrap();
        let grid = render_grid(&board, None, false);
        let lines: Vec<&str> = grid.lines().collect();

        // 6 rows, 5 separators, top and bottom borders, number footer
        assert_eq!(lines.len(), 6 + 5 + 2 + 1);
        assert_eq!(lines[0], "┌───┬───┬───┬───┐");
        assert_eq!(lines[1], "│   │   │   │   │");
        assert_eq!(lines[2], "├───┼───┼───┼───┤");
        assert_eq!(lines[12], "└───┴───┴───┴───┘");
        assert_eq!(lines[13], "  1   2   3   4");
    }

    #[test]
    fn test_coins_rendered_without_color() {
        let mut game = GameEngine::new(4).unwrap();
        game.submit_move(1).unwrap();
        game.submit_move(1).unwrap();
        let grid = render_grid(game.board(), None, false);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines[11], "│   │ ● │   │   │");
        assert_eq!(lines[9], "│   │ ● │   │   │");
        assert!(!grid.contains('\u{1b}'));
    }

    #[test]
    fn test_color_only_added_when_enabled() {
        let mut game = GameEngine::new(4).unwrap();
        game.submit_move(0).unwrap();
        assert!(!render_grid(game.board(), None, false).contains('\u{1b}'));
        assert!(render_grid(game.board(), None, true).contains('●'));
        assert_eq!(paint("DRAW!", Color::Blue, false), "DRAW!");
        assert!(paint("DRAW!", Color::Blue, true).contains("DRAW!"));
    }

    #[test]
    fn test_two_digit_column_numbers() {
        let board = Board::new(12).unwrap();
        let grid = render_grid(&board, None, false);
        let footer = grid.lines().last().unwrap();
        assert!(footer.ends_with(" 11  12"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            turn_prompt(Player::Red),
            "Enter a column number to introduce your coin.\nRed's turn."
        );
        assert_eq!(
            outcome_message(Outcome::Win {
                player: Player::Yellow,
                moves: 4
            }),
            Some("YELLOW won in 4 moves!".to_string())
        );
        assert_eq!(outcome_message(Outcome::Draw), Some("DRAW!".to_string()));
        assert_eq!(outcome_message(Outcome::InProgress), None);
        assert_eq!(
            move_error_message(&GameError::ColumnFull { column: 0 }),
            "This column is full, please choose another one."
        );
    }
}
