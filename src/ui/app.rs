use crate::error::GameError;
use crate::game::{GameEngine, Outcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::info;

use super::input::{parse_column, parse_width};
use super::text::{move_error_message, outcome_message};

/// Longest number the player can type (board widths and columns fit in 2 digits).
const MAX_TYPED_DIGITS: usize = 2;

enum Screen {
    /// Waiting for the board width
    SizePrompt,
    Playing(GameEngine),
}

pub struct App {
    screen: Screen,
    selected_column: usize,
    typed: String,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// Open on the width prompt, or go straight into a game when `width` is known.
    pub fn new(width: Option<usize>) -> Result<Self, GameError> {
        let mut app = App {
            screen: Screen::SizePrompt,
            selected_column: 0,
            typed: String::new(),
            should_quit: false,
            message: None,
        };
        if let Some(width) = width {
            app.start_game(width)?;
        }
        Ok(app)
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// The game being played, if past the width prompt
    pub fn game(&self) -> Option<&GameEngine> {
        match &self.screen {
            Screen::Playing(game) => Some(game),
            Screen::SizePrompt => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn start_game(&mut self, width: usize) -> Result<(), GameError> {
        let game = GameEngine::new(width)?;
        info!(width, "new game");
        self.selected_column = width / 2; // Start in middle
        self.typed.clear();
        self.screen = Screen::Playing(game);
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.typed.is_empty() {
                    self.should_quit = true;
                } else {
                    self.typed.clear();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.typed.len() < MAX_TYPED_DIGITS {
                    self.typed.push(c);
                }
                self.preview_typed_column();
            }
            KeyCode::Backspace => {
                self.typed.pop();
                self.preview_typed_column();
            }
            _ => match self.screen {
                Screen::SizePrompt => self.handle_size_key(key.code),
                Screen::Playing(_) => self.handle_game_key(key.code),
            },
        }
    }

    fn handle_size_key(&mut self, code: KeyCode) {
        if code != KeyCode::Enter {
            return;
        }
        let typed = std::mem::take(&mut self.typed);
        match parse_width(&typed) {
            Ok(width) => {
                if let Err(e) = self.start_game(width) {
                    self.message = Some(e.to_string());
                }
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        let Some(width) = self.game().map(GameEngine::width) else {
            return;
        };

        match code {
            KeyCode::Left => {
                self.typed.clear();
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                self.typed.clear();
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Home => self.selected_column = 0,
            KeyCode::End => self.selected_column = width - 1,
            KeyCode::Enter | KeyCode::Char(' ') => {
                let typed = std::mem::take(&mut self.typed);
                if typed.is_empty() {
                    self.drop_coin(self.selected_column);
                } else {
                    match parse_column(&typed, width) {
                        Ok(column) => {
                            self.selected_column = column;
                            self.drop_coin(column);
                        }
                        Err(e) => self.message = Some(e.to_string()),
                    }
                }
            }
            KeyCode::Char('r') => {
                // Reset game with the same width
                if let Err(e) = self.start_game(width) {
                    self.message = Some(e.to_string());
                } else {
                    self.message = Some("New game started!".to_string());
                }
            }
            _ => {}
        }
    }

    /// Move the selector onto the column typed so far, when it is on the board.
    fn preview_typed_column(&mut self) {
        if let Some(width) = self.game().map(GameEngine::width) {
            if let Ok(column) = parse_column(&self.typed, width) {
                self.selected_column = column;
            }
        }
    }

    /// Drop the current player's coin in a column
    fn drop_coin(&mut self, column: usize) {
        let Screen::Playing(game) = &mut self.screen else {
            return;
        };

        match game.submit_move(column) {
            Ok(placement) => {
                if placement.outcome != Outcome::InProgress {
                    self.message = outcome_message(placement.outcome);
                }
            }
            Err(e) => {
                self.message = Some(move_error_message(&e));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match &self.screen {
            Screen::SizePrompt => {
                super::game_view::render_size_prompt(frame, &self.typed, &self.message)
            }
            Screen::Playing(game) => super::game_view::render(
                frame,
                game,
                self.selected_column,
                &self.typed,
                &self.message,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_width_prompt_starts_game() {
        let mut app = App::new(None).unwrap();
        assert!(app.game().is_none());

        type_text(&mut app, "3");
        assert!(app.game().is_none());
        assert_eq!(
            app.message(),
            Some("Invalid size, please enter a number between 4 and 50.")
        );

        type_text(&mut app, "9");
        let game = app.game().unwrap();
        assert_eq!(game.width(), 9);
        assert_eq!(app.selected_column, 4);
    }

    #[test]
    fn test_invalid_width_rejected_up_front() {
        assert!(App::new(Some(2)).is_err());
    }

    #[test]
    fn test_arrow_keys_clamp_selection() {
        let mut app = App::new(Some(4)).unwrap();
        assert_eq!(app.selected_column, 2);
        for _ in 0..5 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, 3);
        for _ in 0..5 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_enter_drops_in_selected_column() {
        let mut app = App::new(Some(7)).unwrap();
        press(&mut app, KeyCode::Enter);
        let game = app.game().unwrap();
        assert_eq!(game.move_count(Player::Yellow), 1);
        assert_eq!(game.current_player(), Player::Red);
        assert!(!game.cell_at(5, 3).is_empty());
    }

    #[test]
    fn test_typed_column_drops_there() {
        let mut app = App::new(Some(12)).unwrap();
        type_text(&mut app, "11");
        assert!(!app.game().unwrap().cell_at(5, 10).is_empty());

        type_text(&mut app, "13");
        assert_eq!(
            app.message(),
            Some("Invalid column number, please enter a valid one (1 to 12).")
        );
        assert_eq!(app.game().unwrap().total_moves(), 1);
    }

    #[test]
    fn test_full_column_message() {
        let mut app = App::new(Some(4)).unwrap();
        for _ in 0..6 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.message(),
            Some("This column is full, please choose another one.")
        );
        assert_eq!(app.game().unwrap().current_player(), Player::Yellow);
    }

    #[test]
    fn test_win_then_restart() {
        let mut app = App::new(Some(7)).unwrap();
        for col in ["1", "2", "1", "2", "1", "2", "1"] {
            type_text(&mut app, col);
        }
        assert_eq!(app.message(), Some("YELLOW won in 4 moves!"));
        assert!(screen_text(&app).contains("YELLOW won in 4 moves!"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));

        press(&mut app, KeyCode::Char('r'));
        let game = app.game().unwrap();
        assert_eq!(game.total_moves(), 0);
        assert_eq!(game.width(), 7);
    }

    #[test]
    fn test_escape_clears_typing_before_quitting() {
        let mut app = App::new(Some(7)).unwrap();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_shows_current_player() {
        let app = App::new(Some(7)).unwrap();
        let text = screen_text(&app);
        assert!(text.contains("Current Player: Yellow"));
        assert!(text.contains("Connect Four"));
    }

    #[test]
    fn test_render_size_prompt() {
        let app = App::new(None).unwrap();
        assert!(screen_text(&app).contains("WELCOME TO CONNECT 4"));
    }
}
