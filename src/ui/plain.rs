//! Line-oriented front end: prompt, read a line, redraw the whole grid.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Color;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use crate::game::{GameEngine, Outcome};

use super::input::{parse_column, parse_width};
use super::text::{move_error_message, outcome_message, paint, player_color, render_grid, turn_prompt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainOptions {
    /// Board width; prompted for when `None`
    pub width: Option<usize>,
    pub color: bool,
    pub clear_screen: bool,
}

/// Console session over arbitrary reader/writer pairs.
pub struct PlainConsole<R, W> {
    input: R,
    output: W,
    options: PlainOptions,
}

impl<R: BufRead, W: Write> PlainConsole<R, W> {
    pub fn new(input: R, output: W, options: PlainOptions) -> Self {
        PlainConsole {
            input,
            output,
            options,
        }
    }

    /// Play one game. Returns `None` if input ran out before the game ended.
    pub fn run(&mut self) -> io::Result<Option<Outcome>> {
        self.clear()?;
        writeln!(self.output, "WELCOME TO CONNECT 4")?;

        let width = match self.options.width {
            Some(width) => width,
            None => match self.ask_width()? {
                Some(width) => width,
                None => return Ok(None),
            },
        };
        let mut game = GameEngine::new(width)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut error: Option<String> = None;
        loop {
            self.draw(&game)?;
            writeln!(self.output, "{}", turn_prompt(game.current_player()))?;
            if let Some(message) = error.take() {
                writeln!(self.output, "{}", paint(&message, Color::Red, self.options.color))?;
            }
            write!(self.output, "\n>>> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                debug!("input closed mid-game");
                return Ok(None);
            };

            let column = match parse_column(&line, game.width()) {
                Ok(column) => column,
                Err(e) => {
                    error = Some(e.to_string());
                    continue;
                }
            };

            match game.submit_move(column) {
                Ok(placement) if placement.outcome.is_terminal() => {
                    self.draw(&game)?;
                    self.announce(placement.outcome)?;
                    return Ok(Some(placement.outcome));
                }
                Ok(_) => {}
                Err(e) => error = Some(move_error_message(&e)),
            }
        }
    }

    fn ask_width(&mut self) -> io::Result<Option<usize>> {
        loop {
            write!(
                self.output,
                "\nEnter the width of your board (min. 4, max. 50): "
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_width(&line) {
                Ok(width) => return Ok(Some(width)),
                Err(e) => writeln!(
                    self.output,
                    "{}",
                    paint(&e.to_string(), Color::Red, self.options.color)
                )?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.options.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn draw(&mut self, game: &GameEngine) -> io::Result<()> {
        self.clear()?;
        let run = game.winning_run();
        let grid = render_grid(game.board(), run.as_ref(), self.options.color);
        writeln!(self.output, "\n{grid}\n")
    }

    fn announce(&mut self, outcome: Outcome) -> io::Result<()> {
        let Some(message) = outcome_message(outcome) else {
            return Ok(());
        };
        let color = self.options.color;
        let line = match outcome {
            Outcome::Win { player, .. } => {
                let name = player.name().to_uppercase();
                let rest = message.trim_start_matches(name.as_str());
                format!(
                    "{}{}",
                    paint(&name, player_color(player), color),
                    paint(rest, Color::Green, color)
                )
            }
            _ => paint(&message, Color::Blue, color),
        };
        writeln!(self.output, "{line}")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use std::io::Cursor;

    fn run_script(width: Option<usize>, script: &str) -> (Option<Outcome>, String) {
        let options = PlainOptions {
            width,
            color: false,
            clear_screen: false,
        };
        let mut console = PlainConsole::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), options);
        let outcome = console.run().unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (outcome, output)
    }

    #[test]
    fn test_width_prompt_retries_until_valid() {
        let (outcome, output) = run_script(None, "abc\n3\n4\n");
        assert_eq!(outcome, None);
        assert!(output.contains("WELCOME TO CONNECT 4"));
        assert!(output.contains("Invalid input, please enter a number."));
        assert!(output.contains("Invalid size, please enter a number between 4 and 50."));
        assert!(output.contains("  1   2   3   4"));
        assert!(output.contains("Yellow's turn."));
    }

    #[test]
    fn test_vertical_win_reported() {
        let (outcome, output) = run_script(Some(7), "1\n2\n1\n2\n1\n2\n1\n");
        assert_eq!(
            outcome,
            Some(Outcome::Win {
                player: Player::Yellow,
                moves: 4
            })
        );
        assert!(output.ends_with("YELLOW won in 4 moves!\n"));
    }

    #[test]
    fn test_bad_column_reprompts_same_player() {
        let (outcome, output) = run_script(Some(4), "9\nx\n1\n");
        assert_eq!(outcome, None);
        assert!(output.contains("Invalid column number, please enter a valid one (1 to 4)."));
        assert!(output.contains("Invalid input, please enter a number."));
        // Yellow was asked three times, Red once after the accepted move.
        assert_eq!(output.matches("Yellow's turn.").count(), 3);
        assert_eq!(output.matches("Red's turn.").count(), 1);
    }

    #[test]
    fn test_full_column_message() {
        let (_, output) = run_script(Some(4), "1\n1\n1\n1\n1\n1\n1\n");
        assert!(output.contains("This column is full, please choose another one."));
    }
}
