use crate::game::{GameEngine, Outcome, Player, MAX_WIDTH, MIN_WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::board_lines;
use super::text::outcome_message;

pub fn render(
    frame: &mut Frame,
    game: &GameEngine,
    selected_column: usize,
    typed: &str,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    let selected = (!game.is_terminal()).then_some(selected_column);
    let board = Paragraph::new(board_lines(game, selected)).alignment(Alignment::Center);
    frame.render_widget(board, chunks[1]);
    render_message(frame, typed, message, chunks[2]);
    render_controls(
        frame,
        "←/→: Move  |  1-9: Type column  |  Enter: Drop  |  R: Restart  |  Q: Quit",
        chunks[3],
    );
}

/// Startup screen asking for the board width.
pub fn render_size_prompt(frame: &mut Frame, typed: &str, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new("WELCOME TO CONNECT 4")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(title, chunks[0]);

    let prompt = Paragraph::new(vec![
        Line::from(format!(
            "Enter the width of your board (min. {MIN_WIDTH}, max. {MAX_WIDTH}):"
        )),
        Line::from(Span::styled(
            format!("> {typed}_"),
            Style::default().fg(Color::Cyan),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(prompt, chunks[1]);

    render_message(frame, "", message, chunks[2]);
    render_controls(frame, "0-9: Type width  |  Enter: Start  |  Q: Quit", chunks[3]);
}

fn player_style(player: Player) -> Style {
    let color = match player {
        Player::Yellow => Color::Yellow,
        Player::Red => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn render_header(frame: &mut Frame, game: &GameEngine, area: Rect) {
    let (status, style) = match game.outcome() {
        Outcome::InProgress => {
            let player = game.current_player();
            (
                format!(
                    "Current Player: {}  |  Move {}",
                    player.name(),
                    game.total_moves() + 1
                ),
                player_style(player),
            )
        }
        Outcome::Win { player, .. } => (
            outcome_message(game.outcome()).unwrap_or_default(),
            player_style(player),
        ),
        Outcome::Draw => (
            outcome_message(game.outcome()).unwrap_or_default(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
    };

    let header = Paragraph::new(status)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, typed: &str, message: &Option<String>, area: Rect) {
    let text = match (typed.is_empty(), message.as_deref()) {
        (false, _) => format!("Column: {typed}_"),
        (true, Some(message)) => message.to_string(),
        (true, None) => String::new(),
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, keys: &str, area: Rect) {
    let controls = Paragraph::new(Line::from(keys.to_string()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
