use crate::game::{Cell, GameEngine, Player};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn coin_color(player: Player) -> Color {
    match player {
        Player::Yellow => Color::Yellow,
        Player::Red => Color::Red,
    }
}

/// Build the framed board: column numbers, the grid, and a `▲` under the
/// selected column. Coins of the winning run are drawn reversed.
pub fn board_lines(game: &GameEngine, selected_column: Option<usize>) -> Vec<Line<'static>> {
    let width = game.width();
    let run = game.winning_run();
    let mut lines = Vec::with_capacity(game.height() + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..width {
        let label = format!("{:^3}", col + 1);
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(3 * width + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..game.height() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..width {
            let span = match game.cell_at(row, col) {
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Occupied(player) => {
                    let mut style = Style::default().fg(coin_color(player));
                    if run.is_some_and(|run| run.contains(row, col)) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..width {
        if Some(col) == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_shape() {
        let game = GameEngine::new(7).unwrap();
        let lines = board_lines(&game, Some(3));
        assert_eq!(lines.len(), game.height() + 4);
        assert_eq!(plain(&lines[1]), "  ╔══════════════════════╗");
        assert_eq!(plain(&lines[2]), "  ║ .  .  .  .  .  .  .  ║");
        assert!(plain(&lines[lines.len() - 1]).contains('▲'));
    }

    #[test]
    fn test_board_lines_scale_with_width() {
        let game = GameEngine::new(50).unwrap();
        let lines = board_lines(&game, None);
        assert_eq!(plain(&lines[1]).chars().count(), 2 + 1 + 151 + 1);
        assert!(!plain(&lines[lines.len() - 1]).contains('▲'));
    }

    #[test]
    fn test_coins_drawn() {
        let mut game = GameEngine::new(4).unwrap();
        game.submit_move(0).unwrap();
        let lines = board_lines(&game, Some(0));
        assert_eq!(plain(&lines[7]), "  ║ ●  .  .  .  ║");
    }
}
