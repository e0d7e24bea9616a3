use crate::game::{Board, GameOutcome, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{board_lines, board_width};

/// What the game screen needs from the app.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub human: Player,
    pub selected_column: usize,
    pub message: Option<&'a str>,
    pub cell_width: u16,
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

/// Draw the game screen and return the x position of the first board cell,
/// for mapping mouse positions to columns.
pub fn render(frame: &mut Frame, view: &GameView) -> u16 {
    let board_height = u16::try_from(view.board.height()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                           // Header
            Constraint::Min(board_height.saturating_add(4)), // Board
            Constraint::Length(3),                           // Message
            Constraint::Length(3),                           // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    let origin_x = render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
    origin_x
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let (status, color) = match view.board.outcome() {
        Some(GameOutcome::Winner(player)) => (
            format!("Game Over  |  {} wins", player.name()),
            player_color(player),
        ),
        Some(GameOutcome::Draw) => ("Game Over  |  Draw".to_string(), Color::White),
        None => {
            let player = view.board.current_turn();
            let who = if player == view.human {
                "you"
            } else {
                "computer"
            };
            (
                format!(
                    "Current Player: {} ({})  |  {} turns left",
                    player.name(),
                    who,
                    view.board.turns_left()
                ),
                player_color(player),
            )
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) -> u16 {
    let width = board_width(view.board, view.cell_width).min(area.width);
    let x = area.x + (area.width - width) / 2;
    let board_area = Rect::new(x, area.y, width, area.height);

    let selected = (!view.board.is_terminal()).then_some(view.selected_column);
    let widget = Paragraph::new(board_lines(view.board, view.cell_width, selected));
    frame.render_widget(widget, board_area);

    // Skip the left border.
    x + 1
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let text = message.unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::raw("←/→ or mouse: Select  |  Enter/click/0-9: Drop  |  "),
        Span::raw("R: Restart  |  "),
        Span::styled("Q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": Quit"),
    ]);

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
