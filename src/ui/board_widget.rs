use crate::game::{Board, Cell};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Width in terminal columns of a rendered board, borders included.
pub fn board_width(board: &Board, cell_width: u16) -> u16 {
    let cells = u16::try_from(board.width()).unwrap_or(u16::MAX);
    cells.saturating_mul(cell_width).saturating_add(2)
}

/// Map a horizontal position to a board column by integer division by the
/// cell width. `origin_x` is the position of the first cell.
pub fn column_at(x: u16, origin_x: u16, cell_width: u16, width: usize) -> Option<usize> {
    if x < origin_x || cell_width == 0 {
        return None;
    }
    let column = usize::from((x - origin_x) / cell_width);
    (column < width).then_some(column)
}

/// Render the board top row first, framed, with 0-based column labels and a
/// marker under `selected`.
pub fn board_lines(board: &Board, cell_width: u16, selected: Option<usize>) -> Vec<Line<'static>> {
    let w = usize::from(cell_width);
    let mut lines = Vec::with_capacity(board.height() + 4);

    let mut labels = vec![Span::raw(" ")];
    for column in 0..board.width() {
        let text = format!("{column:^w$}");
        if Some(column) == selected {
            labels.push(Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            labels.push(Span::raw(text));
        }
    }
    lines.push(Line::from(labels));

    let rule = "═".repeat(board.width() * w);
    lines.push(Line::from(format!("╔{rule}╗")));

    for row in (0..board.height()).rev() {
        let mut spans = vec![Span::raw("║")];
        for column in 0..board.width() {
            let (symbol, color) = match board.cell_at(column, row).unwrap_or(Cell::Empty) {
                Cell::Empty => (".", Color::DarkGray),
                Cell::Red => ("\u{25cf}", Color::Red),
                Cell::Yellow => ("\u{25cf}", Color::Yellow),
            };
            spans.push(Span::styled(
                format!("{symbol:^w$}"),
                Style::default().fg(color),
            ));
        }
        spans.push(Span::raw("║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("╚{rule}╝")));

    let mut indicator = vec![Span::raw(" ")];
    for column in 0..board.width() {
        if Some(column) == selected && board.is_available(column) {
            indicator.push(Span::styled(
                format!("{:^w$}", "▲"),
                Style::default().fg(Color::Cyan),
            ));
        } else {
            indicator.push(Span::raw(" ".repeat(w)));
        }
    }
    lines.push(Line::from(indicator));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_at_divides_by_cell_width() {
        assert_eq!(column_at(10, 10, 3, 7), Some(0));
        assert_eq!(column_at(12, 10, 3, 7), Some(0));
        assert_eq!(column_at(13, 10, 3, 7), Some(1));
        assert_eq!(column_at(30, 10, 3, 7), Some(6));
    }

    #[test]
    fn column_at_outside_board_is_none() {
        assert_eq!(column_at(9, 10, 3, 7), None);
        assert_eq!(column_at(31, 10, 3, 7), None);
        assert_eq!(column_at(50, 0, 0, 7), None);
    }

    #[test]
    fn board_lines_shape() {
        let board = Board::from_moves(4, 3, &[1]).unwrap();
        let lines = board_lines(&board, 3, Some(1));
        // labels, top rule, 3 rows, bottom rule, indicator
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1].width(), usize::from(board_width(&board, 3)));
        let bottom_row: String = lines[4].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(bottom_row, "║ .  ●  .  . ║");
    }
}
