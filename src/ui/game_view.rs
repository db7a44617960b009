use crate::game::{Cell, Game, GameStatus, Player, Position, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one cell, e.g. " ● ".
const CELL_WIDTH: u16 = 3;
/// Left margin plus border, "  ║".
const LEFT_PAD: u16 = 3;
/// Border plus right margin, " ║".
const RIGHT_PAD: u16 = 2;
pub const BOARD_WIDTH: u16 = LEFT_PAD + CELL_WIDTH * COLS as u16 + RIGHT_PAD;

/// Where the board was drawn on screen, used to map mouse clicks back to
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub area: Rect,
}

impl BoardLayout {
    /// Column under the terminal coordinate `(x, y)`, if any.
    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.area;
        if y < area.y || y >= area.y + area.height {
            return None;
        }
        let first_cell_x = area.x + LEFT_PAD;
        if x < first_cell_x {
            return None;
        }
        let col = ((x - first_cell_x) / CELL_WIDTH) as usize;
        (col < COLS).then_some(col)
    }
}

/// Everything the view needs besides the game itself.
pub struct ViewState<'a> {
    pub selected_column: usize,
    pub message: Option<&'a str>,
    pub show_column_numbers: bool,
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Black => Color::Gray,
    }
}

/// Text of the status display: whose turn it is, or how the game ended.
pub fn status_text(game: &Game) -> String {
    match game.status() {
        GameStatus::InProgress => format!("{} to move", game.current_player()),
        GameStatus::Won(player) => format!("Game Over! {player} has won!"),
        GameStatus::Draw => "Game Over! It's a draw.".to_string(),
    }
}

pub fn render(frame: &mut Frame, game: &Game, view: &ViewState) -> BoardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    let layout = render_board(frame, game, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
    layout
}

fn render_header(frame: &mut Frame, game: &Game, area: Rect) {
    let color = match game.status() {
        GameStatus::InProgress => player_color(game.current_player()),
        GameStatus::Won(player) => player_color(player),
        GameStatus::Draw => Color::White,
    };

    let header = Paragraph::new(status_text(game))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game: &Game, view: &ViewState, area: Rect) -> BoardLayout {
    let mut lines = Vec::new();
    let selected = (!game.is_over()).then_some(view.selected_column);

    if view.show_column_numbers {
        let mut col_line = vec![Span::raw(" ".repeat(LEFT_PAD as usize))];
        for col in 0..COLS {
            let label = format!(" {} ", col + 1);
            if Some(col) == selected {
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
        lines.push(Line::from(col_line));
    }

    lines.push(Line::from("  ╔══════════════════════╗"));

    let winning = game.winning_line().unwrap_or(&[]);
    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, mut style) = match game.grid().get(row, col) {
                Cell::Empty => (" . ", Style::default().fg(Color::DarkGray)),
                Cell::Owned(player) => (" ● ", Style::default().fg(player_color(player))),
            };
            if winning.contains(&Position::new(row, col)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw(" ".repeat(LEFT_PAD as usize))];
    for col in 0..COLS {
        if Some(col) == selected {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    lines.push(Line::from(indicator_line));

    let board_area = centered(area, BOARD_WIDTH, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines), board_area);

    BoardLayout { area: board_area }
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Click/1-7: Drop  |  ←/→ Enter: Select & Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

/// A `width` × `height` rect centred in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
