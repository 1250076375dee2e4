//! Help overlay: keybinding table.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

const KEYS: [(&str, &str); 7] = [
    ("j / Down", "Select next card"),
    ("k / Up", "Select previous card"),
    ("g / G", "First / last card"),
    ("Enter / Space", "Run the selected card's task"),
    ("d", "Delete the selected card"),
    ("a", "Add a card"),
    ("q / Ctrl+c", "Quit"),
];

/// Render the help overlay on top of the board.
pub fn render(f: &mut Frame) {
    let overlay = centered_rect(60, 60, f.area());
    if overlay.width < 30 || overlay.height < (KEYS.len() as u16 + 4) {
        return;
    }

    f.render_widget(Clear, overlay);

    let rows: Vec<Row> = KEYS
        .iter()
        .map(|(key, action)| Row::new(vec![format!("  {}", key), action.to_string()]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? to close) "),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        );

    f.render_widget(table, overlay);
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
