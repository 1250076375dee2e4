//! Outcome alert: the terminal's stand-in for a native alert dialog.

use crate::app::App;
use crate::task::TaskRunner;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the pending outcome, if any, as a centered modal.
pub fn render<R: TaskRunner>(f: &mut Frame, app: &App<R>) {
    let Some(message) = app.alert() else {
        return;
    };
    let queued = app.alerts.len() - 1;

    let area = f.area();
    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height.saturating_sub(2));
    let overlay = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );
    if overlay.width < 10 || overlay.height < 4 {
        return;
    }

    f.render_widget(Clear, overlay);

    let hint = if queued > 0 {
        format!("[Enter] OK ({} more)", queued)
    } else {
        "[Enter] OK".to_string()
    };
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Result "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, overlay);
}
