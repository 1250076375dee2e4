use crate::app::App;
use crate::task::TaskRunner;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render<R: TaskRunner>(f: &mut Frame, app: &App<R>, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let running = app.controller.pending_count();
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if running > 0 {
        Cow::Owned(format!(
            "Running {} task{}... [Enter]run [d]elete [a]dd [?]help [q]uit",
            running,
            if running == 1 { "" } else { "s" }
        ))
    } else {
        Cow::Borrowed("[j/k]select [Enter]run [d]elete [a]dd [?]help [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
