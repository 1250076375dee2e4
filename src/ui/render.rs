//! Render dispatch for the TUI.

use crate::app::App;
use crate::task::TaskRunner;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{alert, cards, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 30;
pub(super) const MIN_HEIGHT: u16 = 9;

/// Draw the board, then any overlay. The alert is drawn last so an outcome
/// is never hidden behind help.
pub(super) fn render<R: TaskRunner>(f: &mut Frame, app: &App<R>) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}",
                MIN_WIDTH, MIN_HEIGHT
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    cards::render(f, app, chunks[0]);
    status::render(f, app, chunks[1]);

    if app.show_help {
        help::render(f);
    }
    alert::render(f, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::EchoRunner;
    use crate::board::{ItemActionController, ItemSet};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_renders_cards_and_alert() {
        let (controller, _rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(10));
        let mut app = App::new(controller);
        app.alerts.push_back("Box 4 done".to_string());

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Hello World #1"));
        assert!(text.contains("Mindfulness"));
        assert!(text.contains("Box 4 done"));
    }

    #[tokio::test]
    async fn test_alert_shows_queued_count() {
        let (controller, _rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(2));
        let mut app = App::new(controller);
        app.alerts.push_back("Box 3 done".to_string());
        app.alerts.push_back("Box 7 done".to_string());

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Box 3 done"));
        assert!(!text.contains("Box 7 done"));
        assert!(text.contains("(1 more)"));
    }

    #[tokio::test]
    async fn test_small_terminal_shows_notice() {
        let (controller, _rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(2));
        let app = App::new(controller);

        let mut terminal = Terminal::new(TestBackend::new(25, 5)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }

    #[tokio::test]
    async fn test_empty_board_hint() {
        let (controller, _rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(0));
        let app = App::new(controller);

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("No cards"));
    }
}
