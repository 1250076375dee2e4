//! Input handling for the TUI.
//!
//! Overlays capture input first: an open alert must be acknowledged before
//! the board reacts again, then the help overlay, then the board itself.

use crate::app::App;
use crate::task::TaskRunner;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input<R: TaskRunner>(
    app: &mut App<R>,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.alert().is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_alert();
        }
        return Action::Continue;
    }

    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return Action::Continue;
    }

    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('g') | KeyCode::Home => app.nav_first(),
        KeyCode::Char('G') | KeyCode::End => app.nav_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.trigger_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('a') => app.add_item(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::EchoRunner;
    use crate::board::{ActionStatus, ItemActionController, ItemSet};

    fn test_app() -> App<EchoRunner> {
        let (controller, _rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(10));
        App::new(controller)
    }

    fn press(app: &mut App<EchoRunner>, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_enter_triggers_selected_card() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.status(2), ActionStatus::Pending);
        assert_eq!(app.controller.status(1), ActionStatus::Idle);
    }

    #[tokio::test]
    async fn test_alert_captures_keys_until_dismissed() {
        let mut app = test_app();
        app.alerts.push_back("Box 1 done".into());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.items().len(), 10);
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Continue));

        press(&mut app, KeyCode::Enter);
        assert!(app.alert().is_none());
        // Dismissing must not also trigger the card.
        assert_eq!(app.controller.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_queued_alerts_dismissed_one_at_a_time() {
        let mut app = test_app();
        app.alerts.push_back("Box 3 done".into());
        app.alerts.push_back("Box 7 done".into());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.alert(), Some("Box 7 done"));
        press(&mut app, KeyCode::Enter);
        assert!(app.alert().is_none());
    }

    #[tokio::test]
    async fn test_delete_and_add() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.controller.items().contains(1));
        press(&mut app, KeyCode::Char('a'));
        assert!(app.controller.items().contains(11));
        assert_eq!(app.items().len(), 10);
    }

    #[tokio::test]
    async fn test_help_toggle() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.pending_count(), 0);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = test_app();
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        ));
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Quit));
    }
}
