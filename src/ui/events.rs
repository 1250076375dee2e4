//! Controller event handling.
//!
//! Completions from spawned task calls are settled here, on the UI loop, and
//! the resulting notices are folded into the view state.

use crate::app::App;
use crate::board::{ActionNotice, Completion};
use crate::task::TaskRunner;
use tokio::sync::mpsc;

pub(super) fn handle_completion<R: TaskRunner>(app: &mut App<R>, completion: Completion) {
    app.needs_redraw = true;
    if !app.controller.settle(completion) {
        tracing::debug!("Completion dropped by controller");
    }
}

/// Apply every notice already queued, so an outcome settled in this turn is
/// on screen before the next draw.
pub(super) fn drain_notices<R: TaskRunner>(
    app: &mut App<R>,
    notice_rx: &mut mpsc::UnboundedReceiver<ActionNotice>,
) {
    while let Ok(notice) = notice_rx.try_recv() {
        app.handle_notice(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::EchoRunner;
    use crate::board::{ActionStatus, ItemActionController, ItemSet, FAILURE_MESSAGE};
    use crate::task::TaskError;

    #[tokio::test]
    async fn test_completion_then_drain_opens_alert() {
        let (controller, mut rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(3));
        let mut app = App::new(controller);

        app.controller.trigger(2);
        let completion = app.controller.next_completion().await.unwrap();
        handle_completion(&mut app, completion);
        drain_notices(&mut app, &mut rx);

        assert_eq!(app.alert(), Some("Box 2 done"));
        assert_eq!(app.controller.status(2), ActionStatus::Idle);
    }

    #[tokio::test]
    async fn test_completion_for_deleted_card_shows_nothing() {
        let (controller, mut rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(3));
        let mut app = App::new(controller);

        app.controller.trigger(1);
        app.delete_selected();
        let completion = app.controller.next_completion().await.unwrap();
        handle_completion(&mut app, completion);
        drain_notices(&mut app, &mut rx);

        assert!(app.alert().is_none());
    }

    #[tokio::test]
    async fn test_failed_completion_shows_generic_message() {
        let (controller, mut rx) = ItemActionController::new(EchoRunner, ItemSet::seeded(1));
        let mut app = App::new(controller);

        // A completion injected by hand still needs a pending trigger to apply.
        app.controller.trigger(1);
        let _real = app.controller.next_completion().await.unwrap();
        handle_completion(
            &mut app,
            Completion {
                id: 1,
                result: Err(TaskError::InvalidUtf8),
            },
        );
        drain_notices(&mut app, &mut rx);

        assert_eq!(app.alert(), Some(FAILURE_MESSAGE));
    }
}
