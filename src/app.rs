use crate::board::{
    deliver, ActionNotice, ActionStatus, Announcer, Item, ItemActionController, NewItem,
};
use crate::task::{TaskClient, TaskRunner};
use std::borrow::Cow;
use std::collections::VecDeque;
use tokio::time::Instant;

/// How long a status bar message stays visible.
const STATUS_TTL_SECS: u64 = 3;

/// Terminal UI state around the board controller.
///
/// The controller stays the only owner of items and pending flags; this
/// struct adds selection, the outcome alert and other view-only state.
pub struct App<R: TaskRunner = TaskClient> {
    pub controller: ItemActionController<R>,
    /// Index into the item list, in display order.
    pub selected: usize,
    /// Outcomes waiting to be acknowledged, oldest first. The front one is
    /// shown and captures input.
    pub alerts: VecDeque<String>,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub spinner_frame: usize,
    pub show_help: bool,
    pub needs_redraw: bool,
}

impl<R: TaskRunner> App<R> {
    pub fn new(controller: ItemActionController<R>) -> Self {
        Self {
            controller,
            selected: 0,
            alerts: VecDeque::new(),
            status_message: None,
            spinner_frame: 0,
            show_help: false,
            needs_redraw: true,
        }
    }

    pub fn items(&self) -> &[Item] {
        self.controller.items().as_slice()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items().get(self.selected)
    }

    pub fn status_of(&self, item: &Item) -> ActionStatus {
        self.controller.status(item.id)
    }

    pub fn nav_down(&mut self) {
        if self.selected + 1 < self.items().len() {
            self.selected += 1;
        }
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn nav_first(&mut self) {
        self.selected = 0;
    }

    pub fn nav_last(&mut self) {
        self.selected = self.items().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.items().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Run the task for the selected card.
    pub fn trigger_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let id = item.id;
        if !self.controller.trigger(id) {
            self.set_status("Already running");
        }
    }

    /// Delete the selected card. A running call for it is left to finish and
    /// its result is dropped.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_item().map(|item| item.id) else {
            return;
        };
        if let Some(removed) = self.controller.remove(id) {
            self.set_status(format!("Deleted '{}'", removed.title));
        }
        self.clamp_selection();
    }

    /// Append a placeholder card and select it.
    pub fn add_item(&mut self) {
        let number = self.controller.items().next_id();
        let id = self.controller.add(NewItem::placeholder(number));
        if let Some(index) = self.controller.items().position(id) {
            self.selected = index;
        }
        self.set_status(format!("Added 'Hello World #{}'", number));
    }

    /// Apply a notice from the controller: settled outcomes open the alert.
    pub fn handle_notice(&mut self, notice: ActionNotice) {
        self.needs_redraw = true;
        if !deliver(&notice, self) {
            tracing::debug!(id = notice.id(), "Card pending");
        }
    }

    /// The outcome currently on screen.
    pub fn alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    /// Acknowledge the visible outcome, revealing the next queued one.
    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message once it has expired. Returns true if cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

impl<R: TaskRunner> Announcer for App<R> {
    fn announce(&mut self, text: &str) {
        self.alerts.push_back(text.to_string());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::board::ItemId;
    use crate::task::{TaskError, TaskRunner};
    use std::future::Future;

    /// Runner answering `Box {id} done` for every id.
    #[derive(Clone)]
    pub struct EchoRunner;

    impl TaskRunner for EchoRunner {
        fn run(&self, id: ItemId) -> impl Future<Output = Result<String, TaskError>> + Send {
            async move { Ok(format!("Box {} done", id)) }
        }
    }
}
