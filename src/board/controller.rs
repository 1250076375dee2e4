use super::items::{Item, ItemId, ItemSet, NewItem};
use super::notice::{ActionNotice, ActionStatus, Outcome, FAILURE_MESSAGE};
use crate::task::{TaskError, TaskRunner};
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Finished calls waiting to be settled. Spawned tasks wait on `send` when
/// the buffer is full, so this only bounds memory, never drops results.
const COMPLETION_CHANNEL_CAPACITY: usize = 32;

/// Result of one remote call, handed back from the spawned task.
#[derive(Debug)]
pub struct Completion {
    pub id: ItemId,
    pub result: Result<String, TaskError>,
}

/// Owns the board's items and tracks which of them have a call in flight.
///
/// All methods run on one event loop. The pending check in [`trigger`] and
/// the insert that follows it happen before anything is spawned, so a second
/// trigger for the same id can never slip in between.
///
/// [`trigger`]: ItemActionController::trigger
pub struct ItemActionController<R: TaskRunner> {
    runner: R,
    items: ItemSet,
    pending: HashSet<ItemId>,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
    notice_tx: mpsc::UnboundedSender<ActionNotice>,
}

impl<R: TaskRunner> ItemActionController<R> {
    /// Create a controller over `items`, returning the receiver on which
    /// [`ActionNotice`]s are delivered.
    pub fn new(runner: R, items: ItemSet) -> (Self, mpsc::UnboundedReceiver<ActionNotice>) {
        let (completion_tx, completion_rx) = mpsc::channel(COMPLETION_CHANNEL_CAPACITY);
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let controller = Self {
            runner,
            items,
            pending: HashSet::new(),
            completion_tx,
            completion_rx,
            notice_tx,
        };
        (controller, notice_rx)
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Current status of `id`. Unknown ids report `Idle`.
    pub fn status(&self, id: ItemId) -> ActionStatus {
        if self.pending.contains(&id) {
            ActionStatus::Pending
        } else {
            ActionStatus::Idle
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Start the remote task for `id`.
    ///
    /// Returns `false` without doing anything when `id` is not on the board
    /// or already has a call in flight. Otherwise marks it `Pending`, emits
    /// [`ActionNotice::Pending`] and spawns the call; the result comes back
    /// through [`next_completion`](Self::next_completion).
    pub fn trigger(&mut self, id: ItemId) -> bool {
        if !self.items.contains(id) {
            tracing::debug!(id, "Ignoring trigger for unknown item");
            return false;
        }
        if !self.pending.insert(id) {
            tracing::debug!(id, "Ignoring trigger, call already in flight");
            return false;
        }

        tracing::info!(id, "Task triggered");
        self.emit(ActionNotice::Pending { id });

        let runner = self.runner.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            // `run` itself is called inside the guard so a panic while building
            // the future still yields a completion.
            let result = match catch_task_panic(async move { runner.run(id).await }).await {
                Ok(result) => result,
                Err(panic_msg) => {
                    tracing::error!(id, error = %panic_msg, "Task panicked");
                    Err(TaskError::Panicked(panic_msg))
                }
            };
            if let Err(e) = tx.send(Completion { id, result }).await {
                tracing::warn!(id, error = %e, "Completion send failed (controller dropped)");
            }
        });

        true
    }

    /// Wait for the next finished call. Pending forever while nothing is in
    /// flight, which makes it safe to use as a `select!` branch.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    /// Apply a finished call.
    ///
    /// Results for items deleted in the meantime are dropped without a
    /// notice. Otherwise the item returns to `Idle` and exactly one
    /// [`ActionNotice::Settled`] is emitted. Returns whether it was applied.
    pub fn settle(&mut self, completion: Completion) -> bool {
        let Completion { id, result } = completion;

        if !self.items.contains(id) {
            tracing::debug!(id, "Discarding result for deleted item");
            return false;
        }
        if !self.pending.remove(&id) {
            tracing::warn!(id, "Discarding result for item with no call in flight");
            return false;
        }

        let outcome = match result {
            Ok(message) => {
                tracing::info!(id, "Task succeeded");
                Outcome::Succeeded(message)
            }
            Err(e) => {
                tracing::warn!(id, kind = ?e.kind(), error = %e, "Task failed");
                Outcome::Failed(FAILURE_MESSAGE.to_string())
            }
        };
        self.emit(ActionNotice::Settled { id, outcome });
        true
    }

    /// Receive and settle one completion.
    pub async fn settle_next(&mut self) -> bool {
        match self.next_completion().await {
            Some(completion) => self.settle(completion),
            None => false,
        }
    }

    /// Settle completions until no item is `Pending`.
    ///
    /// Results for deleted items may still be queued afterwards; they are
    /// discarded whenever they are eventually settled.
    pub async fn run_until_idle(&mut self) {
        while !self.pending.is_empty() {
            if self.next_completion().await.map(|c| self.settle(c)).is_none() {
                break;
            }
        }
    }

    /// Append a card and return its new id.
    pub fn add(&mut self, item: NewItem) -> ItemId {
        let id = self.items.add(item);
        tracing::info!(id, "Item added");
        id
    }

    /// Delete a card. An in-flight call keeps running but its result will be
    /// discarded.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.items.remove(id)?;
        if self.pending.remove(&id) {
            tracing::info!(id, "Item removed with call in flight, result will be discarded");
        } else {
            tracing::info!(id, "Item removed");
        }
        Some(removed)
    }

    fn emit(&self, notice: ActionNotice) {
        if self.notice_tx.send(notice).is_err() {
            tracing::debug!("Notice receiver dropped");
        }
    }
}

/// Run `future`, turning a panic into an error message.
async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&'static str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        }
    })
}
