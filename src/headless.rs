//! Headless driver: trigger cards from the command line and print outcomes.
//!
//! Runs the same controller as the TUI, with stdout as the announcer.

use crate::board::{deliver, ActionNotice, Announcer, ItemActionController, ItemId};
use crate::task::TaskRunner;
use std::io::Write;
use tokio::sync::mpsc;

/// Announces each outcome as one line on a writer.
pub struct LineAnnouncer<W: Write> {
    out: W,
}

impl<W: Write> LineAnnouncer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Announcer for LineAnnouncer<W> {
    fn announce(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write outcome");
        }
    }
}

/// Summary of a headless run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub succeeded: Vec<ItemId>,
    pub failed: Vec<ItemId>,
    /// Ids that were not on the board.
    pub unknown: Vec<ItemId>,
}

impl HeadlessReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.unknown.is_empty()
    }
}

/// Trigger `ids` concurrently, wait for every call to settle and announce
/// the outcomes in completion order.
///
/// Repeated ids collapse into one call, as they would for repeated key
/// presses while a card is pending.
pub async fn run_triggers<R: TaskRunner, A: Announcer>(
    controller: &mut ItemActionController<R>,
    notice_rx: &mut mpsc::UnboundedReceiver<ActionNotice>,
    ids: &[ItemId],
    announcer: &mut A,
) -> HeadlessReport {
    let mut report = HeadlessReport::default();

    for &id in ids {
        let Some(item) = controller.items().get(id) else {
            tracing::warn!(id, "Unknown item id, skipping");
            if !report.unknown.contains(&id) {
                report.unknown.push(id);
            }
            continue;
        };
        tracing::debug!(id, title = %item.title, "Triggering");
        controller.trigger(id);
    }

    controller.run_until_idle().await;

    while let Ok(notice) = notice_rx.try_recv() {
        if let ActionNotice::Settled { id, outcome } = &notice {
            if outcome.is_success() {
                report.succeeded.push(*id);
            } else {
                report.failed.push(*id);
            }
        }
        deliver(&notice, announcer);
    }

    report
}
