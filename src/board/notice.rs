//! State-change notices emitted by the controller and the announce seam.

use super::ItemId;

/// The only message users see when a task fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Operation failed. Please try again.";

/// Durable per-item action state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Idle,
    Pending,
}

/// Result of one settled task call. Delivered once, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded(String),
    Failed(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Succeeded(message) | Outcome::Failed(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Notification sent to the rendering side whenever an item's action state
/// changes.
///
/// For every accepted trigger there is exactly one `Pending` followed by at
/// most one `Settled` for the same id. `Settled` is skipped when the item was
/// deleted while its call was in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionNotice {
    Pending { id: ItemId },
    Settled { id: ItemId, outcome: Outcome },
}

impl ActionNotice {
    pub fn id(&self) -> ItemId {
        match self {
            ActionNotice::Pending { id } | ActionNotice::Settled { id, .. } => *id,
        }
    }
}

/// Something that can show a result to the user, such as a modal alert or a
/// line on stdout.
pub trait Announcer {
    fn announce(&mut self, text: &str);
}

/// Route a notice to an announcer. Only settled outcomes are announced;
/// returns whether anything was shown.
pub fn deliver<A: Announcer + ?Sized>(notice: &ActionNotice, announcer: &mut A) -> bool {
    match notice {
        ActionNotice::Pending { .. } => false,
        ActionNotice::Settled { outcome, .. } => {
            announcer.announce(outcome.message());
            true
        }
    }
}
