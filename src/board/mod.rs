//! The card board: item set, per-item action controller and its notices.
//!
//! The controller is the single owner of the item set and of the
//! `id -> in flight` map. Every mutation goes through `trigger`, `settle`,
//! `add` or `remove`, all of which run on the caller's event loop; remote
//! calls run as spawned tasks and come back as [`Completion`]s.

mod controller;
mod items;
mod notice;

pub use controller::{Completion, ItemActionController};
pub use items::{Item, ItemId, ItemSet, NewItem};
pub use notice::{deliver, ActionNotice, ActionStatus, Announcer, Outcome, FAILURE_MESSAGE};
