//! Terminal user interface for the card board.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Controller completion and notice processing
//! - `render` - View rendering dispatch
//! - `cards` - Card list widget
//! - `alert` - Outcome alert overlay
//! - `help` - Keybinding overlay
//! - `status` - Status bar widget

mod alert;
mod cards;
mod events;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
