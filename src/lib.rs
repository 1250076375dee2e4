//! taskdeck: a terminal card board whose cards each run a remote task.
//!
//! - [`board`]: item set and the per-item action controller
//! - [`task`]: HTTP client for the task endpoint
//! - [`config`]: `config.toml` loading
//! - [`ui`]: the ratatui front end
//! - [`headless`]: trigger cards from the command line without a terminal UI

pub mod app;
pub mod board;
pub mod config;
pub mod headless;
pub mod task;
pub mod ui;
pub mod util;
