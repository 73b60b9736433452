//! # Connect Four
//!
//! Two-player Connect Four for the terminal on a 6-row board between 4 and
//! 50 columns wide. Yellow moves first; four in a row horizontally,
//! vertically or diagonally wins, a full board without one is a draw.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, run detection, game engine
//! - [`ui`] — Terminal front ends: ratatui game view and plain console
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — tracing subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
