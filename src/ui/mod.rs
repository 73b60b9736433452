//! Terminal front ends: a full-screen ratatui view and a line-oriented plain
//! console, plus the text parsing and rendering helpers they share.

mod app;
pub mod board_widget;
mod game_view;
pub mod input;
mod plain;
pub mod text;

pub use app::App;
pub use plain::{PlainConsole, PlainOptions};
