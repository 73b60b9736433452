//! Core Connect Four game logic: the drop grid with its gravity rule, player
//! colors, run detection, and the turn-by-turn game engine.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, Direction, Run, HEIGHT, MAX_WIDTH, MIN_WIDTH, RUN_LENGTH};
pub use engine::{GameEngine, Outcome, Placement};
pub use player::Player;
