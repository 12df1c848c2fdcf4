//! Grid snake with a fixed-step simulation clock, sub-tick interpolation and a
//! small local leaderboard.
//!
//! The library holds every rule of the game and no windowing code; the
//! `snake-vibes` binary drives it from a macroquad frame loop.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod interp;
pub mod leaderboard;
pub mod snake;

pub use config::GameConfig;
pub use game::{DeathCause, Flow, FrameOutcome, Game, GameInput, Scene};
pub use grid::{Cell, Direction, Grid};
pub use interp::{Interpolation, Position};
pub use leaderboard::{HighScoreEntry, JsonLeaderboard, MemoryLeaderboard, ScoreStore};
pub use snake::Snake;
