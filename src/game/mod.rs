// src/game/mod.rs
pub mod player;
pub mod point;
pub mod runtime;

pub use player::{Intents, Player};
pub use point::DataPoint;
pub use runtime::{Canvas, DataDuel, PlayerScore, Scoreboard};
