// ============================================================================
// FILE: src/lib.rs - Library Root
// ============================================================================
pub mod config;
pub mod engine;
pub mod errors;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;

pub use config::GameConfig;
pub use engine::DuelWindow;
pub use errors::DuelError;
pub use game::DataDuel;
