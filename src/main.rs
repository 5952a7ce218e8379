// src/main.rs
use log::info;

use data_duel::{config::headless_frames, engine, DuelWindow, GameConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Starting Data Duel...");

    let config = GameConfig::from_env()?;

    if let Some(frames) = headless_frames() {
        let board = engine::run_headless(config, frames, &[])?;
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let window = pollster::block_on(DuelWindow::new(config))?;
    window.run()?;

    Ok(())
}
