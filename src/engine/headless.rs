// src/engine/headless.rs
use winit::event::VirtualKeyCode;
use crate::{
    config::GameConfig,
    errors::DuelError,
    game::{DataDuel, Scoreboard},
    renderer::RecordingSurface,
    scheduler::ManualScheduler,
};

/// A key held for a span of frames during a headless run.
#[derive(Debug, Clone, Copy)]
pub struct HeldKey {
    pub key: VirtualKeyCode,
    pub from_frame: u64,
    pub until_frame: u64,
}

/// Runs the game without a window: starts it, fires `frames` frame
/// requests and returns the final scoreboard.
pub fn run_headless(
    config: GameConfig,
    frames: u64,
    script: &[HeldKey],
) -> Result<Scoreboard, DuelError> {
    log::info!("Running {} headless frames", frames);

    let mut surface = RecordingSurface::new();
    let mut scheduler = ManualScheduler::new();
    let mut game = DataDuel::new(config)?;

    game.mount(&mut surface);
    game.toggle(&mut scheduler);

    for frame in 0..frames {
        for held in script {
            if held.from_frame == frame {
                game.key_down(held.key);
            }
            if held.until_frame == frame {
                game.key_up(held.key);
            }
        }

        let handle = match scheduler.next_frame() {
            Some(handle) => handle,
            None => {
                log::warn!("Loop stopped requesting frames after {} frames", frame);
                break;
            }
        };
        surface.clear();
        game.on_frame(handle, &mut surface, &mut scheduler);
    }

    let board = game.scoreboard();
    log::info!(
        "Headless run finished: DB {} - AI {}",
        board.players[0].score, board.players[1].score
    );
    Ok(board)
}
