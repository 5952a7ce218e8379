// src/engine/mod.rs - window host for the game
pub mod headless;

use winit::{
    event::{Event, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::{
    config::GameConfig,
    errors::DuelError,
    game::DataDuel,
    input::KeyEvent,
    renderer::{hex_color, Renderer},
    scheduler::{FrameHandle, FrameScheduler},
};

pub use headless::run_headless;

/// Frame requests become redraw requests; at most one is outstanding.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl RedrawScheduler {
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The request that this redraw fulfils, if any.
    pub fn take_fired(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Keep the loop spinning while a frame is owed, sleep on input otherwise.
    pub fn control_flow(&self) -> ControlFlow {
        if self.has_pending() {
            ControlFlow::Poll
        } else {
            ControlFlow::Wait
        }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

pub struct DuelWindow {
    event_loop: Option<EventLoop<()>>,
    window: Window,
    renderer: Renderer,
    scheduler: RedrawScheduler,
    game: DataDuel,
    background: [f32; 4],
}

impl DuelWindow {
    pub async fn new(config: GameConfig) -> Result<Self, DuelError> {
        log::info!("Opening game window...");

        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title("Data Duel - Space: play/pause, R: reset")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.canvas_width as f64,
                config.canvas_height as f64,
            ))
            .build(&event_loop)
            .map_err(|e| DuelError::WindowError(format!("Window creation failed: {}", e)))?;

        let mut renderer = Renderer::new(&window, config.canvas_width, config.canvas_height).await?;
        let mut game = DataDuel::new(config)?;
        game.mount(renderer.primitives());

        Ok(Self {
            event_loop: Some(event_loop),
            window,
            renderer,
            scheduler: RedrawScheduler::default(),
            game,
            background: hex_color("#0f172a"),
        })
    }

    pub fn run(mut self) -> Result<(), DuelError> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| DuelError::WindowError("Event loop already consumed".to_string()))?;

        event_loop.run(move |event, _, control_flow| {
            *control_flow = self.scheduler.control_flow();

            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == self.window.id() => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("Window close requested");
                        self.game.unmount(&mut self.scheduler);
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::Resized(physical_size) => {
                        self.renderer.resize(*physical_size);
                        self.window.request_redraw();
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        self.renderer.resize(**new_inner_size);
                        self.window.request_redraw();
                    }
                    _ => {
                        if let Some(key_event) = KeyEvent::from_window_event(event) {
                            self.handle_key(key_event, control_flow);
                        }
                    }
                },
                Event::RedrawRequested(window_id) if window_id == self.window.id() => {
                    self.redraw();
                }
                Event::MainEventsCleared => {
                    if self.scheduler.has_pending() {
                        self.window.request_redraw();
                    }
                }
                _ => {}
            }
        })
    }

    fn handle_key(&mut self, key_event: KeyEvent, control_flow: &mut ControlFlow) {
        match key_event {
            KeyEvent::Pressed(VirtualKeyCode::Escape) => {
                self.game.unmount(&mut self.scheduler);
                *control_flow = ControlFlow::Exit;
            }
            KeyEvent::Pressed(VirtualKeyCode::Space) => self.game.toggle(&mut self.scheduler),
            KeyEvent::Pressed(VirtualKeyCode::R) => self.game.reset(&mut self.scheduler),
            KeyEvent::Pressed(key) => self.game.key_down(key),
            KeyEvent::Released(key) => self.game.key_up(key),
        }
    }

    fn redraw(&mut self) {
        self.renderer.primitives().clear();
        let ticked = match self.scheduler.take_fired() {
            Some(handle) => self.game.on_frame(handle, self.renderer.primitives(), &mut self.scheduler),
            None => false,
        };

        // Paused or exposed: repaint the last state rather than a blank frame.
        if !ticked {
            self.game.render(self.renderer.primitives());
        }

        if let Err(e) = self.renderer.present(self.background) {
            log::error!("Render error: {}", e);
        }

        // on_frame re-armed after MainEventsCleared already ran this pass.
        if self.scheduler.has_pending() {
            self.window.request_redraw();
        }
    }
}
