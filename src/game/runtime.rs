// src/game/runtime.rs
use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use winit::event::VirtualKeyCode;
use crate::{
    config::GameConfig,
    errors::DuelError,
    input::{binding_for, PlayerSlot},
    renderer::{hex_color, DrawSurface, WHITE},
    scheduler::{FrameHandle, FrameScheduler, LoopState},
};
use super::{DataPoint, Player};

/// Size of the drawing surface the game is mounted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerScore {
    pub label: String,
    pub score: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scoreboard {
    pub frames: u64,
    pub active: bool,
    pub players: Vec<PlayerScore>,
    pub points_spawned: usize,
    pub points_remaining: usize,
}

/// The two-player collection game. Owns both players, every point spawned
/// this session and the loop state; the host supplies the drawing surface,
/// the key events and the frame scheduler.
pub struct DataDuel {
    config: GameConfig,
    canvas: Option<Canvas>,
    players: [Player; 2],
    points: Vec<DataPoint>,
    frame: u64,
    state: LoopState,
    rng: StdRng,
}

impl DataDuel {
    /// Fails when `config` does not pass `GameConfig::validate`.
    pub fn new(config: GameConfig) -> Result<Self, DuelError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            players: [
                Player::new(PlayerSlot::A, &config),
                Player::new(PlayerSlot::B, &config),
            ],
            config,
            canvas: None,
            points: Vec::new(),
            frame: 0,
            state: LoopState::Idle,
            rng,
        })
    }

    /// Attaches the drawing surface and draws the opening frame.
    pub fn mount(&mut self, surface: &mut dyn DrawSurface) {
        let canvas = Canvas {
            width: self.config.canvas_width,
            height: self.config.canvas_height,
        };
        log::info!("Mounting game on a {}x{} canvas", canvas.width, canvas.height);
        self.canvas = Some(canvas);
        self.render(surface);
    }

    /// Cancels any pending frame and detaches the surface.
    pub fn unmount(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.state.stop(scheduler);
        self.canvas = None;
        log::info!("Game unmounted");
    }

    pub fn is_active(&self) -> bool {
        self.state.is_running()
    }

    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    /// Start/pause. Never touches players or points. No-op until mounted.
    pub fn toggle(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.canvas.is_none() {
            return;
        }
        if self.state.is_running() {
            self.state.stop(scheduler);
            log::info!("Game paused at frame {}", self.frame);
        } else {
            self.state.start(scheduler);
            log::info!("Game started at frame {}", self.frame);
        }
    }

    /// Puts both players back on their marks with zero score and clears
    /// the field. A paused game starts running; a running one keeps going.
    /// No-op until mounted.
    pub fn reset(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.canvas.is_none() {
            return;
        }
        for player in self.players.iter_mut() {
            player.reset(&self.config);
        }
        self.points.clear();
        self.frame = 0;

        if !self.state.is_running() {
            self.state.start(scheduler);
        }
        log::info!("Game reset");
    }

    /// Ignored entirely while the game is paused.
    pub fn key_down(&mut self, key: VirtualKeyCode) {
        if !self.state.is_running() {
            return;
        }
        self.apply_key(key, true);
    }

    /// Always applied so a key released during a pause does not stay held.
    pub fn key_up(&mut self, key: VirtualKeyCode) {
        self.apply_key(key, false);
    }

    fn apply_key(&mut self, key: VirtualKeyCode, held: bool) {
        if let Some(binding) = binding_for(key) {
            self.player_mut(binding.player).intents.set(binding.direction, held);
        }
    }

    /// Host callback for a fired frame request. Stale frames (cancelled or
    /// superseded) are dropped; otherwise runs one tick and re-arms while
    /// the game is still running.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        surface: &mut dyn DrawSurface,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if !self.state.begin_frame(handle) {
            log::debug!("Dropping stale frame {:?}", handle);
            return false;
        }
        if self.canvas.is_none() {
            self.state.rearm(scheduler);
            return false;
        }

        self.tick(surface);
        self.state.rearm(scheduler);
        true
    }

    /// One simulation step: spawn, move, collect, draw, count.
    pub fn tick(&mut self, surface: &mut dyn DrawSurface) {
        let canvas = match self.canvas {
            Some(canvas) => canvas,
            None => return,
        };

        if self.frame % self.config.spawn_interval == 0 {
            self.spawn_point();
        }

        for player in self.players.iter_mut() {
            player.step(canvas.size());
        }

        self.check_collisions();
        self.render(surface);
        self.frame += 1;
    }

    fn spawn_point(&mut self) {
        if self.canvas.is_none() {
            return;
        }
        let point = DataPoint::spawn(&mut self.rng, &self.config);
        log::debug!(
            "Spawned point at ({:.1}, {:.1}) on frame {}",
            point.position.x, point.position.y, self.frame
        );
        self.points.push(point);
    }

    /// Drops an uncollected point at an exact position.
    pub fn place_point(&mut self, position: Vec2) {
        self.points.push(DataPoint::new(position, self.config.point_radius));
    }

    /// Both players are tested against every live point, so a point both
    /// players reach on the same frame scores for each of them.
    fn check_collisions(&mut self) {
        for point in self.points.iter_mut().filter(|point| !point.is_collected()) {
            let mut hit = false;
            for player in self.players.iter_mut() {
                if player.touches(point) {
                    player.score += 1;
                    hit = true;
                    log::debug!("{} collected a point, score {}", player.label, player.score);
                }
            }
            if hit {
                point.collect();
            }
        }
    }

    /// Draws the whole scene from current state.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        let canvas = match self.canvas {
            Some(canvas) => canvas,
            None => return,
        };

        surface.fill_rect(0.0, 0.0, canvas.width, canvas.height, hex_color("#0f172a"));

        let grid = hex_color("#1e293b");
        let spacing = self.config.grid_spacing;
        let mut x = 0.0;
        while x < canvas.width {
            surface.stroke_line(x, 0.0, x, canvas.height, 1.0, grid);
            x += spacing;
        }
        let mut y = 0.0;
        while y < canvas.height {
            surface.stroke_line(0.0, y, canvas.width, y, 1.0, grid);
            y += spacing;
        }

        for point in self.points.iter().filter(|point| !point.is_collected()) {
            surface.fill_circle(point.position.x, point.position.y, point.radius, point.color);
        }

        for player in &self.players {
            surface.fill_rect(player.position.x, player.position.y, player.width, player.height, player.color);
            surface.fill_text(player.label, player.position.x + 7.0, player.position.y + 20.0, 14.0, WHITE);
        }

        surface.fill_text(&format!("Player 1: {}", self.players[0].score), 20.0, 30.0, 20.0, WHITE);
        surface.fill_text(
            &format!("Player 2: {}", self.players[1].score),
            canvas.width - 150.0,
            30.0,
            20.0,
            WHITE,
        );
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot_index(slot)]
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.players[slot_index(slot)]
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            frames: self.frame,
            active: self.is_active(),
            players: self
                .players
                .iter()
                .map(|player| PlayerScore {
                    label: player.label.to_string(),
                    score: player.score,
                    x: player.position.x,
                    y: player.position.y,
                })
                .collect(),
            points_spawned: self.points.len(),
            points_remaining: self.points.iter().filter(|p| !p.is_collected()).count(),
        }
    }
}

fn slot_index(slot: PlayerSlot) -> usize {
    match slot {
        PlayerSlot::A => 0,
        PlayerSlot::B => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::scheduler::ManualScheduler;

    fn seeded() -> GameConfig {
        GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        }
    }

    fn mounted() -> (DataDuel, RecordingSurface, ManualScheduler) {
        let mut surface = RecordingSurface::new();
        let mut game = DataDuel::new(seeded()).unwrap();
        game.mount(&mut surface);
        (game, surface, ManualScheduler::new())
    }

    #[test]
    fn unmounted_game_ignores_ticks_and_renders() {
        let mut game = DataDuel::new(seeded()).unwrap();
        let mut surface = RecordingSurface::new();

        game.tick(&mut surface);
        game.render(&mut surface);

        assert_eq!(game.frame(), 0);
        assert!(game.points().is_empty());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn mount_draws_an_initial_frame() {
        let (game, surface, _) = mounted();
        assert!(game.is_mounted());
        assert_eq!(surface.texts(), vec!["DB", "AI", "Player 1: 0", "Player 2: 0"]);
    }

    #[test]
    fn first_tick_spawns_a_point() {
        let (mut game, mut surface, _) = mounted();
        game.tick(&mut surface);
        assert_eq!(game.points().len(), 1);
        assert_eq!(game.frame(), 1);
    }

    #[test]
    fn points_spawn_every_interval() {
        let (mut game, mut surface, _) = mounted();
        for _ in 0..121 {
            game.tick(&mut surface);
        }
        // frames 0, 60 and 120
        assert_eq!(game.points().len(), 3);
    }

    #[test]
    fn render_draws_background_then_grid() {
        let (game, mut surface, _) = mounted();
        surface.clear();
        game.render(&mut surface);

        let commands = surface.commands();
        assert!(matches!(
            commands[0],
            DrawCommand::Rect { x, y, width, height, .. }
                if x == 0.0 && y == 0.0 && width == 800.0 && height == 400.0
        ));
        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        // 20 vertical + 10 horizontal
        assert_eq!(lines, 30);
    }

    #[test]
    fn collected_points_are_not_drawn() {
        let (mut game, mut surface, _) = mounted();
        let center = game.player(PlayerSlot::A).center();
        game.place_point(center);
        game.place_point(Vec2::new(400.0, 100.0));

        game.check_collisions();
        surface.clear();
        game.render(&mut surface);

        assert_eq!(surface.circles(), 1);
    }

    #[test]
    fn key_down_is_ignored_while_paused() {
        let (mut game, _, _) = mounted();
        game.key_down(VirtualKeyCode::W);
        assert!(!game.player(PlayerSlot::A).intents.up);
    }

    #[test]
    fn key_up_applies_while_paused() {
        let (mut game, _, mut scheduler) = mounted();
        game.toggle(&mut scheduler);
        game.key_down(VirtualKeyCode::Right);
        game.toggle(&mut scheduler);

        game.key_up(VirtualKeyCode::Right);
        assert!(!game.player(PlayerSlot::B).intents.right);
    }

    #[test]
    fn toggle_keeps_state() {
        let (mut game, mut surface, mut scheduler) = mounted();
        game.toggle(&mut scheduler);
        let frame = scheduler.next_frame().unwrap();
        game.on_frame(frame, &mut surface, &mut scheduler);
        game.toggle(&mut scheduler);

        assert!(!game.is_active());
        assert_eq!(game.frame(), 1);
        assert_eq!(game.points().len(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn reset_while_running_stays_running() {
        let (mut game, _, mut scheduler) = mounted();
        game.toggle(&mut scheduler);
        game.reset(&mut scheduler);

        assert!(game.is_active());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn unmount_cancels_the_pending_frame() {
        let (mut game, mut surface, mut scheduler) = mounted();
        game.toggle(&mut scheduler);
        game.unmount(&mut scheduler);

        assert!(!game.is_active());
        assert!(!game.is_mounted());
        assert_eq!(scheduler.pending(), 0);

        game.tick(&mut surface);
        assert_eq!(game.frame(), 0);
    }

    #[test]
    fn start_and_reset_wait_for_a_mounted_surface() {
        let mut game = DataDuel::new(seeded()).unwrap();
        let mut scheduler = ManualScheduler::new();

        game.toggle(&mut scheduler);
        game.reset(&mut scheduler);
        assert!(!game.is_active());
        assert_eq!(scheduler.pending(), 0);

        let mut surface = RecordingSurface::new();
        game.mount(&mut surface);
        game.toggle(&mut scheduler);
        let frame = scheduler.next_frame().unwrap();
        assert!(game.on_frame(frame, &mut surface, &mut scheduler));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn frame_without_a_canvas_keeps_the_loop_armed() {
        let (mut game, mut surface, mut scheduler) = mounted();
        game.toggle(&mut scheduler);
        let frame = scheduler.next_frame().unwrap();
        game.canvas = None;

        assert!(!game.on_frame(frame, &mut surface, &mut scheduler));
        assert!(game.is_active());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn invalid_configs_are_rejected_up_front() {
        let zero_interval = GameConfig { spawn_interval: 0, ..GameConfig::default() };
        assert!(matches!(DataDuel::new(zero_interval), Err(DuelError::ConfigError(_))));

        let wide_margin = GameConfig { spawn_margin: 400.0, ..GameConfig::default() };
        assert!(DataDuel::new(wide_margin).is_err());

        let nan_size = GameConfig { player_size: f32::NAN, ..GameConfig::default() };
        assert!(DataDuel::new(nan_size).is_err());
    }

    #[test]
    fn scoreboard_reports_players_and_points() {
        let (mut game, mut surface, _) = mounted();
        game.tick(&mut surface);
        let board = game.scoreboard();

        assert_eq!(board.frames, 1);
        assert_eq!(board.players[0].label, "DB");
        assert_eq!(board.players[1].label, "AI");
        assert_eq!(board.points_spawned, 1);
    }
}
