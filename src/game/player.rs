// src/game/player.rs
use glam::Vec2;
use crate::{
    config::GameConfig,
    input::{Axis, Direction, PlayerSlot},
    renderer::{hex_color, Color},
};
use super::DataPoint;

/// Which directions a player's keys are currently holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intents {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub slot: PlayerSlot,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub label: &'static str,
    pub speed: f32,
    pub score: u32,
    pub intents: Intents,
}

impl Player {
    pub fn new(slot: PlayerSlot, config: &GameConfig) -> Self {
        let (color, label) = match slot {
            PlayerSlot::A => (hex_color("#2563eb"), "DB"),
            PlayerSlot::B => (hex_color("#10b981"), "AI"),
        };

        Self {
            slot,
            position: Self::start_position(slot, config),
            width: config.player_size,
            height: config.player_size,
            color,
            label,
            speed: config.player_speed,
            score: 0,
            intents: Intents::default(),
        }
    }

    /// A starts near the left edge, B near the right, both at mid height.
    pub fn start_position(slot: PlayerSlot, config: &GameConfig) -> Vec2 {
        let y = config.canvas_height / 2.0;
        match slot {
            PlayerSlot::A => Vec2::new(config.start_margin, y),
            PlayerSlot::B => Vec2::new(
                config.canvas_width - config.start_margin - config.player_size,
                y,
            ),
        }
    }

    pub fn reset(&mut self, config: &GameConfig) {
        self.position = Self::start_position(self.slot, config);
        self.score = 0;
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Moves one frame's worth along every held direction. A step is only
    /// taken while the player is strictly inside that edge, and the result
    /// never leaves the canvas.
    pub fn step(&mut self, canvas: Vec2) {
        let max = Vec2::new(canvas.x - self.width, canvas.y - self.height);
        let mut next = self.position;

        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            if !self.intents.is_held(direction) {
                continue;
            }
            let (current, limit, target) = match direction.axis() {
                Axis::Horizontal => (self.position.x, max.x, &mut next.x),
                Axis::Vertical => (self.position.y, max.y, &mut next.y),
            };
            let inside = if direction.sign() < 0.0 { current > 0.0 } else { current < limit };
            if inside {
                *target += direction.sign() * self.speed;
            }
        }

        self.position = next.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
    }

    /// Strict overlap: a point centre exactly `width / 2 + radius` away
    /// does not count.
    pub fn touches(&self, point: &DataPoint) -> bool {
        self.center().distance(point.position) < self.width / 2.0 + point.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_a() -> Player {
        Player::new(PlayerSlot::A, &GameConfig::default())
    }

    #[test]
    fn players_start_on_opposite_edges() {
        let config = GameConfig::default();
        assert_eq!(Player::start_position(PlayerSlot::A, &config), Vec2::new(50.0, 200.0));
        assert_eq!(Player::start_position(PlayerSlot::B, &config), Vec2::new(720.0, 200.0));
    }

    #[test]
    fn idle_player_does_not_move() {
        let mut player = player_a();
        player.step(Vec2::new(800.0, 400.0));
        assert_eq!(player.position, Vec2::new(50.0, 200.0));
    }

    #[test]
    fn opposite_intents_cancel_out() {
        let mut player = player_a();
        player.intents.set(Direction::Left, true);
        player.intents.set(Direction::Right, true);
        player.step(Vec2::new(800.0, 400.0));
        assert_eq!(player.position.x, 50.0);
    }

    #[test]
    fn each_direction_moves_along_its_own_axis() {
        let cases = [
            (Direction::Up, Vec2::new(50.0, 195.0)),
            (Direction::Down, Vec2::new(50.0, 205.0)),
            (Direction::Left, Vec2::new(45.0, 200.0)),
            (Direction::Right, Vec2::new(55.0, 200.0)),
        ];
        for (direction, expected) in cases {
            let mut player = player_a();
            player.intents.set(direction, true);
            player.step(Vec2::new(800.0, 400.0));
            assert_eq!(player.position, expected, "{:?}", direction);
        }

        let mut player = player_a();
        player.intents.set(Direction::Up, true);
        player.intents.set(Direction::Right, true);
        player.step(Vec2::new(800.0, 400.0));
        assert_eq!(player.position, Vec2::new(55.0, 195.0));
    }

    #[test]
    fn steps_stop_at_the_edge() {
        let mut player = player_a();
        player.intents.set(Direction::Left, true);
        for _ in 0..20 {
            player.step(Vec2::new(800.0, 400.0));
        }
        assert_eq!(player.position.x, 0.0);
    }

    #[test]
    fn overshooting_steps_are_clamped() {
        let mut player = player_a();
        player.speed = 7.0;
        player.intents.set(Direction::Down, true);
        for _ in 0..50 {
            player.step(Vec2::new(800.0, 400.0));
        }
        assert_eq!(player.position.y, 370.0);
    }

    #[test]
    fn releasing_clears_the_intent() {
        let mut intents = Intents::default();
        intents.set(Direction::Up, true);
        assert!(intents.is_held(Direction::Up));
        intents.set(Direction::Up, false);
        assert_eq!(intents, Intents::default());
    }

    #[test]
    fn overlap_threshold_is_exclusive() {
        let player = player_a();
        // centre (65, 215), threshold 15 + 10 = 25
        let at_threshold = DataPoint::new(Vec2::new(90.0, 215.0), 10.0);
        let just_inside = DataPoint::new(Vec2::new(89.9, 215.0), 10.0);

        assert!(!player.touches(&at_threshold));
        assert!(player.touches(&just_inside));
    }
}
