// src/game/point.rs
use glam::Vec2;
use rand::Rng;
use crate::{
    config::GameConfig,
    renderer::{hex_color, Color},
};

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    collected: bool,
}

impl DataPoint {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            color: hex_color("#f59e0b"),
            collected: false,
        }
    }

    /// Places a point uniformly inside the canvas, keeping its centre
    /// `spawn_margin` away from every edge.
    pub fn spawn<R: Rng>(rng: &mut R, config: &GameConfig) -> Self {
        let margin = config.spawn_margin;
        let x = rng.gen_range(margin..config.canvas_width - margin);
        let y = rng.gen_range(margin..config.canvas_height - margin);
        Self::new(Vec2::new(x, y), config.point_radius)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// One-way: there is no way to un-collect a point.
    pub fn collect(&mut self) {
        self.collected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spawned_points_stay_inside_the_margin() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let point = DataPoint::spawn(&mut rng, &config);
            assert!(point.position.x >= 20.0 && point.position.x < 780.0);
            assert!(point.position.y >= 20.0 && point.position.y < 380.0);
            assert_eq!(point.radius, 10.0);
            assert!(!point.is_collected());
        }
    }

    #[test]
    fn collecting_is_permanent() {
        let mut point = DataPoint::new(Vec2::new(100.0, 100.0), 10.0);
        point.collect();
        point.collect();
        assert!(point.is_collected());
    }
}
