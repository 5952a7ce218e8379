// src/renderer/surface.rs

pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Parses `#rrggbb` or `#rgb` into RGBA. Anything else falls back to
/// opaque magenta so a typo is visible on screen.
pub fn hex_color(hex: &str) -> Color {
    const FALLBACK: Color = [1.0, 0.0, 1.0, 1.0];

    let digits = hex.trim_start_matches('#');
    if !digits.is_ascii() {
        return FALLBACK;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);

    let parsed = match digits.len() {
        6 => (
            channel(&digits[0..2]),
            channel(&digits[2..4]),
            channel(&digits[4..6]),
        ),
        3 => {
            let short = |i: usize| {
                let c = &digits[i..i + 1];
                channel(&format!("{}{}", c, c))
            };
            (short(0), short(1), short(2))
        }
        _ => return FALLBACK,
    };

    match parsed {
        (Some(r), Some(g), Some(b)) => [r, g, b, 1.0],
        _ => FALLBACK,
    }
}

/// The drawing primitives a host surface must offer. Coordinates are
/// canvas units with the origin at the top-left corner.
pub trait DrawSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { x: f32, y: f32, width: f32, height: f32, color: Color },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color },
    Circle { x: f32, y: f32, radius: f32, color: Color },
    Text { text: String, x: f32, y: f32, size: f32, color: Color },
}

/// Keeps every draw call of the last frame. Used by the headless host and
/// for inspecting frames in tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect { x, y, width, height, color });
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2, thickness, color });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(hex_color("#FFF"), WHITE);
        assert_eq!(hex_color("#000000"), [0.0, 0.0, 0.0, 1.0]);

        let blue = hex_color("#2563eb");
        assert!((blue[0] - 0x25 as f32 / 255.0).abs() < 1e-6);
        assert!((blue[2] - 0xeb as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn bad_hex_falls_back_to_magenta() {
        assert_eq!(hex_color("#12"), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(hex_color("#zzzzzz"), [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn recording_surface_keeps_calls_in_order() {
        let mut surface = RecordingSurface::new();
        surface.fill_rect(0.0, 0.0, 10.0, 10.0, WHITE);
        surface.fill_circle(5.0, 5.0, 2.0, WHITE);
        surface.fill_text("hi", 1.0, 2.0, 14.0, WHITE);

        assert_eq!(surface.commands().len(), 3);
        assert_eq!(surface.circles(), 1);
        assert_eq!(surface.texts(), vec!["hi"]);

        surface.clear();
        assert!(surface.commands().is_empty());
    }
}
