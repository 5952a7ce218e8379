// src/input/mod.rs
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Sign of the step along the axis in canvas space (y grows downwards).
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up | Direction::Left => -1.0,
            Direction::Down | Direction::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub player: PlayerSlot,
    pub direction: Direction,
}

const fn bind(player: PlayerSlot, direction: Direction) -> Binding {
    Binding { player, direction }
}

/// Both control schemes share one keyboard. Player A steers with WASD,
/// player B with the arrow keys.
pub const KEY_BINDINGS: [(VirtualKeyCode, Binding); 8] = [
    (VirtualKeyCode::W, bind(PlayerSlot::A, Direction::Up)),
    (VirtualKeyCode::S, bind(PlayerSlot::A, Direction::Down)),
    (VirtualKeyCode::A, bind(PlayerSlot::A, Direction::Left)),
    (VirtualKeyCode::D, bind(PlayerSlot::A, Direction::Right)),
    (VirtualKeyCode::Up, bind(PlayerSlot::B, Direction::Up)),
    (VirtualKeyCode::Down, bind(PlayerSlot::B, Direction::Down)),
    (VirtualKeyCode::Left, bind(PlayerSlot::B, Direction::Left)),
    (VirtualKeyCode::Right, bind(PlayerSlot::B, Direction::Right)),
];

pub fn binding_for(key: VirtualKeyCode) -> Option<Binding> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, binding)| *binding)
}

/// Maps browser-style key names (`"w"`, `"ArrowUp"`) onto key codes.
/// Letter keys are matched case-sensitively: a shifted `"W"` is not `w`.
pub fn key_from_name(name: &str) -> Option<VirtualKeyCode> {
    let key = match name {
        "w" => VirtualKeyCode::W,
        "a" => VirtualKeyCode::A,
        "s" => VirtualKeyCode::S,
        "d" => VirtualKeyCode::D,
        "ArrowUp" => VirtualKeyCode::Up,
        "ArrowDown" => VirtualKeyCode::Down,
        "ArrowLeft" => VirtualKeyCode::Left,
        "ArrowRight" => VirtualKeyCode::Right,
        "Escape" => VirtualKeyCode::Escape,
        " " => VirtualKeyCode::Space,
        "Enter" => VirtualKeyCode::Return,
        _ => return None,
    };
    Some(key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(VirtualKeyCode),
    Released(VirtualKeyCode),
}

impl KeyEvent {
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput {
                input: KeyboardInput {
                    state,
                    virtual_keycode: Some(keycode),
                    ..
                },
                ..
            } => Some(match state {
                ElementState::Pressed => KeyEvent::Pressed(*keycode),
                ElementState::Released => KeyEvent::Released(*keycode),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn wasd_drives_player_a() {
        assert_eq!(
            binding_for(VirtualKeyCode::W),
            Some(Binding { player: PlayerSlot::A, direction: Direction::Up })
        );
        assert_eq!(
            binding_for(VirtualKeyCode::D),
            Some(Binding { player: PlayerSlot::A, direction: Direction::Right })
        );
    }

    #[test]
    fn arrows_drive_player_b() {
        assert_eq!(
            binding_for(VirtualKeyCode::Left),
            Some(Binding { player: PlayerSlot::B, direction: Direction::Left })
        );
        assert_eq!(
            binding_for(VirtualKeyCode::Down),
            Some(Binding { player: PlayerSlot::B, direction: Direction::Down })
        );
    }

    #[test]
    fn unbound_keys_have_no_binding() {
        assert_eq!(binding_for(VirtualKeyCode::Space), None);
        assert_eq!(binding_for(VirtualKeyCode::Q), None);
    }

    #[test]
    fn schemes_cover_every_direction_once_per_player() {
        let seen: HashSet<Binding> = KEY_BINDINGS.iter().map(|(_, b)| *b).collect();
        assert_eq!(seen.len(), KEY_BINDINGS.len());

        let keys: HashSet<VirtualKeyCode> = KEY_BINDINGS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), KEY_BINDINGS.len());
    }

    #[test]
    fn browser_names_resolve_to_the_same_bindings() {
        let up = key_from_name("ArrowUp").and_then(binding_for);
        assert_eq!(up, Some(Binding { player: PlayerSlot::B, direction: Direction::Up }));

        let left = key_from_name("a").and_then(binding_for);
        assert_eq!(left, Some(Binding { player: PlayerSlot::A, direction: Direction::Left }));

        assert_eq!(key_from_name("W"), None);
    }

    #[test]
    fn direction_signs_follow_canvas_space() {
        assert_eq!(Direction::Up.sign(), -1.0);
        assert_eq!(Direction::Right.sign(), 1.0);
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Down.axis(), Axis::Vertical);
    }
}
