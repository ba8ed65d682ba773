//! Keyboard tracking
//!
//! Browser key events land here between frames; the loop turns the current
//! snapshot into a [`TickInput`] once per tick.

use crate::sim::{Asteroid, TickInput};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
}

impl KeyCode {
    /// Map a `KeyboardEvent.code` string. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(KeyCode::ArrowLeft),
            "ArrowRight" => Some(KeyCode::ArrowRight),
            "Space" => Some(KeyCode::Space),
            "Enter" | "NumpadEnter" => Some(KeyCode::Enter),
            _ => None,
        }
    }
}

/// Held movement keys plus one-shot triggers
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
    restart: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::ArrowLeft => self.left = true,
            KeyCode::ArrowRight => self.right = true,
            // Auto-repeat keeps firing, but requests collapse to one per tick
            KeyCode::Space => self.fire = true,
            KeyCode::Enter => self.restart = true,
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::ArrowLeft => self.left = false,
            KeyCode::ArrowRight => self.right = false,
            KeyCode::Space | KeyCode::Enter => {}
        }
    }

    /// Currently held (left, right)
    pub fn movement(&self) -> (bool, bool) {
        (self.left, self.right)
    }

    /// Consume a pending fire request
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire)
    }

    /// Consume a pending restart request
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    /// Build this tick's input, consuming the fire trigger
    pub fn tick_input(&mut self, spawns: Vec<Asteroid>) -> TickInput {
        let (left, right) = self.movement();
        TickInput {
            left,
            right,
            fire: self.take_fire(),
            spawns,
        }
    }

    /// Forget everything (on restart or focus loss)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_codes_ignored() {
        assert_eq!(KeyCode::from_code("KeyQ"), None);
        assert_eq!(KeyCode::from_code(""), None);
        assert_eq!(KeyCode::from_code("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::from_code("NumpadEnter"), Some(KeyCode::Enter));
    }

    #[test]
    fn test_held_keys() {
        let mut keys = KeyState::new();
        keys.key_down(KeyCode::ArrowLeft);
        assert_eq!(keys.movement(), (true, false));

        keys.key_down(KeyCode::ArrowRight);
        assert_eq!(keys.movement(), (true, true));

        keys.key_up(KeyCode::ArrowLeft);
        assert_eq!(keys.movement(), (false, true));
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut keys = KeyState::new();
        keys.key_down(KeyCode::Space);
        keys.key_down(KeyCode::Space); // auto-repeat before the next tick

        let input = keys.tick_input(Vec::new());
        assert!(input.fire);

        let input = keys.tick_input(Vec::new());
        assert!(!input.fire);
    }

    #[test]
    fn test_tick_input_carries_spawns_and_movement() {
        let mut keys = KeyState::new();
        keys.key_down(KeyCode::ArrowRight);
        let input = keys.tick_input(vec![Asteroid::new(5.0, 2.5)]);
        assert!(input.right);
        assert!(!input.left);
        assert_eq!(input.spawns.len(), 1);
    }

    #[test]
    fn test_restart_and_reset() {
        let mut keys = KeyState::new();
        keys.key_down(KeyCode::Enter);
        keys.key_down(KeyCode::ArrowLeft);
        assert!(keys.take_restart());
        assert!(!keys.take_restart());

        keys.reset();
        assert_eq!(keys.movement(), (false, false));
    }
}
