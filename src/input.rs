/// Keys the game reacts to. Anything else is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            " " | "Spacebar" => Some(Key::Space),
            "ArrowUp" | "Up" => Some(Key::ArrowUp),
            "ArrowLeft" | "Left" => Some(Key::ArrowLeft),
            "ArrowRight" | "Right" => Some(Key::ArrowRight),
            _ => None,
        }
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp)
    }

    fn slot(self) -> usize {
        match self {
            Key::Space => 0,
            Key::ArrowUp => 1,
            Key::ArrowLeft => 2,
            Key::ArrowRight => 3,
        }
    }
}

/// Held/not-held state of every recognised key.
///
/// Written by the keyboard listeners, read once per frame by [`crate::game::Game::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    held: [bool; 4],
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.slot()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.slot()] = false;
    }

    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.slot()]
    }

    pub fn jump_held(&self) -> bool {
        self.is_held(Key::Space) || self.is_held(Key::ArrowUp)
    }

    /// -1, 0 or +1. Right wins when both arrows are down.
    pub fn horizontal(&self) -> f64 {
        if self.is_held(Key::ArrowRight) {
            1.0
        } else if self.is_held(Key::ArrowLeft) {
            -1.0
        } else {
            0.0
        }
    }
}
