//! Platform-agnostic input snapshot
//!
//! Defines input types and the state container that do not depend on any GUI
//! library. Concrete platform adapters are responsible for translating
//! platform events into these types; the dispatch state machine reads the
//! snapshot once per tick. There is deliberately no just-pressed edge
//! tracking here: one-shot semantics belong to the dispatcher's latch, which
//! debounces whole chords rather than single keys.

use std::collections::HashSet;

use glam::Vec2;

/// Keyboard key enumeration (platform-agnostic)
///
/// Covers the working set of an editor session: letters, digit row, numpad
/// digits, modifiers, and the handful of navigation keys the tool binds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number keys
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Numpad digits
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,

    // Control keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,

    // Modifier keys
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Mouse button enumeration
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Per-tick input snapshot
///
/// Mouse position is captured on every injection regardless of what the
/// dispatcher is doing with the rest of the state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed_keys: HashSet<Key>,
    pressed_mouse: HashSet<MouseButton>,
    mouse_position: Vec2,
    screen_size: Vec2,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Injection API (called by the platform adapter) ==========

    /// Injects a keyboard transition
    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                self.pressed_keys.insert(key);
            }
            ButtonState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    /// Injects a mouse button transition
    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                self.pressed_mouse.insert(button);
            }
            ButtonState::Released => {
                self.pressed_mouse.remove(&button);
            }
        }
    }

    /// Injects a mouse position update (window client coordinates)
    pub fn inject_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    /// Injects a window resize
    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    /// Forces a key to read released.
    ///
    /// The save flow needs this: saving opens a blocking dialog, so the
    /// matching key-up events never reach the window and the chord would
    /// otherwise stay latched forever.
    pub fn clear_key(&mut self, key: Key) {
        self.pressed_keys.remove(&key);
    }

    // ========== Query API ==========

    /// Checks whether a key is currently held down
    #[must_use]
    pub fn key(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Checks whether a mouse button is currently held down
    #[must_use]
    pub fn mouse_button(&self, button: MouseButton) -> bool {
        self.pressed_mouse.contains(&button)
    }

    /// Either control key
    #[must_use]
    pub fn control_held(&self) -> bool {
        self.key(Key::ControlLeft) || self.key(Key::ControlRight)
    }

    /// Either shift key
    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.key(Key::ShiftLeft) || self.key(Key::ShiftRight)
    }

    /// Current mouse position in window client coordinates
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Window dimensions
    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}
