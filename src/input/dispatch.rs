//! Input dispatch state machine
//!
//! Converts the per-tick input snapshot into two kinds of output:
//!
//! - **Latched actions** ([`EditAction`]): discrete commands that fire once
//!   per gesture. The dispatcher moves from `Idle` to `ActionLatched` the
//!   tick any chord condition becomes true, fires exactly one action, and
//!   only returns to `Idle` once every chord condition reads false at the
//!   same time. Holding delete across a hundred ticks deletes once.
//! - **Continuous commands** ([`FrameCommands`]): camera movement, rotation,
//!   drag-move, and the live mouse position, re-read every tick with no
//!   debounce.
//!
//! Mouse gestures (pick, drag) are suppressed while the selection dialog is
//! open; keyboard chords are not. WASD reads false while a control key is
//! held so camera movement never collides with ctrl-chorded commands.

use glam::Vec2;

use crate::input::state::{InputState, Key, MouseButton};

/// A discrete edit command, fired at most once per input gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Pick at the current mouse position and begin a drag-move
    PickAndDragStart,
    Delete,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    Save,
    ToggleWireframe,
}

/// Continuous (non-latched) per-tick commands.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameCommands {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub speed_boost: bool,
    /// Right mouse button: camera look/move is active
    pub camera_active: bool,
    /// Left mouse button held outside a dialog: drag-move in progress
    pub drag_move: bool,
    /// Mouse position in window client coordinates, always current
    pub mouse: Vec2,
}

impl FrameCommands {
    /// Reads the continuous command set out of the snapshot.
    #[must_use]
    pub fn capture(input: &InputState, dialog_open: bool) -> Self {
        let ctrl = input.control_held();

        Self {
            // WASD collides with the ctrl-chorded commands, so movement is
            // disabled entirely while control is held.
            forward: !ctrl && input.key(Key::W),
            back: !ctrl && input.key(Key::S),
            left: !ctrl && input.key(Key::A),
            right: !ctrl && input.key(Key::D),
            rotate_left: input.key(Key::Q),
            rotate_right: input.key(Key::E),
            speed_boost: input.shift_held(),
            camera_active: input.mouse_button(MouseButton::Right),
            drag_move: !dialog_open && input.mouse_button(MouseButton::Left),
            mouse: input.mouse_position(),
        }
    }
}

/// The set of chord conditions that participate in the one-shot latch.
#[derive(Debug, Copy, Clone, Default)]
struct Chords {
    pick: bool,
    delete: bool,
    cut: bool,
    copy: bool,
    paste: bool,
    undo: bool,
    redo: bool,
    save: bool,
    wireframe: bool,
}

impl Chords {
    fn read(input: &InputState, dialog_open: bool) -> Self {
        let ctrl = input.control_held();

        Self {
            pick: !dialog_open && input.mouse_button(MouseButton::Left),
            delete: input.key(Key::Delete),
            cut: ctrl && input.key(Key::X),
            copy: ctrl && input.key(Key::C),
            paste: ctrl && input.key(Key::V),
            undo: ctrl && input.key(Key::Z),
            redo: ctrl && input.key(Key::Y),
            save: ctrl && input.key(Key::S),
            wireframe: input.key(Key::Key1) || input.key(Key::Numpad1),
        }
    }

    fn any(self) -> bool {
        self.pick
            || self.delete
            || self.cut
            || self.copy
            || self.paste
            || self.undo
            || self.redo
            || self.save
            || self.wireframe
    }
}

/// One-shot-per-gesture action dispatcher.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    latched: bool,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fired action is still being held.
    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Runs one tick of the latch.
    ///
    /// Takes the snapshot mutably because the save flow must clear the
    /// control and `S` entries after firing: the save dialog blocks the
    /// message loop and swallows the key-up events.
    pub fn dispatch(&mut self, input: &mut InputState, dialog_open: bool) -> Option<EditAction> {
        let chords = Chords::read(input, dialog_open);

        if self.latched {
            // Release only when every condition reads false simultaneously.
            if !chords.any() {
                self.latched = false;
            }
            return None;
        }

        let action = if chords.pick {
            EditAction::PickAndDragStart
        } else if chords.delete {
            EditAction::Delete
        } else if chords.cut {
            EditAction::Cut
        } else if chords.copy {
            EditAction::Copy
        } else if chords.paste {
            EditAction::Paste
        } else if chords.undo {
            EditAction::Undo
        } else if chords.redo {
            EditAction::Redo
        } else if chords.save {
            EditAction::Save
        } else if chords.wireframe {
            EditAction::ToggleWireframe
        } else {
            return None;
        };

        if action == EditAction::Save {
            input.clear_key(Key::ControlLeft);
            input.clear_key(Key::ControlRight);
            input.clear_key(Key::S);
        }

        self.latched = true;
        log::debug!("dispatched {action:?}");
        Some(action)
    }
}
