//! Input handling
//!
//! Three layers, from the platform inward:
//! - [`adapter`] translates winit window events into the snapshot (feature `winit`)
//! - [`state`] holds the platform-agnostic per-tick input snapshot
//! - [`dispatch`] turns the snapshot into debounced edit actions and
//!   continuous per-frame commands

#[cfg(feature = "winit")]
pub mod adapter;
pub mod dispatch;
pub mod state;

pub use dispatch::{Dispatcher, EditAction, FrameCommands};
pub use state::{ButtonState, InputState, Key, MouseButton};
