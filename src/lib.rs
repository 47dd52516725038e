//! kura - tabbed folder browser windows.
//!
//! The library holds the toolkit-independent part: tab and window
//! navigation, per-tab view state, the configuration it resolves from and
//! the registry of live windows. Widgets are reached through the traits in
//! [`collab`]; the `kura` binary backs them with egui.

pub mod collab;
pub mod config;
pub mod error;
pub mod io;
pub mod message;
pub mod model;
pub mod registry;
pub mod state;
pub mod task;
pub mod window;

#[cfg(test)]
mod testing;

pub use error::{NavError, Result};
pub use message::{Effect, Message};
pub use registry::WindowRegistry;
pub use window::{MainWindow, WindowContext};
