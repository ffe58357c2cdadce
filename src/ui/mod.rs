//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Phase dispatch, title bar and pill row
//! - `grid` - Card grid widget
//! - `helpers` - Background task spawning
//! - `status` - Status bar widget

mod events;
mod grid;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod status;

pub use helpers::spawn_feed_load;
pub use loop_runner::{run, Action};
