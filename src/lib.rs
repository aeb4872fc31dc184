//! Always-on-top, frameless, transparent overlay windows for compositing
//! browser content over a video stream.
//!
//! The binary in `main.rs` wires the pieces together: `cli` and `config`
//! produce the window specs, `app` runs the event loop, and the remaining
//! modules each own one concern of the overlay host.

pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod focus;
pub mod menu;
pub mod pin;
pub mod placement;
pub mod registry;
pub mod tray;
pub mod update;
pub mod window;
