//! Trackr App - Application state and the command entry points
//!
//! The commands are the only mutation paths into the shared state; a UI
//! surface (kept out of scope here) would invoke them from its event
//! handlers.

pub mod commands;
pub mod state;

pub use state::AppState;
