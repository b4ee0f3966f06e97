//! The classroom screen — ratatui TUI presentation layer.
//!
//! This is the rendering collaborator for the engine and the theme
//! applier: it shows the headline and the student cards, turns key presses
//! into start/stop/theme intents, and paints whatever the applied theme
//! assigns.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (message handler) + View (render).
//! Immediate mode, no retained widget state.

pub mod app;
pub mod event;
pub mod input;
pub mod layout;
pub mod palette;
pub mod runner;
