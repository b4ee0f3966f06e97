//! TUI messages — everything that drives the update loop.
//!
//! Keyboard input arrives from a blocking reader task over an mpsc channel;
//! engine timers and the render interval are multiplexed in the runner.
//! The input reader sends `Quit` if the terminal stops answering.

use crossterm::event::KeyEvent;

use crate::engine::TimerId;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// The engine's pending timer elapsed.
    Timer(TimerId),
    /// Quit the TUI.
    Quit,
}
