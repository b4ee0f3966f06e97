//! Rollcall — random student picker.
//!
//! A decelerating roll engine picks one name from a roster; a theme applier
//! maps swappable theme descriptors onto visual assignments. The terminal
//! UI is one collaborator of both; `rollcall pick` is another.

pub mod config;
pub mod engine;
pub mod roster;
pub mod theme;
pub mod tui;
