//! Headless driver — runs one roll against real (tokio) time.
//!
//! Used by `rollcall pick` and the end-to-end tests. The TUI runner does
//! the same dance inside its `select!` loop.

use rand::Rng;

use super::timer::TimerSlot;
use super::{RollEngine, RollView};

/// Start a roll and service timers until none is pending (the settle
/// cleanup included). Returns the picked index, or `None` when the engine
/// refused to start or the roll was stopped by hand.
pub async fn roll_to_completion<R: Rng>(
    engine: &mut RollEngine<R>,
    view: &mut impl RollView,
) -> Option<usize> {
    let before = engine.ticks_served();
    if !engine.start(view) {
        return None;
    }

    let mut slot = TimerSlot::new();
    loop {
        slot.sync(engine.pending_timer());
        if !slot.is_armed() {
            break;
        }
        let id = slot.fired().await;
        engine.fire(id, view);
    }

    tracing::debug!(ticks = engine.ticks_served() - before, "headless roll done");
    engine.last_pick()
}
