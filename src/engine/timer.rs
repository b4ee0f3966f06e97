//! One-shot tokio timer slot for the engine's pending timer.
//!
//! Holds at most one armed `Sleep`. `sync` re-arms only when the engine's
//! pending id changes, so polling it every loop iteration never restarts a
//! running delay. Dropping a `fired()` future (e.g. a losing `select!` arm)
//! loses nothing: the sleep stays in the slot.

use std::pin::Pin;

use tokio::time::{sleep, Sleep};

use super::{PendingTimer, TimerId};

#[derive(Default)]
pub struct TimerSlot {
    armed: Option<(TimerId, Pin<Box<Sleep>>)>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the slot to the engine's pending timer.
    pub fn sync(&mut self, pending: Option<PendingTimer>) {
        match pending {
            None => self.armed = None,
            Some(timer) if self.armed_id() != Some(timer.id) => {
                self.armed = Some((timer.id, Box::pin(sleep(timer.delay))));
            }
            Some(_) => {}
        }
    }

    pub fn armed_id(&self) -> Option<TimerId> {
        self.armed.as_ref().map(|(id, _)| *id)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Resolve when the armed timer elapses. Pends forever when empty.
    pub async fn fired(&mut self) -> TimerId {
        let Some((id, delay)) = self.armed.as_mut() else {
            return std::future::pending().await;
        };
        delay.as_mut().await;
        let id = *id;
        self.armed = None;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RollConfig, RollEngine, RollView, TimerKind};
    use crate::roster::Roster;
    use std::time::Duration;
    use tokio::time::Instant;

    struct Null;
    impl RollView for Null {
        fn render_name(&mut self, _: &str) {}
        fn set_highlighted(&mut self, _: Option<usize>) {}
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_pending_delay() {
        let mut engine = RollEngine::seeded(Roster::new(["A"]), RollConfig::default(), 1);
        engine.start(&mut Null);
        let pending = engine.pending_timer().unwrap();

        let mut slot = TimerSlot::new();
        slot.sync(Some(pending));
        let began = Instant::now();
        let id = slot.fired().await;

        assert_eq!(id, pending.id);
        assert_eq!(began.elapsed(), Duration::from_millis(60));
        assert!(!slot.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn resync_with_same_id_keeps_running_delay() {
        let mut engine = RollEngine::seeded(Roster::new(["A"]), RollConfig::default(), 1);
        engine.start(&mut Null);
        let pending = engine.pending_timer().unwrap();

        let mut slot = TimerSlot::new();
        let began = Instant::now();
        slot.sync(Some(pending));
        tokio::time::advance(Duration::from_millis(40)).await;
        slot.sync(Some(pending));
        slot.fired().await;

        assert_eq!(began.elapsed(), Duration::from_millis(60));
    }

    #[tokio::test(start_paused = true)]
    async fn new_id_replaces_armed_timer() {
        let mut engine = RollEngine::seeded(Roster::new(["A"]), RollConfig::default(), 1);
        let mut slot = TimerSlot::new();

        engine.start(&mut Null);
        let tick = engine.pending_timer().unwrap();
        slot.sync(Some(tick));
        engine.stop(&mut Null);
        let settle = engine.pending_timer().unwrap();
        assert_eq!(settle.kind, TimerKind::Settle);
        slot.sync(Some(settle));

        assert_eq!(slot.armed_id(), Some(settle.id));
        assert_eq!(slot.fired().await, settle.id);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_slot_never_fires() {
        let mut slot = TimerSlot::new();
        slot.sync(None);
        let waited = tokio::time::timeout(Duration::from_secs(5), slot.fired()).await;
        assert!(waited.is_err());
    }
}
