//! RollEngine — the decelerating random-pick state machine.
//!
//! `Idle → Rolling → (Stopping) → Idle`. The engine never sleeps or spawns:
//! it owns at most one [`PendingTimer`] and the caller (TUI runner, headless
//! driver, or a test) waits out the delay and hands the id back via
//! [`RollEngine::fire`]. Arming a timer always replaces the previous one, so
//! a stale id can never drive a second tick chain.
//!
//! ## Tick law
//!
//! Each tick picks a uniform random roster index, renders it, then computes
//! the delay before the next tick from [`decay::interval_at`]. The tick whose
//! delay reaches the floor is final: the roll goes idle with the last name
//! still on screen.

pub mod decay;
pub mod driver;
pub mod timer;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::roster::Roster;

/// Headline shown when no roll is in progress.
pub const IDLE_LABEL: &str = "随机抽人";

/// Timing knobs for a roll. Loaded from the `timing` config key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Delay before the first tick, and the base of the decay law.
    pub initial_interval_ms: f64,
    /// Multiplier applied per step.
    pub deceleration_rate: f64,
    /// Floor; the tick that reaches it is the last one.
    pub min_interval_ms: f64,
    /// How long the highlight lingers after a roll ends.
    pub settle_ms: u64,
    /// Placeholder headline after a manual stop.
    pub idle_label: String,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 60.0,
            deceleration_rate: 0.95,
            min_interval_ms: 30.0,
            settle_ms: 1500,
            idle_label: IDLE_LABEL.into(),
        }
    }
}

/// Coarse engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPhase {
    Idle,
    Rolling,
    /// Manually stopped; waiting for the settle timer to clear highlights.
    Stopping,
}

/// Identity of an armed timer. Monotonic per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Next step of the roll.
    Tick,
    /// Deferred highlight cleanup after a roll ends.
    Settle,
}

/// The single timer the engine wants armed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub delay: Duration,
}

/// Observable roll state.
#[derive(Debug, Clone, PartialEq)]
pub struct RollState {
    pub is_rolling: bool,
    /// Roster index currently shown, `None` when nothing is highlighted.
    pub current_index: Option<usize>,
    /// Delay computed by the most recent tick (ms).
    pub interval_ms: f64,
    pub step_count: u32,
}

impl RollState {
    fn idle(config: &RollConfig) -> Self {
        Self {
            is_rolling: false,
            current_index: None,
            interval_ms: config.initial_interval_ms,
            step_count: 0,
        }
    }
}

/// Phase changes reported to the view alongside name/highlight updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollEvent {
    Started,
    NameUpdated { index: usize },
    /// Natural end of a roll; `index` is the pick.
    Finished { index: usize },
    /// Manual stop; the idle label is on screen.
    Stopped,
    /// Highlights cleared after the settle delay.
    Settled,
}

/// Rendering collaborator. The engine only ever talks to the UI through this.
pub trait RollView {
    /// Show `text` as the headline.
    fn render_name(&mut self, text: &str);
    /// Highlight exactly one roster entry, or none.
    fn set_highlighted(&mut self, index: Option<usize>);
    /// Phase notifications (flash/pulse cues). Optional.
    fn roll_event(&mut self, _event: RollEvent) {}
}

/// The decelerating picker. Generic over its randomness source so tests can
/// seed it.
pub struct RollEngine<R = StdRng> {
    roster: Roster,
    config: RollConfig,
    rng: R,
    phase: RollPhase,
    state: RollState,
    pending: Option<PendingTimer>,
    next_timer: u64,
    final_step: u32,
    last_pick: Option<usize>,
    ticks_served: u64,
}

impl RollEngine<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn new(roster: Roster, config: RollConfig) -> Self {
        Self::with_rng(roster, config, StdRng::from_entropy())
    }

    /// Engine with a reproducible pick sequence.
    pub fn seeded(roster: Roster, config: RollConfig, seed: u64) -> Self {
        Self::with_rng(roster, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RollEngine<R> {
    pub fn with_rng(roster: Roster, config: RollConfig, rng: R) -> Self {
        let final_step = decay::steps_to_floor(&config);
        let state = RollState::idle(&config);
        Self {
            roster,
            config,
            rng,
            phase: RollPhase::Idle,
            state,
            pending: None,
            next_timer: 0,
            final_step,
            last_pick: None,
            ticks_served: 0,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn state(&self) -> &RollState {
        &self.state
    }

    pub fn is_rolling(&self) -> bool {
        self.phase == RollPhase::Rolling
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    /// Index picked by the last roll that ran to completion.
    /// Survives the settle cleanup.
    pub fn last_pick(&self) -> Option<usize> {
        self.last_pick
    }

    /// Name picked by the last completed roll.
    pub fn last_pick_name(&self) -> Option<&str> {
        self.last_pick.and_then(|i| self.roster.get(i))
    }

    /// Timer the caller should have armed right now, if any.
    pub fn pending_timer(&self) -> Option<PendingTimer> {
        self.pending
    }

    /// Total ticks run over the engine's lifetime.
    pub fn ticks_served(&self) -> u64 {
        self.ticks_served
    }

    /// Begin a roll. Returns false (and does nothing) when already rolling
    /// or when the roster is empty.
    pub fn start(&mut self, view: &mut impl RollView) -> bool {
        if self.phase == RollPhase::Rolling {
            debug!("start ignored: already rolling");
            return false;
        }
        if self.roster.is_empty() {
            debug!("start ignored: roster is empty");
            return false;
        }

        self.phase = RollPhase::Rolling;
        self.state.is_rolling = true;
        self.state.interval_ms = self.config.initial_interval_ms;
        self.state.step_count = 0;
        // Replaces any settle timer left over from the previous roll.
        self.arm(TimerKind::Tick, self.config.initial_interval_ms);

        info!(roster = self.roster.len(), "roll started");
        view.roll_event(RollEvent::Started);
        true
    }

    /// Manual stop. Cancels the pending tick, shows the idle label, and
    /// schedules the settle cleanup. No-op unless rolling.
    pub fn stop(&mut self, view: &mut impl RollView) -> bool {
        if self.phase != RollPhase::Rolling {
            debug!(phase = ?self.phase, "stop ignored: not rolling");
            return false;
        }

        self.pending = None;
        self.phase = RollPhase::Stopping;
        self.state.is_rolling = false;
        view.render_name(&self.config.idle_label);
        view.roll_event(RollEvent::Stopped);
        self.arm(TimerKind::Settle, self.config.settle_ms as f64);

        info!(step = self.state.step_count, "roll stopped by hand");
        true
    }

    /// Deliver an elapsed timer. Ids other than the pending one are stale
    /// and ignored. Returns whether the timer was serviced.
    pub fn fire(&mut self, id: TimerId, view: &mut impl RollView) -> bool {
        let Some(timer) = self.pending else {
            trace!(?id, "timer fired with nothing pending");
            return false;
        };
        if timer.id != id {
            trace!(?id, pending = ?timer.id, "stale timer ignored");
            return false;
        }
        self.pending = None;

        match timer.kind {
            TimerKind::Tick => self.tick(view),
            TimerKind::Settle => self.settle(view),
        }
        true
    }

    fn tick(&mut self, view: &mut impl RollView) {
        if self.phase != RollPhase::Rolling || self.roster.is_empty() {
            return;
        }

        let index = self.rng.gen_range(0..self.roster.len());
        self.state.current_index = Some(index);
        self.ticks_served += 1;
        if let Some(name) = self.roster.get(index) {
            view.render_name(name);
        }
        view.set_highlighted(Some(index));
        view.roll_event(RollEvent::NameUpdated { index });

        let step = self.state.step_count;
        let next = decay::interval_at(&self.config, step);
        self.state.step_count += 1;
        self.state.interval_ms = next;
        debug!(step, index, next_ms = next, "tick");

        if step >= self.final_step || decay::is_final_step(&self.config, step) {
            self.finish(index, view);
        } else {
            self.arm(TimerKind::Tick, next);
        }
    }

    fn finish(&mut self, index: usize, view: &mut impl RollView) {
        self.phase = RollPhase::Idle;
        self.state.is_rolling = false;
        self.last_pick = Some(index);
        view.roll_event(RollEvent::Finished { index });
        self.arm(TimerKind::Settle, self.config.settle_ms as f64);

        info!(
            index,
            name = self.roster.get(index).unwrap_or_default(),
            ticks = self.state.step_count,
            "roll finished"
        );
    }

    fn settle(&mut self, view: &mut impl RollView) {
        self.state.current_index = None;
        view.set_highlighted(None);
        if self.phase == RollPhase::Stopping {
            self.phase = RollPhase::Idle;
        }
        view.roll_event(RollEvent::Settled);
        debug!("highlights cleared");
    }

    fn arm(&mut self, kind: TimerKind, delay_ms: f64) {
        self.next_timer += 1;
        let timer = PendingTimer {
            id: TimerId(self.next_timer),
            kind,
            delay: millis(delay_ms),
        };
        if let Some(previous) = self.pending.replace(timer) {
            trace!(cancelled = ?previous.id, "timer replaced");
        }
    }
}

/// Fractional milliseconds to a `Duration`. Negative and NaN clamp to zero.
fn millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_nanos((ms * 1_000_000.0).round() as u64)
    } else {
        Duration::ZERO
    }
}
