//! End-to-end roll timing against tokio's paused clock.
//!
//! Drives the engine exactly like the TUI runner does: one `TimerSlot`,
//! re-synced after every engine call.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::Instant;

use rollcall::engine::driver::roll_to_completion;
use rollcall::engine::timer::TimerSlot;
use rollcall::engine::{decay, RollConfig, RollEngine, RollPhase, RollView, IDLE_LABEL};
use rollcall::roster::Roster;

const NAMES: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Name(String),
    Highlight(Option<usize>),
}

#[derive(Default)]
struct Recording {
    calls: Vec<(Instant, Call)>,
}

impl Recording {
    fn last_name(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|(_, c)| match c {
            Call::Name(n) => Some(n.as_str()),
            _ => None,
        })
    }

    fn last_highlight(&self) -> Option<(Instant, Option<usize>)> {
        self.calls.iter().rev().find_map(|(at, c)| match c {
            Call::Highlight(h) => Some((*at, *h)),
            _ => None,
        })
    }

    fn name_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|(_, c)| matches!(c, Call::Name(_)))
            .count()
    }
}

impl RollView for Recording {
    fn render_name(&mut self, text: &str) {
        self.calls.push((Instant::now(), Call::Name(text.to_string())));
    }
    fn set_highlighted(&mut self, index: Option<usize>) {
        self.calls.push((Instant::now(), Call::Highlight(index)));
    }
}

fn engine(seed: u64) -> RollEngine<ChaCha8Rng> {
    RollEngine::with_rng(
        Roster::new(NAMES),
        RollConfig::default(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Service timers while `keep_going` holds.
async fn pump(
    engine: &mut RollEngine<ChaCha8Rng>,
    view: &mut Recording,
    slot: &mut TimerSlot,
    keep_going: impl Fn(&RollEngine<ChaCha8Rng>) -> bool,
) {
    while keep_going(&*engine) {
        slot.sync(engine.pending_timer());
        if !slot.is_armed() {
            break;
        }
        let id = slot.fired().await;
        engine.fire(id, view);
    }
}

#[tokio::test(start_paused = true)]
async fn roll_lands_on_roster_name_then_clears_after_settle() {
    let mut engine = engine(2024);
    let mut view = Recording::default();
    let mut slot = TimerSlot::new();

    assert!(engine.start(&mut view));
    pump(&mut engine, &mut view, &mut slot, |e| e.is_rolling()).await;

    assert_eq!(engine.phase(), RollPhase::Idle);
    let index = engine.current_index().expect("index once idle");
    let name = view.last_name().unwrap();
    assert!(NAMES.contains(&name));
    assert_eq!(name, NAMES[index]);
    let (finished_at, highlight) = view.last_highlight().unwrap();
    assert_eq!(highlight, Some(index));

    pump(&mut engine, &mut view, &mut slot, |_| true).await;

    let (cleared_at, highlight) = view.last_highlight().unwrap();
    assert_eq!(highlight, None);
    assert_eq!(cleared_at - finished_at, Duration::from_millis(1500));
    assert_eq!(engine.current_index(), None);
    // The winning name stays on screen after a natural finish.
    assert_eq!(view.last_name(), Some(NAMES[index]));
}

#[tokio::test(start_paused = true)]
async fn repeated_start_keeps_a_single_tick_chain() {
    let mut engine = engine(7);
    let mut view = Recording::default();
    let mut slot = TimerSlot::new();

    assert!(engine.start(&mut view));
    // Hammer start mid-roll; none of these may arm a second chain.
    for _ in 0..3 {
        slot.sync(engine.pending_timer());
        let id = slot.fired().await;
        engine.fire(id, &mut view);
        assert!(!engine.start(&mut view));
    }
    pump(&mut engine, &mut view, &mut slot, |e| e.is_rolling()).await;

    let expected = decay::ticks_per_roll(engine.config()) as usize;
    assert_eq!(view.name_count(), expected);
    assert_eq!(engine.ticks_served(), expected as u64);
}

#[tokio::test(start_paused = true)]
async fn manual_stop_shows_label_and_settles_after_delay() {
    let mut engine = engine(3);
    let mut view = Recording::default();
    let mut slot = TimerSlot::new();

    engine.start(&mut view);
    for _ in 0..4 {
        slot.sync(engine.pending_timer());
        let id = slot.fired().await;
        engine.fire(id, &mut view);
    }
    let stopped_at = Instant::now();
    assert!(engine.stop(&mut view));
    assert_eq!(view.last_name(), Some(IDLE_LABEL));
    assert_eq!(engine.phase(), RollPhase::Stopping);

    pump(&mut engine, &mut view, &mut slot, |_| true).await;

    assert_eq!(engine.phase(), RollPhase::Idle);
    assert_eq!(stopped_at.elapsed(), Duration::from_millis(1500));
    assert_eq!(view.last_highlight().unwrap().1, None);
    assert_eq!(view.name_count(), 5);
    assert_eq!(engine.last_pick(), None);
}

#[tokio::test(start_paused = true)]
async fn stop_while_idle_emits_nothing() {
    let mut engine = engine(1);
    let mut view = Recording::default();
    assert!(!engine.stop(&mut view));
    assert!(view.calls.is_empty());
    assert!(engine.pending_timer().is_none());
}

#[tokio::test(start_paused = true)]
async fn every_seed_terminates_on_a_valid_index() {
    for seed in 0..32 {
        let mut engine = RollEngine::seeded(Roster::new(NAMES), RollConfig::default(), seed);
        let mut view = Recording::default();
        let pick = roll_to_completion(&mut engine, &mut view).await;
        let pick = pick.expect("non-empty roster always picks");
        assert!(pick < NAMES.len());
        assert_eq!(view.last_name(), Some(NAMES[pick]));
    }
}

#[tokio::test(start_paused = true)]
async fn empty_roster_is_refused_without_error() {
    let mut engine = RollEngine::seeded(Roster::new(["", "  "]), RollConfig::default(), 1);
    let mut view = Recording::default();
    assert_eq!(roll_to_completion(&mut engine, &mut view).await, None);
    assert!(view.calls.is_empty());
}
