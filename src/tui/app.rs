//! TuiApp — the TEA model.
//!
//! All state lives here. Update receives TuiMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view.

use std::collections::VecDeque;

use tracing::info;

use crate::engine::{RollEngine, RollEvent, RollView};
use crate::theme::{select_theme, ThemeApplier, ThemeCatalog, ThemeDescriptor};

use super::event::TuiMessage;

/// Maximum number of finished picks remembered for the footer.
const HISTORY_CAPACITY: usize = 8;

/// Animation cue on the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCue {
    None,
    /// Names are cycling.
    Flash,
    /// A roll just ended.
    Pulse,
}

/// What the engine has told the view. Implements [`RollView`].
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub headline: String,
    pub highlighted: Option<usize>,
    pub cue: DisplayCue,
    /// Recent picks, newest last.
    pub history: VecDeque<String>,
}

impl DisplayState {
    fn new(headline: &str) -> Self {
        Self {
            headline: headline.to_string(),
            highlighted: None,
            cue: DisplayCue::None,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }
}

impl RollView for DisplayState {
    fn render_name(&mut self, text: &str) {
        self.headline.clear();
        self.headline.push_str(text);
    }

    fn set_highlighted(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    fn roll_event(&mut self, event: RollEvent) {
        match event {
            RollEvent::Started => self.cue = DisplayCue::Flash,
            RollEvent::NameUpdated { .. } => {}
            RollEvent::Finished { .. } => {
                self.cue = DisplayCue::Pulse;
                if self.history.len() >= HISTORY_CAPACITY {
                    self.history.pop_front();
                }
                self.history.push_back(self.headline.clone());
            }
            RollEvent::Stopped => self.cue = DisplayCue::Pulse,
            RollEvent::Settled => self.cue = DisplayCue::None,
        }
    }
}

/// The main TUI application state (TEA model).
pub struct TuiApp {
    pub engine: RollEngine,
    pub applier: ThemeApplier,
    pub catalog: ThemeCatalog,
    /// Index into `catalog` of the applied theme.
    pub theme_index: usize,
    pub display: DisplayState,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl TuiApp {
    /// Build the model and apply the initial theme (by name, else the
    /// catalog's first entry).
    pub fn new(engine: RollEngine, catalog: ThemeCatalog, theme: Option<&str>) -> Self {
        let display = DisplayState::new(&engine.config().idle_label);
        let mut app = Self {
            engine,
            applier: ThemeApplier::new(),
            catalog,
            theme_index: 0,
            display,
            should_quit: false,
        };

        let index = match theme {
            Some(name) => app.catalog.find(name).unwrap_or_else(|| {
                tracing::warn!("unknown theme {name:?}, using the default");
                0
            }),
            None => 0,
        };
        app.on_theme_index(index);
        app
    }

    /// Process a message (TEA update).
    pub fn update(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Input(key) => super::input::handle_key(self, key),
            TuiMessage::Timer(id) => {
                self.engine.fire(id, &mut self.display);
            }
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    pub fn on_user_start(&mut self) {
        self.engine.start(&mut self.display);
    }

    pub fn on_user_stop(&mut self) {
        self.engine.stop(&mut self.display);
    }

    pub fn toggle_roll(&mut self) {
        if self.engine.is_rolling() {
            self.on_user_stop();
        } else {
            self.on_user_start();
        }
    }

    /// Apply the catalog theme at `index`. Out of range is ignored.
    pub fn on_theme_index(&mut self, index: usize) {
        let Some(theme) = self.catalog.get(index).cloned() else {
            return;
        };
        self.theme_index = index;
        self.on_theme_selected(theme);
    }

    pub fn cycle_theme(&mut self) {
        let next = self.catalog.next_index(self.theme_index);
        self.on_theme_index(next);
    }

    /// Theme selection from raw JSON (`--theme-json`). Unparseable input
    /// applies the default.
    pub fn on_theme_json(&mut self, raw: &str) {
        let theme = select_theme(raw);
        self.theme_index = self.catalog.find(&theme.theme_name).unwrap_or(0);
        self.on_theme_selected(theme);
    }

    /// Apply a theme and re-derive the highlight with its colors. When no
    /// roll is running the headline resets to the idle label.
    pub fn on_theme_selected(&mut self, theme: ThemeDescriptor) {
        info!(theme = %theme.theme_name, "theme selected");
        self.applier.apply(theme);
        self.display.set_highlighted(self.engine.current_index());
        if !self.engine.is_rolling() {
            let label = self.engine.config().idle_label.clone();
            self.display.render_name(&label);
            self.display.cue = DisplayCue::None;
        }
    }

    /// Themes in presentation order.
    pub fn list_themes(&self) -> &[ThemeDescriptor] {
        self.catalog.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RollConfig, TimerKind, IDLE_LABEL};
    use crate::roster::Roster;
    use crate::theme::DEFAULT_THEME_NAME;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::with_themes([
            ThemeDescriptor {
                theme_name: "海洋".into(),
                student_card_selected_background: "#0077be".into(),
                ..ThemeDescriptor::default()
            },
            ThemeDescriptor {
                theme_name: "森林".into(),
                ..ThemeDescriptor::default()
            },
        ])
    }

    fn app(names: &[&str]) -> TuiApp {
        let engine = RollEngine::seeded(
            Roster::new(names.iter().copied()),
            RollConfig::default(),
            11,
        );
        TuiApp::new(engine, catalog(), None)
    }

    fn run_ticks(app: &mut TuiApp) {
        while let Some(t) = app.engine.pending_timer() {
            if t.kind != TimerKind::Tick {
                break;
            }
            app.update(TuiMessage::Timer(t.id));
        }
    }

    #[test]
    fn starts_on_idle_label_with_first_theme() {
        let a = app(&["A"]);
        assert_eq!(a.display.headline, IDLE_LABEL);
        assert_eq!(a.theme_index, 0);
        assert_eq!(a.applier.current().theme_name, DEFAULT_THEME_NAME);
    }

    #[test]
    fn initial_theme_by_name() {
        let engine = RollEngine::seeded(Roster::new(["A"]), RollConfig::default(), 1);
        let a = TuiApp::new(engine, catalog(), Some("森林"));
        assert_eq!(a.theme_index, 2);

        let engine = RollEngine::seeded(Roster::new(["A"]), RollConfig::default(), 1);
        let a = TuiApp::new(engine, catalog(), Some("沙漠"));
        assert_eq!(a.theme_index, 0);
    }

    #[test]
    fn full_roll_through_update_loop() {
        let mut a = app(&["A", "B", "C"]);
        a.on_user_start();
        assert_eq!(a.display.cue, DisplayCue::Flash);
        run_ticks(&mut a);

        let pick = a.engine.last_pick().unwrap();
        assert_eq!(a.display.highlighted, Some(pick));
        assert_eq!(a.display.headline, ["A", "B", "C"][pick]);
        assert_eq!(a.display.cue, DisplayCue::Pulse);
        assert_eq!(a.display.history.back().map(String::as_str), Some(["A", "B", "C"][pick]));

        let settle = a.engine.pending_timer().unwrap();
        a.update(TuiMessage::Timer(settle.id));
        assert_eq!(a.display.highlighted, None);
        assert_eq!(a.display.cue, DisplayCue::None);
    }

    #[test]
    fn theme_change_mid_roll_keeps_headline_and_highlight() {
        let mut a = app(&["A", "B", "C"]);
        a.on_user_start();
        let t = a.engine.pending_timer().unwrap();
        a.update(TuiMessage::Timer(t.id));
        let shown = a.display.headline.clone();
        let index = a.engine.current_index();

        a.on_theme_index(1);
        assert_eq!(a.display.headline, shown);
        assert_eq!(a.display.highlighted, index);
        let style = a.applier.card_style(index.unwrap(), a.display.highlighted);
        assert_eq!(style.background, "#0077be");
    }

    #[test]
    fn theme_change_while_idle_resets_headline() {
        let mut a = app(&["A", "B"]);
        a.on_user_start();
        run_ticks(&mut a);
        assert_ne!(a.display.headline, IDLE_LABEL);

        a.cycle_theme();
        assert_eq!(a.theme_index, 1);
        assert_eq!(a.display.headline, IDLE_LABEL);
    }

    #[test]
    fn bad_theme_json_applies_default() {
        let mut a = app(&["A"]);
        a.on_theme_index(2);
        a.on_theme_json("{broken");
        assert_eq!(a.applier.current(), &ThemeDescriptor::default());
        assert_eq!(a.theme_index, 0);
    }

    #[test]
    fn theme_json_selects_matching_catalog_entry() {
        let mut a = app(&["A"]);
        a.on_theme_json(r#"{"themeName":"森林"}"#);
        assert_eq!(a.theme_index, 2);
    }

    #[test]
    fn raw_theme_json_overrides_named_startup_theme() {
        let engine = RollEngine::seeded(Roster::new(["A"]), RollConfig::default(), 1);
        let mut a = TuiApp::new(engine, catalog(), Some("海洋"));
        assert_eq!(a.theme_index, 1);

        a.on_theme_json(r##"{"themeName":"自定义","backgroundColor":"#101010"}"##);
        assert_eq!(a.applier.current().theme_name, "自定义");
        assert_eq!(a.applier.current().background_color, "#101010");
        // Not in the catalog, so the footer marks the default slot.
        assert_eq!(a.theme_index, 0);
        assert_eq!(a.display.headline, IDLE_LABEL);
    }

    #[test]
    fn empty_roster_start_is_ignored() {
        let mut a = app(&[]);
        a.on_user_start();
        assert!(!a.engine.is_rolling());
        assert_eq!(a.display.cue, DisplayCue::None);
    }

    #[test]
    fn quit_message() {
        let mut a = app(&["A"]);
        a.update(TuiMessage::Quit);
        assert!(a.should_quit);
    }

    #[test]
    fn list_themes_in_presentation_order() {
        let a = app(&["A"]);
        let names: Vec<&str> = a.list_themes().iter().map(|t| t.theme_name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_THEME_NAME, "海洋", "森林"]);
    }
}
