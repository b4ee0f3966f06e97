//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, spawns the input reader, runs main TEA loop. The
//! engine's single pending timer lives in a [`TimerSlot`] that is re-synced
//! after every update, so a stop or restart cancels the old sleep before
//! anything else can fire.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::engine::timer::TimerSlot;

use super::app::TuiApp;
use super::event::TuiMessage;
use super::layout;

/// Poll timeout of the blocking input reader. Bounds how long it lingers
/// after the loop exits.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Read crossterm key events on a blocking thread and forward them.
fn spawn_input_reader(tx: mpsc::Sender<TuiMessage>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::error!("terminal input failed: {e}");
                    let _ = tx.blocking_send(TuiMessage::Quit);
                    return;
                }
            }
            if let Ok(Event::Key(key)) = event::read() {
                if tx.blocking_send(TuiMessage::Input(key)).is_err() {
                    return;
                }
            }
        }
    });
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(mut app: TuiApp) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel(64);
    spawn_input_reader(tx);

    let mut timer = TimerSlot::new();
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        timer.sync(app.engine.pending_timer());

        tokio::select! {
            id = timer.fired() => {
                app.update(TuiMessage::Timer(id));
            }
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, app))?;
            }
            msg = rx.recv() => match msg {
                Some(msg) => app.update(msg),
                None => app.should_quit = true,
            },
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
