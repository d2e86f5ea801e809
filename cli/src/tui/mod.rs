//! Live terminal dashboard.
//!
//! # Architecture
//!
//! - [`App`] - Dashboard handle, refresh schedule, and keyboard handling
//! - [`ui`] - Layout rendering
//! - [`widgets`] - Stat cards and chart widgets built on ratatui primitives

pub mod ui;
pub mod widgets;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use monitor::{Dashboard, RefreshSchedule};
use ratatui::{backend::CrosstermBackend, Terminal};

/// How long to wait for input before redrawing.
const FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// Dashboard state owned by the event loop.
pub struct App {
    dashboard: Dashboard,
    schedule: Option<RefreshSchedule>,
    should_quit: bool,
}

impl App {
    /// Creates the app. The refresh schedule is not started yet.
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            schedule: None,
            should_quit: false,
        }
    }

    /// Runs the first refresh and starts the repeating schedule.
    fn start(&mut self) {
        self.schedule = Some(self.dashboard.start());
    }

    /// Handles a key press.
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                // The cycle runs detached; its outcome lands in the view.
                if self.dashboard.trigger_refresh().is_some() {
                    tracing::info!("Manual refresh triggered");
                }
            }
            _ => {}
        }
    }

    /// Stops the refresh schedule.
    fn shutdown(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.stop();
        }
    }
}

/// Puts the terminal in raw mode on the alternate screen until dropped.
///
/// Dropping restores the terminal, including while unwinding from a panic.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Runs the dashboard until the user quits.
pub async fn run(dashboard: Dashboard) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(dashboard);
    app.start();

    let result = event_loop(&mut terminal, &mut app);
    app.shutdown();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let api_url = app.dashboard.api_base_url().to_string();

    loop {
        let view = app.dashboard.snapshot();
        terminal.draw(|f| ui::draw(f, &view, &api_url))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
