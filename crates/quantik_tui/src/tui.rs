//! Terminal setup and the event loop.

use crate::app::App;
use crate::{input, ui};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tokio::time::{Duration, sleep};
use tracing::{error, info, instrument};

/// Runs the terminal client until the user quits.
pub async fn run_tui(mut app: App) -> Result<()> {
    info!("Starting Quantik TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.drain_events();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    if let Some(command) = input::map_key(key.code) {
                        app.apply(command);
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Let spawned requests make progress between frames
        sleep(Duration::from_millis(10)).await;
    }
}
