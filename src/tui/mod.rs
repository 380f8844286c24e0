mod actions;
mod app;
mod event;
mod host;
mod theme;
mod ui;
pub mod widgets;

use crate::config::Config;
use crate::error::{CarouscrollError, Result};
pub use app::{App, ContentSource};
pub use host::TerminalHost;

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

/// Run the TUI application
pub fn run(config: Config, source: ContentSource, labels: Option<Vec<String>>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| CarouscrollError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| CarouscrollError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CarouscrollError::Tui(e.to_string()))?;

    // Create app and run
    let res = terminal
        .size()
        .map_err(|e| CarouscrollError::Tui(e.to_string()))
        .and_then(|size| {
            let mut app = App::new(config, source, labels, Rect::new(0, 0, size.width, size.height))?;
            run_app(&mut terminal, &mut app)
        });

    // Restore terminal
    disable_raw_mode().map_err(|e| CarouscrollError::Tui(e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| CarouscrollError::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| CarouscrollError::Tui(e.to_string()))?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let events = event::EventHandler::new(app.config.tick_rate_ms.max(1));

    while app.running {
        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| CarouscrollError::Tui(e.to_string()))?;

        match events.next()? {
            event::Event::Key(key) => actions::handle_key_event(app, key)?,
            event::Event::Mouse(mouse) => actions::handle_mouse_event(app, mouse)?,
            event::Event::Resize(width, height) => app.resize(width, height)?,
            event::Event::Tick => app.tick()?,
        }
    }

    Ok(())
}
