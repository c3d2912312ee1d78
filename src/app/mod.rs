use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::AppConfig;
use crate::storage::VaultStore;
use crate::ui;

pub mod actions;
pub mod controller;
pub mod list;
pub mod state;

pub use controller::{ModeController, Outcome};
pub use list::{FilterState, NoteList};
pub use state::{FilenameInput, Mode, NoteBuffer};

pub struct App {
    controller: ModeController,
}

impl App {
    pub fn new(config: Arc<AppConfig>, store: VaultStore) -> Self {
        Self {
            controller: ModeController::new(config, store),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let size = terminal.size().context("reading terminal size")?;
        self.controller.resize(size.width, size.height);
        let result = self.event_loop(&mut terminal);
        self.controller.shutdown();
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|frame| ui::draw_app(frame, &self.controller))
                .context("rendering frame")?;

            let event = event::read().context("reading terminal event")?;
            if let Event::Key(key) = &event {
                tracing::trace!(?key, mode = %self.controller.mode(), "key event");
            }
            if self.controller.handle_event(event) == Outcome::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("switching to alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("creating terminal backend")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("restoring screen state")?;
    Ok(())
}
