//! Interactive list viewer for grouped stacks.
//!
//! The viewer only reads the decoded dump; all of its state lives in a
//! [`ViewModel`] built per run.

pub mod filter;
pub mod model;
mod render;

pub use filter::{filter, Rank};
pub use model::{Mode, StackItem, ViewModel};

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};
use std::io;
use std::time::Duration;

/// Take over the terminal and run the viewer until the user quits
///
/// **Public** - called by the browse command
pub fn run(mut model: ViewModel) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let guard = TerminalGuard { restored: false };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut model);

    // Loop errors take precedence over restore errors
    let restored = guard.restore();
    result?;
    restored?;

    Ok(())
}

/// Restores the terminal when dropped, including during a panic
struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            let _ = restore_terminal();
        }
    }
}

/// Run every restore step, then report the first failure
fn restore_terminal() -> io::Result<()> {
    let raw_mode = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);

    first_error([raw_mode, screen])
}

fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &mut ViewModel,
) -> Result<()> {
    let mut list_state = ListState::default();

    while !model.should_quit() {
        terminal.draw(|f| render::draw(f, model, &mut list_state))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    model.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
