//! Terminal lifecycle and the cooperative event loop
//!
//! Single-threaded: one event (key, resize, timer) is fully processed,
//! including re-render, before the next is accepted. Timers live in a small
//! queue the loop owns; handlers request re-enqueues and "cancel" a timer by
//! not handing one back. Terminal state is restored even when the loop
//! errors out.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::app::{App, AppEvent, Schedule};
use super::render;

/// Poll timeout when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode().context("enabling raw mode (a real TTY is required)")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("entering alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("initializing terminal")?;

    let result = event_loop(&mut terminal, &mut app);
    let cleanup = restore_terminal(&mut terminal);
    result.and(cleanup)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut timers: Vec<(Instant, AppEvent)> = Vec::new();

    let (width, height) = crossterm::terminal::size().context("querying terminal size")?;
    dispatch(app, AppEvent::Resize(width, height), &mut timers);
    push_timer(&mut timers, app.initial_schedule());

    loop {
        terminal
            .draw(|frame| render::draw(frame, app))
            .context("drawing frame")?;
        if app.should_quit {
            break;
        }

        let timeout = timers
            .iter()
            .map(|(deadline, _)| deadline.saturating_duration_since(Instant::now()))
            .min()
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout).context("polling terminal events")? {
            match event::read().context("reading terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    dispatch(app, AppEvent::Key(key), &mut timers);
                }
                Event::Resize(width, height) => {
                    dispatch(app, AppEvent::Resize(width, height), &mut timers);
                }
                _ => {}
            }
        }

        fire_due_timers(app, &mut timers);
    }
    Ok(())
}

fn dispatch(app: &mut App, event: AppEvent, timers: &mut Vec<(Instant, AppEvent)>) {
    for request in app.handle(event) {
        push_timer(timers, request);
    }
}

fn push_timer(timers: &mut Vec<(Instant, AppEvent)>, request: Schedule) {
    timers.push((Instant::now() + request.after, request.event));
}

fn fire_due_timers(app: &mut App, timers: &mut Vec<(Instant, AppEvent)>) {
    let now = Instant::now();
    let mut index = 0;
    while index < timers.len() {
        if timers[index].0 <= now {
            let (_, event) = timers.swap_remove(index);
            dispatch(app, event, timers);
        } else {
            index += 1;
        }
    }
}
