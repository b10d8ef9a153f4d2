//! Dual-pane application state
//!
//! Two states: a startup progress gate driven by a self-rescheduled tick,
//! then the interactive dual-pane view. A single cursor is shared by both
//! panes; the focus flag only decides which pane receives navigation and
//! scroll keys and which border is emphasized.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use pcix_common::{Cursor, DeviceTree, InventoryError, NodeRef};

use super::layout::{self, PaneGeometry};
use super::theme::Theme;
use super::viewport::Viewport;

/// Percentage added per progress tick.
pub const PROGRESS_STEP: u16 = 10;
/// Cadence of the progress tick.
pub const PROGRESS_TICK: Duration = Duration::from_millis(100);
/// Delay of the stubbed refresh command.
pub const REFRESH_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Detail,
}

impl Focus {
    pub fn name(self) -> &'static str {
        match self {
            Focus::Tree => "tree",
            Focus::Detail => "details",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Focus::Tree => Focus::Detail,
            Focus::Detail => Focus::Tree,
        }
    }
}

/// Everything the event loop can feed the application.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    ProgressTick,
    RefreshComplete,
}

/// A request to re-enqueue an event after a delay. Timers are cancelled by
/// simply not handing back another request.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub after: Duration,
    pub event: AppEvent,
}

#[derive(Debug)]
pub struct App {
    pub tree: DeviceTree,
    pub cursor: Cursor,
    pub focus: Focus,
    /// Startup progress percentage; the gate lifts at 100.
    pub progress: u16,
    pub show_progress: bool,
    pub geometry: PaneGeometry,
    pub tree_view: Viewport,
    pub detail_view: Viewport,
    pub hostname: String,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(tree: DeviceTree, hostname: String, theme: Theme) -> Result<Self, InventoryError> {
        let cursor = Cursor::at_first_device(&tree).ok_or(InventoryError::NoPciBuses)?;
        Ok(App {
            tree,
            cursor,
            focus: Focus::Tree,
            progress: 0,
            show_progress: true,
            geometry: layout::compute(0, 0),
            tree_view: Viewport::default(),
            detail_view: Viewport::default(),
            hostname,
            theme,
            should_quit: false,
        })
    }

    /// The first progress tick, fired as soon as the loop starts.
    pub fn initial_schedule(&self) -> Schedule {
        Schedule {
            after: Duration::ZERO,
            event: AppEvent::ProgressTick,
        }
    }

    pub fn interactive(&self) -> bool {
        !self.show_progress
    }

    pub fn current(&self) -> NodeRef<'_> {
        self.tree.node_ref(self.cursor.current())
    }

    pub fn focused_view(&self) -> &Viewport {
        match self.focus {
            Focus::Tree => &self.tree_view,
            Focus::Detail => &self.detail_view,
        }
    }

    fn focused_view_mut(&mut self) -> &mut Viewport {
        match self.focus {
            Focus::Tree => &mut self.tree_view,
            Focus::Detail => &mut self.detail_view,
        }
    }

    /// Status bar segments: bus address, host, focused-pane scroll, pane name.
    pub fn status_segments(&self) -> [String; 4] {
        let record = self.tree.record(self.cursor.current());
        let percent = (self.focused_view().scroll_percent() * 100.0) as u16;
        [
            record.businfo.clone(),
            self.hostname.clone(),
            format!("{percent}%"),
            self.focus.name().to_string(),
        ]
    }

    /// Called by the renderer once pane contents are known for this frame.
    pub fn sync_viewports(&mut self, tree_lines: usize, detail_lines: usize) {
        self.tree_view.set_content_len(tree_lines);
        self.detail_view.set_content_len(detail_lines);
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<Schedule> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(width, height) => {
                self.geometry = layout::compute(width, height);
                self.resize_panes();
                Vec::new()
            }
            AppEvent::ProgressTick => self.handle_progress_tick(),
            AppEvent::RefreshComplete => {
                // Stub: a real refresh would re-read the selected device's
                // sysfs attributes here.
                debug!("refresh timer fired");
                Vec::new()
            }
        }
    }

    fn handle_progress_tick(&mut self) -> Vec<Schedule> {
        if self.progress >= 100 {
            self.show_progress = false;
            return Vec::new();
        }
        self.progress += PROGRESS_STEP;
        vec![Schedule {
            after: PROGRESS_TICK,
            event: AppEvent::ProgressTick,
        }]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Schedule> {
        // Global bindings first; they work even while the progress gate is up.
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.should_quit = true;
                return Vec::new();
            }
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Vec::new();
            }
            (KeyCode::Tab, _) => {
                self.focus = self.focus.toggled();
                self.resize_panes();
                return Vec::new();
            }
            (KeyCode::Char('w'), KeyModifiers::NONE) => {
                self.focused_view_mut().half_page_up();
                return Vec::new();
            }
            (KeyCode::Char('s'), KeyModifiers::NONE) => {
                self.focused_view_mut().half_page_down();
                return Vec::new();
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                return vec![Schedule {
                    after: REFRESH_DELAY,
                    event: AppEvent::RefreshComplete,
                }];
            }
            _ => {}
        }

        // Tree navigation only once interactive and with the tree focused.
        // The detail pane always follows the cursor either way.
        if self.interactive() && self.focus == Focus::Tree {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Up => self.cursor.move_up(&self.tree),
                KeyCode::Down => self.cursor.move_down(&self.tree),
                KeyCode::Left => self.cursor.move_left(&self.tree),
                KeyCode::Right => self.cursor.move_right(&self.tree),
                _ => {}
            }
        }
        Vec::new()
    }

    fn resize_panes(&mut self) {
        let height = self.geometry.pane_height as usize;
        self.tree_view.resize(height);
        self.detail_view.resize(height);
    }
}
