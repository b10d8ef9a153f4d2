//! Rendering for the dual-pane interface
//!
//! The tree pane shows the full serialization of the device tree with the
//! cursor's node highlighted; the detail pane shows a structured YAML dump
//! of the selected record. Both panes scroll independently through their
//! viewports.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use pcix_common::{DeviceRecord, TreeItem};

use super::app::{App, Focus};
use super::theme::Theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    if !app.interactive() {
        draw_progress(frame, app);
        return;
    }

    let tree_lines = {
        let current = app.current();
        let roots: Vec<_> = app.tree.top_level().collect();
        serialize_tree(&roots, &current, &app.theme)
    };
    let detail = detail_text(app.current().record());
    app.sync_viewports(tree_lines.len(), detail.lines().count());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app.geometry.tree_width + 2),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    draw_pane(
        frame,
        panes[0],
        app,
        Focus::Tree,
        Text::from(tree_lines),
        app.tree_view.offset(),
        "w page up • s page down • ←/↓/↑/→ navigate",
    );
    draw_pane(
        frame,
        panes[1],
        app,
        Focus::Detail,
        Text::styled(detail, app.theme.item),
        app.detail_view.offset(),
        "w page up • s page down",
    );

    let help = Paragraph::new("tab next window • esc quit • r refresh").style(app.theme.help);
    frame.render_widget(help, rows[1]);

    draw_status_bar(frame, rows[2], app);
}

fn draw_progress(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.size());
    let gauge = Gauge::default()
        .gauge_style(app.theme.gauge)
        .ratio(f64::from(app.progress.min(100)) / 100.0);
    frame.render_widget(gauge, rows[1]);
}

fn draw_pane(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    pane: Focus,
    content: Text<'static>,
    offset: usize,
    help: &str,
) {
    let theme = &app.theme;
    let focused = app.focus == pane;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(if focused {
            theme.focused_border_set
        } else {
            theme.border_set
        })
        .border_style(if focused {
            theme.focused_border
        } else {
            theme.border
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(content).scroll((offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(body, parts[0]);
    frame.render_widget(Paragraph::new(help).style(theme.help), parts[1]);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let [businfo, hostname, scroll, pane] = app.status_segments();
    let widths = [
        Constraint::Length(businfo.len() as u16 + 2),
        Constraint::Min(0),
        Constraint::Length(scroll.len() as u16 + 2),
        Constraint::Length(pane.len() as u16 + 2),
    ];
    let segments = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    for (index, text) in [businfo, hostname, scroll, pane].into_iter().enumerate() {
        let widget = Paragraph::new(format!(" {text} ")).style(app.theme.status[index]);
        frame.render_widget(widget, segments[index]);
    }
}

/// Serialize the tree into styled lines, one per visible item, marking the
/// current item with the selection style.
pub fn serialize_tree<T: TreeItem>(roots: &[T], current: &T, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for root in roots {
        push_subtree(root, current, theme, "", "", &mut lines);
    }
    lines
}

fn push_subtree<T: TreeItem>(
    item: &T,
    current: &T,
    theme: &Theme,
    label_prefix: &str,
    child_prefix: &str,
    lines: &mut Vec<Line<'static>>,
) {
    if item.hidden() {
        return;
    }
    let style = if item == current {
        theme.item_selected
    } else {
        theme.item
    };
    let mut spans = Vec::new();
    if !label_prefix.is_empty() {
        spans.push(Span::styled(label_prefix.to_string(), theme.enumerator));
    }
    spans.push(Span::styled(item.text(), style));
    lines.push(Line::from(spans));

    let count = item.child_count();
    for index in 0..count {
        let Some(child) = item.child(index) else {
            continue;
        };
        let glyphs = &theme.glyphs;
        let (branch, pipe) = if index + 1 == count {
            (glyphs.last, glyphs.blank)
        } else {
            (glyphs.branch, glyphs.pipe)
        };
        push_subtree(
            &child,
            current,
            theme,
            &format!("{child_prefix}{branch}"),
            &format!("{child_prefix}{pipe}"),
            lines,
        );
    }
}

/// Structured dump of one record for the detail pane.
pub fn detail_text(record: &DeviceRecord) -> String {
    serde_yaml::to_string(record).unwrap_or_else(|err| format!("serialization error: {err}"))
}
