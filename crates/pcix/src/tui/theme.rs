//! Styling for the dual-pane interface
//!
//! All style state lives in an explicit `Theme` value built once at startup
//! and passed into the renderer and the view model. Nothing here is global
//! or mutable.

use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border;

/// Branch glyphs used when serializing the tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeGlyphs {
    pub branch: &'static str,
    pub last: &'static str,
    pub pipe: &'static str,
    pub blank: &'static str,
}

impl TreeGlyphs {
    pub const fn unicode() -> Self {
        TreeGlyphs {
            branch: "├── ",
            last: "└── ",
            pipe: "│   ",
            blank: "    ",
        }
    }

    pub const fn ascii() -> Self {
        TreeGlyphs {
            branch: "|-- ",
            last: "`-- ",
            pipe: "|   ",
            blank: "    ",
        }
    }
}

const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

#[derive(Debug, Clone)]
pub struct Theme {
    pub item: Style,
    pub item_selected: Style,
    pub enumerator: Style,
    pub border: Style,
    pub focused_border: Style,
    pub border_set: border::Set,
    pub focused_border_set: border::Set,
    pub gauge: Style,
    pub help: Style,
    /// Status bar segments: bus address, hostname, scroll, active pane.
    pub status: [Style; 4],
    pub glyphs: TreeGlyphs,
}

impl Theme {
    pub fn unicode() -> Self {
        Theme {
            glyphs: TreeGlyphs::unicode(),
            border_set: border::PLAIN,
            // The focused pane gets the thick border, nothing else changes.
            focused_border_set: border::THICK,
            ..Self::base()
        }
    }

    /// ASCII borders cannot get thicker, so focus emphasis comes from bold.
    pub fn ascii() -> Self {
        Theme {
            glyphs: TreeGlyphs::ascii(),
            border_set: ASCII_BORDER,
            focused_border_set: ASCII_BORDER,
            focused_border: Style::default()
                .fg(BORDER_COLOR)
                .add_modifier(Modifier::BOLD),
            ..Self::base()
        }
    }

    fn base() -> Self {
        Theme {
            item: Style::default().fg(FOREGROUND),
            item_selected: Style::default()
                .fg(SELECTED_FOREGROUND)
                .bg(SELECTED_BACKGROUND)
                .add_modifier(Modifier::BOLD),
            enumerator: Style::default().fg(TREE_COLOR),
            border: Style::default().fg(BORDER_COLOR),
            focused_border: Style::default().fg(BORDER_COLOR),
            border_set: border::PLAIN,
            focused_border_set: border::THICK,
            gauge: Style::default().fg(FOREGROUND),
            help: Style::default().fg(HELP_COLOR),
            status: [
                Style::default().fg(Color::White).bg(FOREGROUND),
                Style::default().fg(Color::White).bg(Color::Rgb(0x3c, 0x38, 0x36)),
                Style::default().fg(Color::White).bg(Color::Rgb(0xa5, 0x50, 0xdf)),
                Style::default().fg(Color::White).bg(LAMBDA_PURPLE),
            ],
            glyphs: TreeGlyphs::unicode(),
        }
    }
}

const FOREGROUND: Color = Color::Indexed(212);
const SELECTED_FOREGROUND: Color = Color::Indexed(229);
const SELECTED_BACKGROUND: Color = Color::Indexed(57);
const BORDER_COLOR: Color = Color::Indexed(69);
const TREE_COLOR: Color = Color::Indexed(63);
const HELP_COLOR: Color = Color::Indexed(241);
const LAMBDA_PURPLE: Color = Color::Rgb(0x61, 0x24, 0xdf);
