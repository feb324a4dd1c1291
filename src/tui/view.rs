//! Pure rendering: map App state to ratatui widget trees.
//!
//! `render()` draws a header, the list or detail body, and a footer.
//! Everything is derived from the App plus the current unix time passed
//! in by the caller, so a frame can be reproduced exactly in tests.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::totp;

use super::state::{App, Screen};
use super::theme;

/// At or below this many seconds left the code turns yellow.
pub const WARNING_SECS: u64 = 10;

/// At or below this many seconds left the code turns red.
pub const DANGER_SECS: u64 = 5;

const MASK_CHAR: char = '*';

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the session to the terminal frame.
pub fn render(app: &App, now: u64, frame: &mut Frame) {
    let header = header_lines(app);

    let chunks = Layout::vertical([
        Constraint::Length(header.len() as u16), // header
        Constraint::Min(0),                      // content
        Constraint::Length(2),                   // footer
    ])
    .split(frame.area());

    frame.render_widget(Paragraph::new(header), chunks[0]);

    match app.screen {
        Screen::List { cursor } => render_list(app, cursor, frame, chunks[1]),
        Screen::Detail { selected, visible } => {
            render_detail(app, selected, visible, now, frame, chunks[1]);
        }
    }

    let footer = vec![
        Line::from(""),
        Line::from(Span::styled(footer_text(app), theme::STYLE_MUTED)),
    ];
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

// ============================================================================
// HEADER / FOOTER
// ============================================================================

fn header_lines(app: &App) -> Vec<Line<'static>> {
    let rule = "=".repeat(app.title.chars().count());

    let mut lines = vec![
        Line::from(Span::styled(app.title.clone(), theme::STYLE_TITLE)),
        Line::from(rule),
        Line::from(entry_count(app.filtered.len())),
    ];

    if !app.is_detail() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Type to search: "),
            Span::styled(app.query.clone(), theme::STYLE_EMPHASIZED),
        ]));
        lines.push(Line::from(""));
    }

    lines
}

/// "1 entry." / "3 entries."
pub fn entry_count(n: usize) -> String {
    let noun = if n == 1 { "entry" } else { "entries" };
    format!("{} {}.", n, noun)
}

/// Context-sensitive key hints.
pub fn footer_text(app: &App) -> String {
    if app.is_detail() {
        let mut footer = String::from("[esc] back | [q] quit | [enter] toggle visibility");
        if app.copy_enabled {
            footer.push_str(" | [c] copy");
        }
        return footer;
    }

    let mut footer = if app.query.is_empty() {
        String::from("[esc] quit")
    } else {
        String::from("[esc] clear search")
    };
    if !app.filtered.is_empty() {
        footer.push_str(" | [enter] view");
    }
    footer
}

// ============================================================================
// SCREEN: LIST
// ============================================================================

fn render_list(app: &App, cursor: usize, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = app
        .visible_entries()
        .enumerate()
        .map(|(i, entry)| {
            if i == cursor {
                Line::from(vec![
                    Span::styled("> ", theme::STYLE_CURSOR_MARKER),
                    Span::styled(entry.choice.as_str(), theme::STYLE_CURSOR_ROW),
                ])
            } else {
                Line::from(vec![Span::raw("  "), Span::raw(entry.choice.as_str())])
            }
        })
        .collect();

    // Scroll: if cursor is beyond visible area, offset the view
    let visible_height = area.height as usize;
    let scroll_offset = if visible_height > 0 && cursor >= visible_height {
        cursor - visible_height + 1
    } else {
        0
    };

    let list = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(list, area);
}

// ============================================================================
// SCREEN: DETAIL
// ============================================================================

/// How close the current code is to rotating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Warning,
    Danger,
}

impl Urgency {
    pub fn from_remaining(secs: u64) -> Self {
        if secs <= DANGER_SECS {
            Urgency::Danger
        } else if secs <= WARNING_SECS {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }

    fn code_style(self) -> Style {
        match self {
            Urgency::Normal => theme::STYLE_SUCCESS,
            Urgency::Warning => theme::STYLE_WARNING,
            Urgency::Danger => theme::STYLE_DANGER,
        }
    }

    fn remaining_style(self) -> Style {
        match self {
            Urgency::Normal => theme::STYLE_EMPHASIZED,
            Urgency::Warning => theme::STYLE_WARNING,
            Urgency::Danger => theme::STYLE_DANGER,
        }
    }
}

/// Mask unless `visible`, then split into two halves: "123 456".
pub fn format_code(code: &str, visible: bool) -> String {
    let shown: Vec<char> = if visible {
        code.chars().collect()
    } else {
        std::iter::repeat_n(MASK_CHAR, code.chars().count()).collect()
    };
    let (head, tail) = shown.split_at(shown.len() / 2);
    format!(
        "{} {}",
        head.iter().collect::<String>(),
        tail.iter().collect::<String>()
    )
}

fn render_detail(
    app: &App,
    selected: usize,
    visible: bool,
    now: u64,
    frame: &mut Frame,
    area: Rect,
) {
    let Some(&index) = app.filtered.get(selected) else {
        return;
    };
    let entry = &app.entries[index];

    let mut lines = vec![Line::from("")];

    match totp::generate(entry, now) {
        Ok(code) => {
            let remaining = code.remaining(now);
            let urgency = Urgency::from_remaining(remaining);

            let mut code_line = vec![
                Span::raw(format!("{}: ", entry.choice)),
                Span::styled(format_code(&code.code, visible), urgency.code_style()),
            ];
            if app.copied.active {
                code_line.push(Span::styled(" ✓ ", theme::STYLE_SUCCESS));
            }

            lines.push(Line::from(code_line));
            lines.push(Line::from(vec![
                Span::raw("Valid: "),
                Span::styled(format!("{}s", remaining), urgency.remaining_style()),
            ]));
        }
        Err(e) => {
            lines.push(Line::from(vec![
                Span::raw(format!("{}: ", entry.choice)),
                Span::styled(format!("error: {}", e), theme::STYLE_ERROR),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// TESTS
// ============================================================================
