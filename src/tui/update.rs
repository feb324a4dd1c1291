//! State transitions: (App, Action) → Transition, plus tick handling.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions leave
//! the state unchanged (no-op).

use super::state::{Action, App, COPIED_FEEDBACK_MS, Effect, Screen, TICK_INTERVAL, Transition};

/// Apply one user action to the session.
///
/// Ctrl-C ends the session before any per-screen handling.
pub fn update(app: &mut App, action: &Action) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }

    match app.screen {
        Screen::List { cursor } => update_list(app, cursor, action),
        Screen::Detail { selected, visible } => update_detail(app, selected, visible, action),
    }
}

/// Advance timers by one tick.
///
/// Only the detail view's "copied" indicator decays; the list ignores ticks.
pub fn handle_tick(app: &mut App) {
    if !app.is_detail() || !app.copied.active {
        return;
    }

    let step = TICK_INTERVAL.as_millis() as u64;
    app.copied.remaining_ms = app.copied.remaining_ms.saturating_sub(step);
    if app.copied.remaining_ms == 0 {
        app.copied.active = false;
        app.copied.remaining_ms = COPIED_FEEDBACK_MS;
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// List: search input, wrapping cursor movement, drill-down.
fn update_list(app: &mut App, cursor: usize, action: &Action) -> Transition {
    let last = app.last_index();

    let cursor = match action {
        Action::Back => {
            if app.query.is_empty() {
                return Transition::Quit;
            }
            app.query.clear();
            app.refilter();
            cursor
        }
        Action::Up => {
            if cursor == 0 {
                last
            } else {
                cursor - 1
            }
        }
        Action::Down => {
            if cursor >= last {
                0
            } else {
                cursor + 1
            }
        }
        Action::PageUp => 0,
        Action::PageDown => last,
        Action::Enter => {
            if !app.filtered.is_empty() {
                app.screen = Screen::Detail {
                    selected: cursor.min(last),
                    visible: false,
                };
                return Transition::Continue;
            }
            cursor
        }
        Action::Backspace => {
            if app.query.pop().is_some() {
                app.refilter();
            }
            cursor
        }
        Action::Char(c) => {
            app.query.push(*c);
            app.refilter();
            0
        }
        Action::Quit => cursor,
    };

    app.screen = Screen::List {
        cursor: cursor.min(app.last_index()),
    };
    Transition::Continue
}

/// Detail: toggle visibility, copy, back to list, quit.
fn update_detail(app: &mut App, selected: usize, visible: bool, action: &Action) -> Transition {
    match action {
        Action::Back => {
            leave_detail(app, selected);
            Transition::Continue
        }
        Action::Enter => {
            app.screen = Screen::Detail {
                selected,
                visible: !visible,
            };
            Transition::Continue
        }
        Action::Char('q') => Transition::Quit,
        Action::Char('c') => match app.filtered.get(selected) {
            Some(&entry) if app.copy_enabled => Transition::Effect(Effect::CopyCode { entry }),
            _ => Transition::Continue,
        },
        _ => Transition::Continue,
    }
}

/// Return to the full list, keeping the viewed entry under the cursor.
fn leave_detail(app: &mut App, selected: usize) {
    let viewed = app.filtered.get(selected).copied();

    app.query.clear();
    app.refilter();

    let cursor = viewed
        .and_then(|entry| app.filtered.iter().position(|&i| i == entry))
        .unwrap_or(0);
    app.screen = Screen::List { cursor };
}

// ============================================================================
// TESTS
// ============================================================================
