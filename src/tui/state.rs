//! TUI state algebra: pure types, zero effects.
//!
//! Design principle: Screen variants carry only per-screen transient
//! state (cursor, selection, visibility). Shared data (entries, query,
//! filtered view, feedback flags) lives in App. "Selected iff Detail" is
//! encoded in the Screen type rather than in a sentinel index.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::types::Entry;

/// Interval between tick events.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How long the "copied" indicator stays visible, in milliseconds.
pub const COPIED_FEEDBACK_MS: u64 = 2000;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can react to.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Periodic timer fired.
    Tick,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model: the whole interactive session.
#[derive(Debug)]
pub struct App {
    /// All entries, in file order. Fixed for the session.
    pub entries: Vec<Entry>,

    /// Current search string.
    pub query: String,

    /// Indices into `entries` whose choice contains `query`.
    pub filtered: Vec<usize>,

    /// Current screen, carrying cursor or selection.
    pub screen: Screen,

    /// Whether `c` copies codes. Off when the clipboard failed to open.
    pub copy_enabled: bool,

    /// Transient "copied" indicator.
    pub copied: CopiedFeedback,

    /// Header title line.
    pub title: String,

    /// Set when the session should end after the current event.
    pub should_quit: bool,
}

/// State of the "copied" indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFeedback {
    pub active: bool,
    /// Milliseconds left before the indicator clears.
    pub remaining_ms: u64,
}

impl Default for CopiedFeedback {
    fn default() -> Self {
        CopiedFeedback {
            active: false,
            remaining_ms: COPIED_FEEDBACK_MS,
        }
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Searchable list of entries.
    List {
        /// Focused row, an index into `App::filtered`.
        cursor: usize,
    },

    /// One entry with its rotating code.
    Detail {
        /// Index into `App::filtered`.
        selected: usize,
        /// Code shown in plaintext rather than masked.
        visible: bool,
    },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::List { cursor: 0 }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// Printable keys stay as `Char` because their meaning depends on the
/// screen: search input on the list, commands on the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ctrl-C: end the session from any screen.
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    /// Escape.
    Back,
    Backspace,
    Char(char),
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of handling one action.
#[derive(Debug, PartialEq, Eq)]
pub enum Transition {
    /// State updated in place; render and keep going.
    Continue,
    /// End the session.
    Quit,
    /// Run a side effect, then keep going.
    Effect(Effect),
}

/// Side effect requested by a transition.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Copy the current code of `entries[entry]` to the clipboard.
    CopyCode { entry: usize },
}

// ============================================================================
// CONSTRUCTORS / QUERIES
// ============================================================================

impl App {
    /// Start a session over `entries`, deriving each display string once.
    pub fn new(title: impl Into<String>, mut entries: Vec<Entry>, copy_enabled: bool) -> Self {
        for entry in &mut entries {
            entry.choice = entry.derive_choice();
        }

        let mut app = App {
            entries,
            query: String::new(),
            filtered: Vec::new(),
            screen: Screen::default(),
            copy_enabled,
            copied: CopiedFeedback::default(),
            title: title.into(),
            should_quit: false,
        };
        app.refilter();
        app
    }

    /// Recompute `filtered` from `query`.
    pub fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches(&needle))
            .map(|(i, _)| i)
            .collect();
    }

    /// Last valid cursor index; 0 when nothing matches.
    pub fn last_index(&self) -> usize {
        self.filtered.len().saturating_sub(1)
    }

    /// Filtered entries in display order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.filtered.iter().map(|&i| &self.entries[i])
    }

    /// The entry open in the detail view, if any.
    pub fn selected_entry(&self) -> Option<&Entry> {
        match self.screen {
            Screen::Detail { selected, .. } => {
                self.filtered.get(selected).map(|&i| &self.entries[i])
            }
            Screen::List { .. } => None,
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.screen, Screen::Detail { .. })
    }
}

impl CopiedFeedback {
    /// Show the indicator with a full countdown.
    pub fn start(&mut self) {
        self.active = true;
        self.remaining_ms = COPIED_FEEDBACK_MS;
    }
}

// ============================================================================
// TESTS
// ============================================================================
