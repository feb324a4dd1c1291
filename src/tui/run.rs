//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! to the wall clock, and to the clipboard.
//!
//! Architecture: a key reader thread forwards crossterm key events into
//! an mpsc channel. The event loop waits on that channel with a timeout
//! set to the next tick deadline; a timeout is the tick. Every event is
//! handled to completion before the next frame is drawn.

use std::convert::Infallible;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::clipboard::{Clipboard, ClipboardError, copy_verified};
use crate::totp;

use super::state::{Action, App, AppEvent, Effect, TICK_INTERVAL, Transition};
use super::update::{handle_tick, update};
use super::view::render;

/// Errors that end the session abnormally.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("copy failed: {0}")]
    Copy(#[from] ClipboardError),
}

/// Backends that cannot fail, such as the in-memory test backend.
impl From<Infallible> for SessionError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::Char(c)),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode, discarding the session's screen.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Spawn a thread that reads crossterm events and forwards key events to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore mouse, resize, etc.
                Err(e) => {
                    tracing::warn!("key reader stopped: {}", e);
                    break;
                }
            }
        }
    });
}

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive session until the user quits or a copy fails.
///
/// `clipboard` is None when copying is unavailable for this session.
pub fn run(mut app: App, mut clipboard: Option<Box<dyn Clipboard>>) -> Result<(), SessionError> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    let result = event_loop(&mut terminal, &mut app, clipboard.as_deref_mut(), &rx);

    finish(result, restore_terminal())
}

/// Combine the session outcome with terminal restoration.
///
/// A session error outranks a restore failure; the latter is only logged then.
fn finish(result: Result<(), SessionError>, restored: io::Result<()>) -> Result<(), SessionError> {
    match (result, restored) {
        (Ok(()), Err(e)) => Err(e.into()),
        (Err(session), Err(e)) => {
            tracing::error!("failed to restore terminal: {}", e);
            Err(session)
        }
        (result, Ok(())) => result,
    }
}

fn event_loop<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut clipboard: Option<&mut (dyn Clipboard + 'static)>,
    rx: &Receiver<AppEvent>,
) -> Result<(), SessionError>
where
    B: Backend,
    SessionError: From<B::Error>,
{
    let mut next_tick = Instant::now() + TICK_INTERVAL;

    loop {
        terminal.draw(|frame| render(app, unix_now(), frame))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        let event = match rx.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => {
                next_tick = Instant::now() + TICK_INTERVAL;
                AppEvent::Tick
            }
            Err(RecvTimeoutError::Disconnected) => break, // key reader gone
        };

        if let Err(e) = handle_event(app, event, clipboard.as_deref_mut(), unix_now()) {
            tracing::error!("ending session: {}", e);
            return Err(e);
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}

/// Handle one event to completion.
///
/// An error here is fatal: the caller must stop without drawing again.
pub fn handle_event(
    app: &mut App,
    event: AppEvent,
    clipboard: Option<&mut (dyn Clipboard + 'static)>,
    now: u64,
) -> Result<(), SessionError> {
    match event {
        AppEvent::Tick => handle_tick(app),
        AppEvent::Key(key) => {
            let Some(action) = map_key(key) else {
                return Ok(());
            };
            match update(app, &action) {
                Transition::Continue => {}
                Transition::Quit => app.should_quit = true,
                Transition::Effect(effect) => handle_effect(effect, app, clipboard, now)?,
            }
        }
    }
    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a transition.
fn handle_effect(
    effect: Effect,
    app: &mut App,
    clipboard: Option<&mut (dyn Clipboard + 'static)>,
    now: u64,
) -> Result<(), SessionError> {
    match effect {
        Effect::CopyCode { entry } => {
            let Some(clipboard) = clipboard else {
                return Ok(());
            };
            let Some(entry) = app.entries.get(entry) else {
                return Ok(());
            };

            // No code to copy when generation fails; the view shows why.
            let code = match totp::generate(entry, now) {
                Ok(code) => code,
                Err(e) => {
                    tracing::debug!(entry = %entry.choice, "nothing to copy: {}", e);
                    return Ok(());
                }
            };

            copy_verified(clipboard, &code.code)?;
            tracing::info!(entry = %entry.choice, "code copied to clipboard");
            app.copied.start();
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
