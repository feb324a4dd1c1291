//! Clipboard access with read-back verification.
//!
//! The session writes a code, reads the clipboard back and compares the
//! bytes. Any difference is a failed copy.
//!
//! On Linux the clipboard contents are owned by the process that set
//! them, so [`SystemClipboard`] keeps one `arboard::Clipboard` alive for
//! the whole session instead of creating one per copy.

/// Errors from clipboard access.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),

    #[error("clipboard read failed: {0}")]
    Read(String),

    #[error("clipboard contents differ from the copied code")]
    Mismatch,
}

/// Minimal text clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// System clipboard backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Connect to the system clipboard.
    pub fn init() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(SystemClipboard { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.inner
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))
    }
}

/// Write `text` and confirm the clipboard now holds exactly those bytes.
pub fn copy_verified(clipboard: &mut dyn Clipboard, text: &str) -> Result<(), ClipboardError> {
    clipboard.write_text(text)?;
    let read_back = clipboard.read_text()?;
    if read_back.as_bytes() != text.as_bytes() {
        return Err(ClipboardError::Mismatch);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
