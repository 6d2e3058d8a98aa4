//! System clipboard access.

use arboard::Clipboard;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access failed: {0}")]
    AccessFailed(String),
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens the platform clipboard on first use and keeps it open, since some
/// platforms drop the contents when the owning handle goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => {
                Clipboard::new().map_err(|err| ClipboardError::AccessFailed(err.to_string()))?
            }
        };
        let clipboard = self.inner.insert(clipboard);
        clipboard
            .set_text(text)
            .map_err(|err| ClipboardError::AccessFailed(err.to_string()))
    }
}
