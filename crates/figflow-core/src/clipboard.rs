//! System clipboard access

use crate::error::{Error, Result};

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS pasteboard, via arboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| Error::clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        log::debug!("clipboard <- {:?}", text);
        self.inner
            .set_text(text)
            .map_err(|e| Error::clipboard(e.to_string()))
    }
}
