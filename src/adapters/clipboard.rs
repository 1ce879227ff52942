use crate::domain::ports::Clipboard;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps the last copied text in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.lock().await = Some(text.to_string());
        Ok(())
    }
}

/// A clipboard the host refused access to. Every write fails with the
/// configured reason.
#[derive(Debug, Clone)]
pub struct FailingClipboard {
    reason: String,
}

impl FailingClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl Clipboard for FailingClipboard {
    async fn write_text(&self, _text: &str) -> Result<()> {
        Err(SiteError::ClipboardError {
            message: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok, block_on};

    #[test]
    fn test_clones_share_contents() {
        let clipboard = MemoryClipboard::new();
        let handle = clipboard.clone();

        assert_ok!(block_on(clipboard.write_text("yhu691@gatech.edu")));
        assert_eq!(block_on(handle.contents()).as_deref(), Some("yhu691@gatech.edu"));
    }

    #[test]
    fn test_failing_clipboard_reports_reason() {
        let clipboard = FailingClipboard::new("permission denied");

        let err = assert_err!(block_on(clipboard.write_text("yhu691@gatech.edu")));
        assert!(err.to_string().contains("permission denied"));
    }
}
