//! Paste service collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// External service that stores text and returns a short retrievable key.
///
/// Implementations report failures as [`crate::Error::Upload`]. The pipeline
/// never catches upload errors.
#[async_trait]
pub trait PasteUploader: Send + Sync {
    /// Store `text` and return its key.
    async fn upload(&self, text: &str) -> Result<String>;
}
