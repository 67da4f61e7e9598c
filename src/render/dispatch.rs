//! Size-bounded output selection.
//!
//! The dispatcher picks the densest rendering that fits the transport:
//!
//! 1. the table, if tabulation succeeded and it fits;
//! 2. otherwise the flattened text block, if it fits;
//! 3. otherwise a link to the flattened text stored on the paste service.
//!
//! A blank flattened block produces no output at all. The transport may
//! still reject an inline message the size check accepted (it can add its
//! own markup). [`OverflowDispatcher::deliver`] answers that rejection once
//! by switching to a paste link.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::QueryResult;
use crate::paste::PasteUploader;
use crate::transport::Transport;

use super::images::ImagePages;
use super::table::TableOutcome;
use super::text::to_flat_text;
use super::RenderOptions;

/// How rendered text reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    /// Sent directly; guaranteed to fit the configured limit
    Inline,
    /// Short reference to text stored on the paste service
    PasteLink,
}

/// Which rendering the text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Aligned table
    Table,
    /// Flattened lines
    Flat,
}

/// Final text output of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedText {
    /// Delivery kind
    pub kind: RenderKind,
    /// Message text or paste link
    pub content: String,
    /// Rendering the content was produced from
    pub layout: Layout,
}

impl RenderedText {
    /// Create inline text.
    pub fn inline(content: impl Into<String>, layout: Layout) -> Self {
        Self {
            kind: RenderKind::Inline,
            content: content.into(),
            layout,
        }
    }

    /// Create a paste link.
    pub fn paste_link(link: impl Into<String>, layout: Layout) -> Self {
        Self {
            kind: RenderKind::PasteLink,
            content: link.into(),
            layout,
        }
    }

    /// Check if this is inline text.
    pub fn is_inline(&self) -> bool {
        self.kind == RenderKind::Inline
    }

    /// Check if this is a paste link.
    pub fn is_paste_link(&self) -> bool {
        self.kind == RenderKind::PasteLink
    }
}

/// Chooses between table, flat text and paste link.
pub struct OverflowDispatcher<'a> {
    options: &'a RenderOptions,
    uploader: &'a dyn PasteUploader,
}

impl<'a> OverflowDispatcher<'a> {
    /// Create a dispatcher.
    pub fn new(options: &'a RenderOptions, uploader: &'a dyn PasteUploader) -> Self {
        Self { options, uploader }
    }

    /// Pick the output for a query result.
    ///
    /// Returns `Ok(None)` when there is nothing to send. Uploads at most once.
    pub async fn dispatch(
        &self,
        result: &QueryResult,
        table: &TableOutcome,
        images: &ImagePages,
    ) -> Result<Option<RenderedText>> {
        match table {
            TableOutcome::Table(t) if self.options.fits(&t.text) => {
                debug!("dispatch: inline table ({} bytes)", t.text.len());
                return Ok(Some(RenderedText::inline(t.text.clone(), Layout::Table)));
            }
            TableOutcome::Table(t) => warn!(
                "dispatch: table is {} bytes, over the {} byte limit; flattening",
                t.text.len(),
                self.options.max_len
            ),
            TableOutcome::StructuralFallback(reason) => {
                debug!("dispatch: not tabular ({:?}); flattening", reason)
            }
        }

        let flat = to_flat_text(result, &self.options.code_block_lang);
        if flat.trim().is_empty() {
            debug!("dispatch: nothing to send");
            return Ok(None);
        }
        if self.options.fits(&flat) {
            debug!("dispatch: inline flat text ({} bytes)", flat.len());
            return Ok(Some(RenderedText::inline(flat, Layout::Flat)));
        }

        warn!(
            "dispatch: flat text is {} bytes, over the {} byte limit; uploading",
            flat.len(),
            self.options.max_len
        );
        let link = self.upload(&with_images(flat, images)).await?;
        Ok(Some(RenderedText::paste_link(link, Layout::Flat)))
    }

    /// Send rendered text, escalating once to a paste link if the transport
    /// rejects an inline message as oversized.
    ///
    /// Returns what was finally sent.
    pub async fn deliver(
        &self,
        rendered: RenderedText,
        images: &ImagePages,
        transport: &dyn Transport,
    ) -> Result<RenderedText> {
        match transport.send(&rendered.content).await {
            Ok(()) => Ok(rendered),
            Err(e) if e.is_transport_rejection() && rendered.is_inline() => {
                warn!("deliver: {}; falling back to a paste link", e);
                let body = match rendered.layout {
                    Layout::Table => rendered.content,
                    Layout::Flat => with_images(rendered.content, images),
                };
                let link = self.upload(&body).await?;
                let escalated = RenderedText::paste_link(link, rendered.layout);
                transport.send(&escalated.content).await?;
                Ok(escalated)
            }
            Err(e) => Err(e),
        }
    }

    async fn upload(&self, body: &str) -> Result<String> {
        let key = self.uploader.upload(body).await?;
        if key.trim().is_empty() {
            return Err(Error::Upload("paste service returned an empty key".into()));
        }
        Ok(self.options.paste_link(&key))
    }
}

/// Append image references as plain lines so a paste keeps them.
fn with_images(text: String, images: &ImagePages) -> String {
    if images.is_empty() {
        return text;
    }
    let mut body = text;
    for url in images {
        body.push('\n');
        body.push_str(url);
    }
    body
}
