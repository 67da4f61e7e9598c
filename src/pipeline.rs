//! Query pipeline: normalize, tabulate, bound and deliver one answer.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::QueryResult;
use crate::normalize::{Normalize, NormalizeOptions, RawResponse};
use crate::paste::PasteUploader;
use crate::render::{
    collect, present, ImagePages, OverflowDispatcher, RenderOptions, RenderedText, TableOutcome,
    TableRenderer,
};
use crate::transport::{ImagePager, Transport};

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Normalization options
    pub normalize: NormalizeOptions,
    /// Rendering options
    pub render: RenderOptions,
}

impl PipelineConfig {
    /// Load configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Everything derived from one raw response before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Normalized sections
    pub result: QueryResult,
    /// Table attempt
    pub table: TableOutcome,
    /// Images for paged presentation
    pub images: ImagePages,
}

/// What a pipeline run delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text that was sent, if there was any
    pub text: Option<RenderedText>,
    /// Whether images were handed to the pager
    pub images_shown: bool,
}

/// Pipeline entry point.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use answerkit::{Pipeline, PasteUploader, RawResponse, Result};
///
/// struct NoPaste;
///
/// #[async_trait::async_trait]
/// impl PasteUploader for NoPaste {
///     async fn upload(&self, _text: &str) -> Result<String> {
///         Err(answerkit::Error::Upload("disabled".into()))
///     }
/// }
///
/// # async fn run() -> Result<()> {
/// let pipeline = Pipeline::new(Arc::new(NoPaste)).with_max_len(2000);
/// let raw = RawResponse::from_json_str(r#"{"pods": []}"#)?;
/// let answer = pipeline.prepare(&raw)?;
/// let text = pipeline.render(&answer).await?;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    uploader: Arc<dyn PasteUploader>,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new(uploader: Arc<dyn PasteUploader>) -> Self {
        Self {
            config: PipelineConfig::default(),
            uploader,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the transport size limit in bytes.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.config.render.max_len = max_len;
        self
    }

    /// Set the aggregated text budget in characters.
    pub fn with_text_budget(mut self, budget: usize) -> Self {
        self.config.normalize.text_budget = budget;
        self
    }

    /// Set the paste service base URL.
    pub fn with_paste_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.render.paste_base_url = url.into();
        self
    }

    /// Set the code block language tag.
    pub fn with_code_block_lang(mut self, lang: impl Into<String>) -> Self {
        self.config.render.code_block_lang = lang.into();
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalize a response and attempt the table; no I/O.
    pub fn prepare(&self, raw: &RawResponse) -> Result<Answer> {
        let result = raw.normalize(&self.config.normalize)?;
        let table = TableRenderer::new()
            .with_lang(self.config.render.code_block_lang.clone())
            .render(&result);
        let images = collect(&result);
        debug!(
            "prepared {} sections, {} images, tabular: {}",
            result.len(),
            images.len(),
            !table.is_fallback()
        );
        Ok(Answer {
            result,
            table,
            images,
        })
    }

    /// Choose the size-bounded text for a prepared answer.
    pub async fn render(&self, answer: &Answer) -> Result<Option<RenderedText>> {
        self.dispatcher()
            .dispatch(&answer.result, &answer.table, &answer.images)
            .await
    }

    /// Run the whole pipeline: text first, then images.
    ///
    /// Nothing is sent until the text has been decided, so dropping the
    /// returned future never leaves partial output behind.
    pub async fn run(
        &self,
        raw: &RawResponse,
        transport: &dyn Transport,
        pager: &dyn ImagePager,
    ) -> Result<Outcome> {
        let answer = self.prepare(raw)?;
        let dispatcher = self.dispatcher();

        let text = match dispatcher
            .dispatch(&answer.result, &answer.table, &answer.images)
            .await?
        {
            Some(rendered) => Some(dispatcher.deliver(rendered, &answer.images, transport).await?),
            None => None,
        };
        let images_shown = present(&answer.images, pager).await?;

        Ok(Outcome { text, images_shown })
    }

    fn dispatcher(&self) -> OverflowDispatcher<'_> {
        OverflowDispatcher::new(&self.config.render, self.uploader.as_ref())
    }
}
