//! Image collection for paged presentation.

use log::debug;

use crate::error::Result;
use crate::model::QueryResult;
use crate::transport::ImagePager;

/// Ordered, finite and restartable sequence of image references.
///
/// Duplicates are kept: every occurrence stands for a distinct result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePages {
    urls: Vec<String>,
}

/// One page of an image sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePage<'a> {
    /// 1-indexed page number
    pub number: usize,
    /// Total number of pages
    pub total: usize,
    /// Image reference shown on this page
    pub url: &'a str,
}

impl ImagePages {
    /// Build a sequence from URLs, skipping blank ones.
    pub fn new(urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            urls: urls.into_iter().filter(|u| !u.trim().is_empty()).collect(),
        }
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Check if there is nothing to present.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterate over the image references from the start.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.urls.iter()
    }

    /// Image references as a slice.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Get a page by 0-based index.
    pub fn page(&self, index: usize) -> Option<ImagePage<'_>> {
        self.urls.get(index).map(|url| ImagePage {
            number: index + 1,
            total: self.urls.len(),
            url,
        })
    }

    /// Iterate over all pages in order.
    pub fn pages(&self) -> impl Iterator<Item = ImagePage<'_>> {
        (0..self.urls.len()).filter_map(move |i| self.page(i))
    }
}

impl<'a> IntoIterator for &'a ImagePages {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collect every image reference of a result in section order.
pub fn collect(result: &QueryResult) -> ImagePages {
    ImagePages::new(
        result
            .sections()
            .iter()
            .flat_map(|s| s.images.iter().cloned()),
    )
}

/// Hand the images to a pager.
///
/// Returns `false` without touching the pager when there is nothing to show.
pub async fn present(pages: &ImagePages, pager: &dyn ImagePager) -> Result<bool> {
    if pages.is_empty() {
        return Ok(false);
    }
    debug!("presenting {} image pages", pages.len());
    pager.paginate(pages).await?;
    Ok(true)
}
