use std::path::Path;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::Page as CrPage;
use chromiumoxide::page::ScreenshotParams;

use crate::element::Element;
use crate::error::{Error, Result};
use crate::surface::Surface;

/// Wrapper around a chromiumoxide Page, exposed to the filler as a [`Surface`].
pub struct Page {
    inner: CrPage,
}

impl Page {
    pub(crate) fn new(inner: CrPage) -> Self {
        Self { inner }
    }

    /// Returns a reference to the underlying chromiumoxide Page.
    pub fn inner(&self) -> &CrPage {
        &self.inner
    }

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        Ok(())
    }

    /// Get the current page title.
    pub async fn title(&self) -> Result<String> {
        let result = self
            .inner
            .evaluate("document.title")
            .await
            .map_err(|e| Error::Js(e.to_string()))?;
        Ok(result.into_value::<String>().unwrap_or_default())
    }

    /// Take a screenshot and save it to a file.
    pub async fn screenshot_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        self.inner
            .save_screenshot(params, path)
            .await
            .map_err(|e| Error::Screenshot(e.to_string()))?;
        Ok(())
    }

    /// Find all elements matching the given CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let els = self
            .inner
            .find_elements(selector)
            .await
            .map_err(|e| Error::ElementNotFound(format!("{selector}: {e}")))?;
        Ok(els.into_iter().map(Element::new).collect())
    }
}

#[async_trait]
impl Surface for Page {
    type Handle = Element;

    async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        self.find_elements(selector).await
    }

    async fn find_within(&self, parent: &Element, selector: &str) -> Result<Vec<Element>> {
        parent.find_elements(selector).await
    }

    async fn is_visible(&self, handle: &Element) -> Result<bool> {
        handle.is_visible().await
    }

    async fn is_enabled(&self, handle: &Element) -> Result<bool> {
        handle.is_enabled().await
    }

    async fn read_text(&self, handle: &Element) -> Result<String> {
        handle.text().await
    }

    async fn ancestor_text(&self, handle: &Element, selector: &str) -> Result<String> {
        handle.closest_text(selector).await
    }

    async fn set_value(&self, handle: &Element, text: &str) -> Result<()> {
        handle.clear().await?;
        handle.click().await?;
        handle.type_text(text).await
    }

    async fn click(&self, handle: &Element) -> Result<()> {
        handle.click().await
    }

    async fn scroll_into_view(&self, handle: &Element) -> Result<()> {
        handle.scroll_into_view().await
    }

    async fn capture(&self, path: &Path) -> Result<()> {
        self.screenshot_to_file(path).await
    }
}
