use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// The page-control capability a run drives.
///
/// Calls are issued one at a time and awaited before the next; a commit may
/// re-render the page, so handles are only trusted within the pass that found them.
#[async_trait]
pub trait Surface: Send + Sync {
    type Handle: Send + Sync;

    /// All elements matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Handle>>;

    /// Descendants of `parent` matching `selector`, in document order.
    async fn find_within(&self, parent: &Self::Handle, selector: &str)
        -> Result<Vec<Self::Handle>>;

    async fn is_visible(&self, handle: &Self::Handle) -> Result<bool>;

    async fn is_enabled(&self, handle: &Self::Handle) -> Result<bool>;

    /// Rendered text of the element; empty when it has none.
    async fn read_text(&self, handle: &Self::Handle) -> Result<String>;

    /// Rendered text of the closest ancestor matching `selector`, empty when none matches.
    async fn ancestor_text(&self, handle: &Self::Handle, selector: &str) -> Result<String>;

    /// Replace the element's current value with `text`.
    async fn set_value(&self, handle: &Self::Handle, text: &str) -> Result<()>;

    async fn click(&self, handle: &Self::Handle) -> Result<()>;

    async fn scroll_into_view(&self, handle: &Self::Handle) -> Result<()>;

    /// Save a PNG of the current viewport to `path`.
    async fn capture(&self, path: &Path) -> Result<()>;
}
