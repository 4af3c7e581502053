use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::field::{FieldDescriptor, FieldKind, QUESTION_CONTAINER};
use crate::surface::Surface;

/// A visible, enabled element ready to be filled.
pub struct ScannedField<H> {
    /// 1-based position among everything the selector matched.
    pub index: usize,
    pub handle: H,
    pub descriptor: FieldDescriptor,
    /// Visible, enabled options of a group kind; empty otherwise.
    pub options: Vec<H>,
}

/// One entry of a scan. Hidden or disabled elements are dropped, so every entry
/// becomes exactly one outcome.
pub enum Scanned<H> {
    Ready(ScannedField<H>),
    /// Probing the element itself failed.
    Faulted { index: usize, error: Error },
}

pub struct Scanner<'a, S: Surface> {
    surface: &'a S,
}

impl<'a, S: Surface> Scanner<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// Enumerate the fillable elements of `kind` in document order.
    ///
    /// An error here means the discovery query itself failed.
    pub async fn scan(&self, kind: FieldKind) -> Result<Vec<Scanned<S::Handle>>> {
        let found = self.surface.find_all(kind.selector()).await?;
        info!("Found {} {} element(s)", found.len(), kind);

        let mut scanned = Vec::with_capacity(found.len());
        for (i, handle) in found.into_iter().enumerate() {
            let index = i + 1;
            match self.probe(kind, handle).await {
                Ok(Some(field)) => scanned.push(Scanned::Ready(ScannedField { index, ..field })),
                Ok(None) => debug!("Skipping hidden or disabled {kind} {index}"),
                Err(error) => scanned.push(Scanned::Faulted { index, error }),
            }
        }
        Ok(scanned)
    }

    async fn probe(
        &self,
        kind: FieldKind,
        handle: S::Handle,
    ) -> Result<Option<ScannedField<S::Handle>>> {
        if !self.is_fillable(&handle).await? {
            return Ok(None);
        }

        // Only single-line fields are classified by their question.
        let question = if kind == FieldKind::ShortText {
            self.surface
                .ancestor_text(&handle, QUESTION_CONTAINER)
                .await
                .unwrap_or_default()
        } else {
            String::new()
        };

        let options = match kind.option_selector() {
            Some(selector) if kind.is_group() => self.visible_within(&handle, selector).await?,
            _ => Vec::new(),
        };

        Ok(Some(ScannedField {
            index: 0,
            handle,
            descriptor: FieldDescriptor {
                kind,
                visible: true,
                enabled: true,
                question,
            },
            options,
        }))
    }

    async fn is_fillable(&self, handle: &S::Handle) -> Result<bool> {
        Ok(self.surface.is_visible(handle).await? && self.surface.is_enabled(handle).await?)
    }

    /// Visible, enabled descendants of `parent` matching `selector`.
    pub async fn visible_within(&self, parent: &S::Handle, selector: &str) -> Result<Vec<S::Handle>> {
        let mut options = Vec::new();
        for option in self.surface.find_within(parent, selector).await? {
            if self.is_fillable(&option).await? {
                options.push(option);
            }
        }
        Ok(options)
    }

    /// Page-wide visible, enabled matches of `selector`.
    pub async fn visible(&self, selector: &str) -> Result<Vec<S::Handle>> {
        let mut visible = Vec::new();
        for handle in self.surface.find_all(selector).await? {
            if self.is_fillable(&handle).await? {
                visible.push(handle);
            }
        }
        Ok(visible)
    }
}
