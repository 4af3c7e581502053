use chromiumoxide::element::Element as CrElement;

use crate::error::{Error, Result};

const IS_VISIBLE_JS: &str = r#"function() {
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 || rect.height > 0;
}"#;

const IS_ENABLED_JS: &str = r#"function() {
    return !this.disabled && this.getAttribute('aria-disabled') !== 'true';
}"#;

const CLEAR_JS: &str = r#"function() {
    this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
}"#;

/// Wrapper around a chromiumoxide Element, providing a simplified API.
pub struct Element {
    inner: CrElement,
}

impl Element {
    pub(crate) fn new(inner: CrElement) -> Self {
        Self { inner }
    }

    /// Click this element (scrolls into view first).
    pub async fn click(&self) -> Result<()> {
        self.inner.click().await?;
        Ok(())
    }

    /// Type text into this element (wraps type_str).
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.type_str(text).await?;
        Ok(())
    }

    /// Empty the element's value, notifying listeners like a user edit would.
    pub async fn clear(&self) -> Result<()> {
        self.inner.call_js_fn(CLEAR_JS, false).await?;
        Ok(())
    }

    pub async fn scroll_into_view(&self) -> Result<()> {
        self.inner.scroll_into_view().await?;
        Ok(())
    }

    /// Inner text of this element, empty when it has none.
    pub async fn text(&self) -> Result<String> {
        Ok(self.inner.inner_text().await?.unwrap_or_default())
    }

    pub async fn is_visible(&self) -> Result<bool> {
        self.eval_bool(IS_VISIBLE_JS).await
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.eval_bool(IS_ENABLED_JS).await
    }

    /// Inner text of the closest ancestor matching `selector`.
    pub async fn closest_text(&self, selector: &str) -> Result<String> {
        let selector_js =
            serde_json::to_string(selector).map_err(|e| Error::Js(e.to_string()))?;
        let js = format!(
            r#"function() {{
                const el = this.closest({selector_js});
                return el ? (el.innerText || '') : '';
            }}"#,
        );
        let returns = self.inner.call_js_fn(js, false).await?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default())
    }

    /// Find all child elements matching the given CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let els = self.inner.find_elements(selector).await?;
        Ok(els.into_iter().map(Element::new).collect())
    }

    async fn eval_bool(&self, function: &str) -> Result<bool> {
        let returns = self.inner.call_js_fn(function, false).await?;
        if let Some(details) = returns.exception_details {
            return Err(Error::Js(details.text));
        }
        returns
            .result
            .value
            .and_then(|v| v.as_bool())
            .ok_or_else(|| Error::Js("expected a boolean result".into()))
    }
}
