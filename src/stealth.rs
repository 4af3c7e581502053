use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::Page as CrPage;

use crate::error::{Error, Result};

/// Key-value Chrome flags that drop the automation marker from blink.
/// chromiumoxide adds the `--` prefix itself.
pub fn stealth_kv_args() -> Vec<(&'static str, &'static str)> {
    vec![("disable-blink-features", "AutomationControlled")]
}

/// Key-only Chrome flags that suppress the "controlled by automated software" chrome.
pub fn stealth_key_args() -> Vec<&'static str> {
    vec!["disable-infobars", "no-first-run", "no-default-browser-check"]
}

/// Hide `navigator.webdriver` before any form script runs.
pub async fn apply_stealth(page: &CrPage) -> Result<()> {
    let params = AddScriptToEvaluateOnNewDocumentParams::new(WEBDRIVER_JS);
    page.execute(params)
        .await
        .map_err(|e| Error::Js(format!("Failed to inject stealth script: {e}")))?;
    Ok(())
}

static WEBDRIVER_JS: &str = r#"
Object.defineProperty(Navigator.prototype, 'webdriver', {
    get: () => undefined,
    configurable: true,
});
"#;
