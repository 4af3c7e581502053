use tracing::{debug, info};

use crate::error::Result;
use crate::fill::FormFiller;
use crate::scan::Scanner;
use crate::surface::Surface;

/// A place the submit action may live.
#[derive(Debug, Clone, Copy)]
pub struct SubmitCandidate {
    pub selector: &'static str,
    /// Require the caption to look like a submit label.
    pub check_caption: bool,
}

/// Probed in order; the first selector with a usable match wins.
pub const SUBMIT_CANDIDATES: &[SubmitCandidate] = &[
    SubmitCandidate {
        selector: r#"span[jsname="V67aGc"]"#,
        check_caption: true,
    },
    SubmitCandidate {
        selector: r#"div[role="button"][jsname="M2UYVd"]"#,
        check_caption: false,
    },
    SubmitCandidate {
        selector: "span.uArJ5e.UQuaGc.Y5sE8d.VkkpIf.NqnGTe",
        check_caption: false,
    },
    SubmitCandidate {
        selector: r#"button[type="submit"]"#,
        check_caption: true,
    },
];

/// Shown once the form has been recorded.
pub const CONFIRMATION_SELECTOR: &str = "div.vHW8K";

/// Whether `text` reads like a submit caption: it mentions "submit", equals one
/// of the localized captions, or is empty (icon-only buttons).
pub fn caption_matches(text: &str, localized: &[String]) -> bool {
    let caption = text.trim().to_lowercase();
    caption.is_empty()
        || caption.contains("submit")
        || localized.iter().any(|c| c.trim().to_lowercase() == caption)
}

impl<S: Surface> FormFiller<S> {
    /// Locate and press the submit action, then look for a confirmation.
    ///
    /// Never fails past this point: problems are recorded and `false` is returned.
    pub async fn submit(&mut self) -> bool {
        if !self.config.behavior.auto_submit {
            info!("Auto-submit disabled. Skipping submission.");
            return false;
        }

        info!("Attempting to submit form...");
        self.pace(self.config.delays.before_submit).await;

        let Some(button) = self.locate_submit().await else {
            self.ledger.note("Submit button not found".to_string());
            self.snapshot("submit_not_found").await;
            return false;
        };

        if let Err(err) = self.press(&button).await {
            self.ledger.note(format!("Error submitting form: {err}"));
            self.snapshot("submit_error").await;
            return false;
        }
        info!("Form submitted successfully");

        self.pace(self.config.delays.after_submit).await;
        self.confirm().await;
        true
    }

    async fn locate_submit(&self) -> Option<S::Handle> {
        let scanner = Scanner::new(&self.surface);
        for candidate in SUBMIT_CANDIDATES {
            let buttons = match scanner.visible(candidate.selector).await {
                Ok(buttons) => buttons,
                Err(err) => {
                    debug!("Submit probe {} failed: {err}", candidate.selector);
                    continue;
                }
            };
            for button in buttons {
                if !candidate.check_caption {
                    return Some(button);
                }
                let caption = self.surface.read_text(&button).await.unwrap_or_default();
                if caption_matches(&caption, &self.config.behavior.submit_captions) {
                    return Some(button);
                }
            }
        }
        None
    }

    async fn press(&self, button: &S::Handle) -> Result<()> {
        self.surface.scroll_into_view(button).await?;
        self.pace(self.config.delays.after_click).await;
        self.surface.click(button).await
    }

    /// Best effort: a missing confirmation is logged, not recorded.
    async fn confirm(&self) {
        let found = self.surface.find_all(CONFIRMATION_SELECTOR).await;
        let text = match found {
            Ok(handles) => match handles.first() {
                Some(handle) => self.surface.read_text(handle).await.unwrap_or_default(),
                None => String::new(),
            },
            Err(_) => String::new(),
        };
        if text.trim().is_empty() {
            info!("Form submitted (confirmation not detected)");
        } else {
            info!("Confirmation: {}", text.trim());
        }
    }
}
