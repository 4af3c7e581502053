use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info};

use crate::config::FillerConfig;
use crate::error::{Error, Result};
use crate::field::FieldKind;
use crate::report::{FailurePolicy, RunLedger, RunSummary};
use crate::sample;
use crate::scan::{Scanned, ScannedField, Scanner};
use crate::surface::Surface;
use crate::synth;

const OPTION_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drives one run over a single page: every field kind in order, then submission.
///
/// The filler owns the page for the whole run; nothing else may touch it meanwhile.
pub struct FormFiller<S: Surface> {
    pub(crate) surface: S,
    pub(crate) config: FillerConfig,
    pub(crate) rng: StdRng,
    pub(crate) ledger: RunLedger,
}

impl<S: Surface> FormFiller<S> {
    pub fn new(surface: S, config: FillerConfig) -> Self {
        let policy = FailurePolicy::from_continue_flag(config.behavior.continue_on_error);
        Self::with_ledger(surface, config, RunLedger::start(policy))
    }

    /// Continue a ledger opened earlier, e.g. at session entry before the page existed.
    pub fn with_ledger(surface: S, config: FillerConfig, ledger: RunLedger) -> Self {
        let rng = match config.behavior.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            surface,
            config,
            rng,
            ledger,
        }
    }

    pub fn ledger(&self) -> &RunLedger {
        &self.ledger
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Fill every kind, submit, and report.
    ///
    /// Under the halt policy the first failure skips the remaining phases;
    /// the summary is still produced and marks the run as aborted.
    pub async fn run(mut self) -> RunSummary {
        info!("Starting form filling process");
        let (submitted, aborted) = match self.fill_all().await {
            Ok(()) => {
                info!("Form filling completed");
                (self.submit().await, false)
            }
            Err(err) => {
                error!("Fatal error occurred: {err}");
                self.snapshot("fatal_error").await;
                (false, true)
            }
        };
        self.ledger.summarize(submitted, aborted)
    }

    /// Close the run after the page could not be brought up: record `err`,
    /// capture what the page shows, and report the run as aborted.
    pub async fn abort_setup(mut self, err: Error) -> RunSummary {
        self.ledger.note(format!("Failed to open form: {err}"));
        self.snapshot("fatal_error").await;
        self.ledger.summarize(false, true)
    }

    /// Run every kind pass in order.
    pub async fn fill_all(&mut self) -> Result<()> {
        for kind in FieldKind::ALL {
            self.fill_kind(kind).await?;
        }
        Ok(())
    }

    /// One pass: scan, then fill each element on its own.
    pub async fn fill_kind(&mut self, kind: FieldKind) -> Result<()> {
        let scanned = match Scanner::new(&self.surface).scan(kind).await {
            Ok(scanned) => scanned,
            Err(err) => {
                return self.ledger.fail(format!("Error scanning {kind} elements: {err}"));
            }
        };

        for entry in scanned {
            let (index, result) = match entry {
                Scanned::Ready(field) => (field.index, self.fill_one(&field).await),
                Scanned::Faulted { index, error } => (index, Err(error)),
            };
            let failed = result.is_err();
            let recorded = self.ledger.record(kind, index, result);
            if failed {
                self.snapshot(&format!("{}_{index}", kind.slug())).await;
            } else {
                self.pace(self.config.delays.between_fields).await;
            }
            recorded?;
        }
        Ok(())
    }

    async fn fill_one(&mut self, field: &ScannedField<S::Handle>) -> Result<String> {
        let kind = field.descriptor.kind;
        match kind {
            FieldKind::SingleChoice => self.select_single(field).await,
            FieldKind::MultiChoice => self.select_multiple(field).await,
            FieldKind::Dropdown => self.select_dropdown(field).await,
            FieldKind::Scale => self.select_scale(field).await,
            _ => {
                let now = Local::now().naive_local();
                let value = synth::text_value(
                    kind,
                    &field.descriptor.question,
                    &self.config.data,
                    &mut self.rng,
                    now,
                )
                .ok_or_else(|| Error::Commit(format!("no text value for {kind}")))?;
                self.surface.set_value(&field.handle, &value).await?;
                Ok(value)
            }
        }
    }

    async fn select_single(&mut self, field: &ScannedField<S::Handle>) -> Result<String> {
        let n = field.options.len();
        let picked = sample::choice_index(&mut self.rng, n)
            .ok_or_else(|| Error::ElementNotFound("radio group has no options".into()))?;
        self.click_option(&field.options[picked]).await?;
        Ok(format!("option {} of {n}", picked + 1))
    }

    async fn select_multiple(&mut self, field: &ScannedField<S::Handle>) -> Result<String> {
        let n = field.options.len();
        if n == 0 {
            return Err(Error::ElementNotFound("checkbox group has no options".into()));
        }
        // a filled group ticks at least one box
        let lo = self.config.behavior.checkbox_min_select.max(1);
        let hi = self.config.behavior.checkbox_max_select.max(lo);
        let k = sample::checkbox_count(&mut self.rng, n, lo, hi);
        let picked = sample::sample_indices(&mut self.rng, n, k);
        for &i in &picked {
            self.click_option(&field.options[i]).await?;
            self.pace(self.config.delays.after_click).await;
        }
        Ok(format!("{k} of {n} checked"))
    }

    async fn select_dropdown(&mut self, field: &ScannedField<S::Handle>) -> Result<String> {
        self.surface.scroll_into_view(&field.handle).await?;
        self.pace(self.config.delays.after_click).await;
        self.surface.click(&field.handle).await?;
        self.pace(self.config.delays.between_fields).await;

        let options = self.wait_for_options(&field.handle).await?;
        let n = options.len();
        let picked = sample::dropdown_index(
            &mut self.rng,
            n,
            self.config.behavior.skip_first_option,
        )
        .ok_or_else(|| Error::ElementNotFound("dropdown has no selectable option".into()))?;
        let choice = &options[picked];
        let text = self.surface.read_text(choice).await.unwrap_or_default();
        self.surface.click(choice).await?;
        Ok(if text.trim().is_empty() {
            format!("option {} of {n}", picked + 1)
        } else {
            text.trim().to_string()
        })
    }

    async fn select_scale(&mut self, field: &ScannedField<S::Handle>) -> Result<String> {
        let n = field.options.len();
        let picked = sample::scale_index(
            &mut self.rng,
            n,
            self.config.behavior.linear_scale_random,
        )
        .ok_or_else(|| Error::ElementNotFound("scale has no options".into()))?;
        self.click_option(&field.options[picked]).await?;
        Ok(format!("point {} of {n}", picked + 1))
    }

    async fn click_option(&self, option: &S::Handle) -> Result<()> {
        self.surface.scroll_into_view(option).await?;
        self.pace(self.config.delays.after_click).await;
        self.surface.click(option).await
    }

    /// Poll the opened listbox for its own options until the wait timeout.
    /// Options rendered outside the listbox are only considered once it times out.
    async fn wait_for_options(&self, listbox: &S::Handle) -> Result<Vec<S::Handle>> {
        let selector = FieldKind::Dropdown
            .option_selector()
            .unwrap_or(r#"div[role="option"]"#);
        let timeout = self.config.wait_timeout();
        let start = Instant::now();
        let scanner = Scanner::new(&self.surface);

        loop {
            let options = scanner.visible_within(listbox, selector).await?;
            if !options.is_empty() {
                return Ok(options);
            }
            if start.elapsed() >= timeout {
                break;
            }
            sleep(OPTION_POLL_INTERVAL).await;
        }

        let detached = scanner.visible(selector).await?;
        if detached.is_empty() {
            return Err(Error::Timeout(format!("dropdown options ({selector})")));
        }
        debug!("Using {} page-level dropdown option(s)", detached.len());
        Ok(detached)
    }

    pub(crate) async fn pace(&self, millis: u64) {
        if millis > 0 {
            sleep(Duration::from_millis(millis)).await;
        }
    }

    /// Save a diagnostic capture named after `phase`, when enabled.
    pub(crate) async fn snapshot(&self, phase: &str) {
        if !self.config.behavior.screenshot_on_error {
            return;
        }
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .config
            .behavior
            .screenshot_dir
            .join(format!("screenshot_{phase}_{stamp}.png"));
        match self.surface.capture(&path).await {
            Ok(()) => info!("Screenshot saved: {}", path.display()),
            Err(err) => error!("Failed to take screenshot: {err}"),
        }
    }
}
