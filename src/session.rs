use std::time::Duration;

use tracing::{error, info};

use crate::browser::FormBrowser;
use crate::config::FillerConfig;
use crate::fill::FormFiller;
use crate::report::{FailurePolicy, RunLedger, RunSummary};

/// Launch Chromium, open `url`, fill and submit it, then close the browser.
///
/// Always produces the run's summary. A browser that cannot be launched or a
/// form that cannot be opened ends the run early; the summary then carries the
/// setup error and is marked aborted.
pub async fn run(url: &str, config: FillerConfig) -> RunSummary {
    let policy = FailurePolicy::from_continue_flag(config.behavior.continue_on_error);
    let mut ledger = RunLedger::start(policy);
    let close_grace = config.delays.close_grace;
    let fatal_grace = config.delays.fatal_grace;

    info!("Setting up browser...");
    let browser = match FormBrowser::launch(config.browser_config()).await {
        Ok(browser) => browser,
        Err(err) => {
            ledger.note(format!("Failed to set up browser: {err}"));
            return ledger.summarize(false, true);
        }
    };

    let page = match browser.open_page().await {
        Ok(page) => page,
        Err(err) => {
            ledger.note(format!("Failed to open form: {err}"));
            linger(fatal_grace).await;
            shutdown(browser).await;
            return ledger.summarize(false, true);
        }
    };

    info!("Opening form: {url}");
    if let Err(err) = page.goto(url).await {
        let summary = FormFiller::with_ledger(page, config, ledger)
            .abort_setup(err)
            .await;
        linger(fatal_grace).await;
        shutdown(browser).await;
        return summary;
    }
    pause(config.delays.page_load).await;
    info!("Form loaded successfully");

    let summary = FormFiller::with_ledger(page, config, ledger).run().await;

    linger(if summary.aborted { fatal_grace } else { close_grace }).await;
    shutdown(browser).await;
    summary
}

async fn pause(millis: u64) {
    if millis > 0 {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// Keep the window up for a while so the result can be inspected.
async fn linger(millis: u64) {
    if millis > 0 {
        info!("Browser will close in {:.1} seconds...", millis as f64 / 1000.0);
        pause(millis).await;
    }
}

async fn shutdown(browser: FormBrowser) {
    match browser.close().await {
        Ok(()) => info!("Browser closed."),
        Err(err) => error!("Failed to close browser: {err}"),
    }
}
