use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::{debug, info};

use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::page::Page;
use crate::stealth;

/// Chrome flags that keep a form session lean and container friendly.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-dev-shm-usage",
    "disable-extensions",
    "mute-audio",
    "disable-popup-blocking",
];

/// A Chromium instance owned by one fill session.
pub struct FormBrowser {
    browser: CrBrowser,
    stealth: bool,
    handler_task: tokio::task::JoinHandle<()>,
}

impl FormBrowser {
    /// Launch a browser instance with the given configuration.
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
            info!("Running in headless mode");
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in PERF_ARGS {
            builder = builder.arg(*arg);
        }

        // chromiumoxide adds the `--` prefix, so keys must not carry it
        if config.stealth {
            for arg in stealth::stealth_key_args() {
                builder = builder.arg(arg);
            }
            for arg in stealth::stealth_kv_args() {
                builder = builder.arg(arg);
            }
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        if config.maximize {
            builder = builder.arg("start-maximized").viewport(None::<Viewport>);
        } else {
            builder = builder.viewport(Viewport {
                width: config.viewport_width,
                height: config.viewport_height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: false,
                has_touch: false,
            });
        }

        let cr_config = builder.build().map_err(Error::Launch)?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        info!("Browser setup complete");
        Ok(Self {
            browser,
            stealth: config.stealth,
            handler_task,
        })
    }

    /// Open a blank tab. The stealth script is registered here, before the
    /// caller navigates, so it runs ahead of the form's own scripts.
    pub async fn open_page(&self) -> Result<Page> {
        let cr_page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;

        if self.stealth {
            stealth::apply_stealth(&cr_page).await?;
        }
        Ok(Page::new(cr_page))
    }

    /// Close Chromium and wait for the process to exit.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let status = self.browser.wait().await?;
        debug!(?status, "browser process exited");
        self.handler_task.abort();
        Ok(())
    }
}
